use voyagent_voice::client::VoiceClient;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development,
/// except the voice service settings which default to "not configured".
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long to wait for background tasks during shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Hosted voice service settings.
    pub voice: VoiceSettings,
}

/// Credentials and endpoint for the hosted voice service.
///
/// The session controller only mounts when all three values are present;
/// otherwise the voice surface runs disabled and reports so.
#[derive(Debug, Clone, Default)]
pub struct VoiceSettings {
    /// WebSocket base URL (`VOICE_WS_URL`).
    pub ws_url: Option<String>,
    /// Publishable API key (`VOICE_PUBLIC_KEY`).
    pub public_key: Option<String>,
    /// Fixed assistant configuration ID (`VOICE_ASSISTANT_ID`).
    pub assistant_id: Option<String>,
}

impl VoiceSettings {
    /// Build a client when the service is fully configured.
    pub fn client(&self) -> Option<VoiceClient> {
        match (&self.ws_url, &self.public_key, &self.assistant_id) {
            (Some(url), Some(key), Some(assistant)) => Some(VoiceClient::new(
                url.clone(),
                key.clone(),
                assistant.clone(),
            )),
            _ => None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `SHUTDOWN_TIMEOUT_SECS` | `30`                       |
    /// | `VOICE_WS_URL`          | unset (voice disabled)     |
    /// | `VOICE_PUBLIC_KEY`      | unset (voice disabled)     |
    /// | `VOICE_ASSISTANT_ID`    | unset (voice disabled)     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let voice = VoiceSettings {
            ws_url: non_empty_env("VOICE_WS_URL"),
            public_key: non_empty_env("VOICE_PUBLIC_KEY"),
            assistant_id: non_empty_env("VOICE_ASSISTANT_ID"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            voice,
        }
    }
}

/// Read an env var, treating whitespace-only values as unset.
fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
