//! WebSocket client for the hosted voice service.
//!
//! [`VoiceClient`] holds the connection configuration for the service.
//! Call [`VoiceClient::connect`] to establish a live [`VoiceConnection`]
//! for one call.

use tokio_tungstenite::{connect_async, MaybeTlsStream};

/// Configuration handle for the voice service.
pub struct VoiceClient {
    ws_url: String,
    public_key: String,
    assistant_id: String,
}

/// A live WebSocket connection carrying one voice call's event stream.
pub struct VoiceConnection {
    /// Unique session ID sent during the handshake, for log correlation.
    pub session_id: String,
    /// The raw WebSocket stream for reading frames.
    pub ws_stream: tokio_tungstenite::WebSocketStream<MaybeTlsStream<tokio::net::TcpStream>>,
}

impl VoiceClient {
    /// Create a client for the given service endpoint and credentials.
    ///
    /// * `ws_url`       - WebSocket base URL, e.g. `wss://voice.example.com`.
    /// * `public_key`   - the publishable API key for the service.
    /// * `assistant_id` - the fixed assistant configuration to start calls with.
    pub fn new(ws_url: String, public_key: String, assistant_id: String) -> Self {
        Self {
            ws_url,
            public_key,
            assistant_id,
        }
    }

    /// The assistant every call is started against.
    pub fn assistant_id(&self) -> &str {
        &self.assistant_id
    }

    /// Open the event stream for a new call.
    ///
    /// The generated session ID (UUID v4) is passed as a query parameter
    /// so the service can address messages to this client. Connecting
    /// does not mean the call is live: the service signals that with a
    /// `call-start` message on the stream.
    pub async fn connect(&self) -> Result<VoiceConnection, VoiceClientError> {
        let session_id = uuid::Uuid::new_v4().to_string();
        let url = format!(
            "{}/call?publicKey={}&assistantId={}&sessionId={}",
            self.ws_url, self.public_key, self.assistant_id, session_id
        );

        let (ws_stream, _response) = connect_async(&url).await.map_err(|e| {
            VoiceClientError::Connection(format!(
                "Failed to connect to voice service at {}: {e}",
                self.ws_url
            ))
        })?;

        tracing::info!(
            session_id = %session_id,
            assistant_id = %self.assistant_id,
            "Connected to voice service at {}",
            self.ws_url,
        );

        Ok(VoiceConnection {
            session_id,
            ws_stream,
        })
    }
}

/// Errors from the WebSocket client.
#[derive(Debug, thiserror::Error)]
pub enum VoiceClientError {
    /// Failed to establish the initial WebSocket connection.
    #[error("Connection error: {0}")]
    Connection(String),
}
