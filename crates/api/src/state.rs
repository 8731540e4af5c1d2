use std::sync::Arc;

use voyagent_voice::VoiceController;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already
/// `Clone`). The event bus is deliberately absent: handlers never publish
/// change events themselves, the database triggers do.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, constructed once at startup.
    pub pool: voyagent_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (dashboard clients).
    pub ws_manager: Arc<WsManager>,
    /// Voice session controller (possibly disabled).
    pub voice: Arc<VoiceController>,
}
