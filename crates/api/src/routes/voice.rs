//! Routes for voice session control.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::voice;
use crate::state::AppState;

/// Voice routes mounted at `/voice`.
///
/// ```text
/// GET  /session   -> session_snapshot
/// POST /start     -> start_call
/// POST /stop      -> stop_call
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/session", get(voice::session_snapshot))
        .route("/start", post(voice::start_call))
        .route("/stop", post(voice::stop_call))
}
