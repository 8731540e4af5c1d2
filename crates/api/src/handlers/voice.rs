//! Handlers controlling the voice session.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use voyagent_voice::SessionSnapshot;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StartResult {
    /// False when the session was not idle and the request was ignored.
    pub started: bool,
}

#[derive(Debug, Serialize)]
pub struct StopResult {
    /// False when the session was already idle.
    pub stopped: bool,
}

/// GET /api/voice/session
pub async fn session_snapshot(
    State(state): State<AppState>,
) -> Json<DataResponse<SessionSnapshot>> {
    Json(DataResponse::new(state.voice.snapshot().await))
}

/// POST /api/voice/start
pub async fn start_call(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StartResult>>> {
    let started = state.voice.start().await?;
    Ok(Json(DataResponse::new(StartResult { started })))
}

/// POST /api/voice/stop
pub async fn stop_call(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StopResult>>> {
    let stopped = state.voice.stop().await?;
    Ok(Json(DataResponse::new(StopResult { stopped })))
}
