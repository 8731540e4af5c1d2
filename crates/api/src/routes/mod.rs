pub mod appointments;
pub mod health;
pub mod leads;
pub mod voice;
pub mod webhook;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /ws                          WebSocket (dashboard realtime feed)
///
/// /webhook/lead                lead capture (GET probe, POST capture)
///
/// /leads                       list (with ?status= filter)
/// /leads/stats                 headline counts
/// /leads/{id}/status           update status (PUT)
///
/// /appointments                list (?date= / ?upcoming=)
/// /appointments/week           Sunday-start week view
/// /appointments/{id}/status    update status (PUT)
///
/// /voice/session               session snapshot
/// /voice/start                 start call (POST)
/// /voice/stop                  stop call (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/ws", get(ws::ws_handler))
        .nest("/webhook", webhook::router())
        .nest("/leads", leads::router())
        .nest("/appointments", appointments::router())
        .nest("/voice", voice::router())
}
