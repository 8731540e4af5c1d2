//! Routes for the lead capture webhook.

use axum::routing::get;
use axum::Router;

use crate::handlers::webhook;
use crate::state::AppState;

/// Webhook routes mounted at `/webhook`.
///
/// ```text
/// GET  /lead   -> webhook_status (liveness probe)
/// POST /lead   -> capture_lead
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/lead",
        get(webhook::webhook_status).post(webhook::capture_lead),
    )
}
