//! Routes for the leads dashboard.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::leads;
use crate::state::AppState;

/// Lead routes mounted at `/leads`.
///
/// ```text
/// GET /               -> list_leads (optional ?status= filter)
/// GET /stats          -> lead_stats
/// PUT /{id}/status    -> update_lead_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leads::list_leads))
        .route("/stats", get(leads::lead_stats))
        .route("/{id}/status", put(leads::update_lead_status))
}
