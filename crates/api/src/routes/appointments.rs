//! Routes for the appointments calendar.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::appointments;
use crate::state::AppState;

/// Appointment routes mounted at `/appointments`.
///
/// ```text
/// GET /               -> list_appointments (optional ?date= / ?upcoming=)
/// GET /week           -> week_view (?date= anchor, ?offset= whole weeks)
/// PUT /{id}/status    -> update_appointment_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(appointments::list_appointments))
        .route("/week", get(appointments::week_view))
        .route("/{id}/status", put(appointments::update_appointment_status))
}
