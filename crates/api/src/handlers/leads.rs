//! Handlers for the leads dashboard.
//!
//! The list endpoint always pulls the full set and filters in memory,
//! so the headline stats and the filtered table stay consistent with
//! each other regardless of the active filter.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use voyagent_core::error::CoreError;
use voyagent_core::types::DbId;
use voyagent_db::models::lead::{filter_by_status, Lead, LeadStats};
use voyagent_db::models::status::LeadStatus;
use voyagent_db::repositories::lead_repo::LeadRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListLeadsParams {
    /// Status filter. Omitted or `all` means no filtering.
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LeadsPage {
    pub leads: Vec<Lead>,
    pub stats: LeadStats,
}

/// Parse a status query value, where `all` and absence mean "no filter".
fn parse_filter(raw: Option<&str>) -> Result<Option<LeadStatus>, AppError> {
    match raw {
        None | Some("all") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e: voyagent_db::models::status::UnknownVariant| {
                AppError::BadRequest(e.to_string())
            }),
    }
}

/// GET /api/leads
pub async fn list_leads(
    State(state): State<AppState>,
    Query(params): Query<ListLeadsParams>,
) -> AppResult<Json<DataResponse<LeadsPage>>> {
    let filter = parse_filter(params.status.as_deref())?;
    let all = LeadRepo::list_all(&state.pool).await?;
    let stats = LeadStats::summarize(&all);
    let leads = filter_by_status(all, filter);
    Ok(Json(DataResponse::new(LeadsPage { leads, stats })))
}

/// GET /api/leads/stats
pub async fn lead_stats(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<LeadStats>>> {
    let all = LeadRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(LeadStats::summarize(&all))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: LeadStatus,
}

/// PUT /api/leads/{id}/status
pub async fn update_lead_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateStatusBody>,
) -> AppResult<Json<DataResponse<Lead>>> {
    let updated = LeadRepo::update_status(&state.pool, id, body.status)
        .await?
        .ok_or(CoreError::NotFound { entity: "Lead", id })?;
    tracing::info!(lead_id = %id, status = %body.status, "Lead status updated");
    Ok(Json(DataResponse::new(updated)))
}
