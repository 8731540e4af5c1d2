//! Handlers for the appointments calendar.
//!
//! As with leads, the calendar pulls the full appointment set and does
//! its date bucketing in memory.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use voyagent_core::calendar::{shift_weeks, week_dates};
use voyagent_core::error::CoreError;
use voyagent_core::types::DbId;
use voyagent_db::models::appointment::{self, Appointment};
use voyagent_db::models::status::AppointmentStatus;
use voyagent_db::repositories::appointment_repo::AppointmentRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListAppointmentsParams {
    /// Restrict to a single day.
    pub date: Option<NaiveDate>,
    /// Restrict to non-cancelled appointments from today onwards.
    #[serde(default)]
    pub upcoming: bool,
}

/// GET /api/appointments
pub async fn list_appointments(
    State(state): State<AppState>,
    Query(params): Query<ListAppointmentsParams>,
) -> AppResult<Json<DataResponse<Vec<Appointment>>>> {
    let all = AppointmentRepo::list_all(&state.pool).await?;
    let selected: Vec<Appointment> = if let Some(date) = params.date {
        appointment::on_date(&all, date).into_iter().cloned().collect()
    } else if params.upcoming {
        appointment::upcoming(&all, Utc::now().date_naive())
            .into_iter()
            .cloned()
            .collect()
    } else {
        all
    };
    Ok(Json(DataResponse::new(selected)))
}

#[derive(Debug, Deserialize)]
pub struct WeekParams {
    /// Any date inside the wanted week; defaults to today.
    pub date: Option<NaiveDate>,
    /// Whole-week offset applied to `date` (negative = past weeks).
    #[serde(default)]
    pub offset: i64,
}

/// One day column of the calendar week view.
#[derive(Debug, Serialize)]
pub struct WeekDay {
    pub date: NaiveDate,
    pub appointments: Vec<Appointment>,
}

#[derive(Debug, Serialize)]
pub struct WeekView {
    pub week_start: NaiveDate,
    pub days: Vec<WeekDay>,
}

/// Bucket appointments into the Sunday-start week containing `anchor`.
fn build_week(appointments: &[Appointment], anchor: NaiveDate) -> WeekView {
    let dates = week_dates(anchor);
    let days = dates
        .iter()
        .map(|&date| WeekDay {
            date,
            appointments: appointment::on_date(appointments, date)
                .into_iter()
                .cloned()
                .collect(),
        })
        .collect();
    WeekView {
        week_start: dates[0],
        days,
    }
}

/// GET /api/appointments/week
pub async fn week_view(
    State(state): State<AppState>,
    Query(params): Query<WeekParams>,
) -> AppResult<Json<DataResponse<WeekView>>> {
    let anchor = shift_weeks(
        params.date.unwrap_or_else(|| Utc::now().date_naive()),
        params.offset,
    );
    let all = AppointmentRepo::list_all(&state.pool).await?;
    Ok(Json(DataResponse::new(build_week(&all, anchor))))
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusBody {
    pub status: AppointmentStatus,
}

/// PUT /api/appointments/{id}/status
pub async fn update_appointment_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(body): Json<UpdateStatusBody>,
) -> AppResult<Json<DataResponse<Appointment>>> {
    let updated = AppointmentRepo::update_status(&state.pool, id, body.status)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Appointment",
            id,
        })?;
    tracing::info!(appointment_id = %id, "Appointment status updated");
    Ok(Json(DataResponse::new(updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use voyagent_db::models::status::AppointmentType;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn appointment(date: NaiveDate) -> Appointment {
        Appointment {
            id: uuid::Uuid::new_v4(),
            lead_id: None,
            client_name: "Client".to_string(),
            phone_number: "555-0000".to_string(),
            email: None,
            appointment_date: date,
            appointment_time: NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
            duration_minutes: 60,
            appointment_type: AppointmentType::Consultation,
            notes: None,
            status: AppointmentStatus::Scheduled,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn week_has_seven_days_and_buckets_by_date() {
        // Week of Sunday 2026-08-30.
        let appts = vec![
            appointment(d(2026, 8, 30)),
            appointment(d(2026, 9, 1)),
            appointment(d(2026, 9, 1)),
            appointment(d(2026, 9, 10)), // next week, excluded
        ];
        let week = build_week(&appts, d(2026, 9, 2));
        assert_eq!(week.week_start, d(2026, 8, 30));
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.days[0].appointments.len(), 1);
        assert_eq!(week.days[2].appointments.len(), 2);
        let total: usize = week.days.iter().map(|day| day.appointments.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn empty_week_still_has_all_day_columns() {
        let week = build_week(&[], d(2026, 1, 15));
        assert_eq!(week.days.len(), 7);
        assert!(week.days.iter().all(|day| day.appointments.is_empty()));
    }
}
