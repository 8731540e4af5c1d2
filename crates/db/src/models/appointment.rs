//! Appointment entity model and the calendar view's in-memory filters.
//!
//! Appointments are created and managed outside this service; only
//! status updates flow through the API, so there is no insert DTO here.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;
use voyagent_core::types::{DbId, Timestamp};

use crate::models::status::{AppointmentStatus, AppointmentType};

/// A row from the `appointments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Appointment {
    pub id: DbId,
    pub lead_id: Option<DbId>,
    pub client_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub duration_minutes: i32,
    pub appointment_type: AppointmentType,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Appointments falling on an exact date, preserving fetch order.
pub fn on_date(appointments: &[Appointment], date: NaiveDate) -> Vec<&Appointment> {
    appointments
        .iter()
        .filter(|a| a.appointment_date == date)
        .collect()
}

/// Appointments on or after `today` that have not been cancelled.
pub fn upcoming(appointments: &[Appointment], today: NaiveDate) -> Vec<&Appointment> {
    appointments
        .iter()
        .filter(|a| a.appointment_date >= today && a.status != AppointmentStatus::Cancelled)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn appointment(date: NaiveDate, status: AppointmentStatus) -> Appointment {
        Appointment {
            id: uuid::Uuid::new_v4(),
            lead_id: None,
            client_name: "Client".to_string(),
            phone_number: "555-0000".to_string(),
            email: None,
            appointment_date: date,
            appointment_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            duration_minutes: 30,
            appointment_type: AppointmentType::Consultation,
            notes: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn on_date_matches_exact_day_only() {
        let appts = vec![
            appointment(d(2026, 9, 1), AppointmentStatus::Scheduled),
            appointment(d(2026, 9, 2), AppointmentStatus::Scheduled),
            appointment(d(2026, 9, 1), AppointmentStatus::Confirmed),
        ];
        assert_eq!(on_date(&appts, d(2026, 9, 1)).len(), 2);
        assert_eq!(on_date(&appts, d(2026, 9, 3)).len(), 0);
    }

    #[test]
    fn upcoming_excludes_past_and_cancelled() {
        let today = d(2026, 9, 2);
        let appts = vec![
            appointment(d(2026, 9, 1), AppointmentStatus::Scheduled), // past
            appointment(d(2026, 9, 2), AppointmentStatus::Scheduled), // today
            appointment(d(2026, 9, 3), AppointmentStatus::Cancelled), // cancelled
            appointment(d(2026, 9, 4), AppointmentStatus::Confirmed),
        ];
        let result = upcoming(&appts, today);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|a| a.appointment_date >= today));
        assert!(result
            .iter()
            .all(|a| a.status != AppointmentStatus::Cancelled));
    }
}
