//! Repository for the `appointments` table.

use sqlx::PgPool;
use voyagent_core::types::DbId;

use crate::models::appointment::Appointment;
use crate::models::status::AppointmentStatus;

/// Column list for `appointments` queries.
const COLUMNS: &str = "id, lead_id, client_name, phone_number, email, appointment_date, \
     appointment_time, duration_minutes, appointment_type, notes, status, \
     created_at, updated_at";

/// Store operations for the calendar view.
pub struct AppointmentRepo;

impl AppointmentRepo {
    /// Fetch every appointment, ordered by date then time ascending.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Appointment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM appointments \
             ORDER BY appointment_date ASC, appointment_time ASC"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .fetch_all(pool)
            .await
    }

    /// Set an appointment's status, refreshing `updated_at`.
    ///
    /// Returns `None` if no appointment with the given ID exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: AppointmentStatus,
    ) -> Result<Option<Appointment>, sqlx::Error> {
        let query = format!(
            "UPDATE appointments SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Appointment>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
