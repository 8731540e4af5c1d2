//! Repository for the `leads` table.

use sqlx::PgPool;
use voyagent_core::types::DbId;

use crate::models::lead::{Lead, NewLead};
use crate::models::status::LeadStatus;

/// Column list for `leads` queries.
const COLUMNS: &str = "id, caller_name, phone_number, email, travel_dates, destination, \
     trip_type, budget_range, party_size, language, notes, callback_time, status, \
     created_at, updated_at";

/// Provides the store operations the webhook and dashboard need.
pub struct LeadRepo;

impl LeadRepo {
    /// Insert a normalized lead and return the stored row.
    pub async fn create(pool: &PgPool, new: &NewLead) -> Result<Lead, sqlx::Error> {
        let query = format!(
            "INSERT INTO leads \
             (caller_name, phone_number, email, travel_dates, destination, trip_type, \
              budget_range, party_size, language, notes, callback_time, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(&new.caller_name)
            .bind(&new.phone_number)
            .bind(&new.email)
            .bind(&new.travel_dates)
            .bind(&new.destination)
            .bind(new.trip_type)
            .bind(new.budget_range)
            .bind(&new.party_size)
            .bind(new.language)
            .bind(&new.notes)
            .bind(&new.callback_time)
            .bind(new.status)
            .fetch_one(pool)
            .await
    }

    /// Fetch every lead, newest first.
    ///
    /// The dashboard always pulls the full set; filtering happens in
    /// memory after the fetch.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Lead>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM leads ORDER BY created_at DESC");
        sqlx::query_as::<_, Lead>(&query).fetch_all(pool).await
    }

    /// Set a lead's status, refreshing `updated_at`.
    ///
    /// Returns `None` if no lead with the given ID exists.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: LeadStatus,
    ) -> Result<Option<Lead>, sqlx::Error> {
        let query = format!(
            "UPDATE leads SET status = $2, updated_at = NOW() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Lead>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
