//! Enumerations backing the PostgreSQL enum types.
//!
//! Each Rust enum maps 1:1 onto a `CREATE TYPE ... AS ENUM` declared in
//! the initial migration. Wire names (serde) and database labels (sqlx)
//! are identical, so a value round-trips between JSON and the database
//! without translation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lead pipeline status. Transitions are free-form: any value may be set
/// from any value, there is no enforced workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lead_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Contacted,
    Qualified,
    Converted,
    Lost,
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Qualified => "qualified",
            LeadStatus::Converted => "converted",
            LeadStatus::Lost => "lost",
        };
        f.write_str(s)
    }
}

impl FromStr for LeadStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "qualified" => Ok(LeadStatus::Qualified),
            "converted" => Ok(LeadStatus::Converted),
            "lost" => Ok(LeadStatus::Lost),
            other => Err(UnknownVariant {
                kind: "lead status",
                value: other.to_string(),
            }),
        }
    }
}

/// Kind of trip the caller is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "trip_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TripType {
    Cruise,
    #[sqlx(rename = "all-inclusive")]
    #[serde(rename = "all-inclusive")]
    AllInclusive,
    Golf,
    Wedding,
    Honeymoon,
    Group,
    Other,
}

/// Budget bracket stated by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "budget_range")]
pub enum BudgetRange {
    #[sqlx(rename = "under_2000")]
    #[serde(rename = "under_2000")]
    Under2000,
    #[sqlx(rename = "2000_5000")]
    #[serde(rename = "2000_5000")]
    From2000To5000,
    #[sqlx(rename = "5000_10000")]
    #[serde(rename = "5000_10000")]
    From5000To10000,
    #[sqlx(rename = "over_10000")]
    #[serde(rename = "over_10000")]
    Over10000,
}

/// Preferred language of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "lead_language", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Language {
    French,
    English,
}

/// Kind of scheduled appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "appointment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentType {
    Consultation,
    FollowUp,
    Booking,
    Other,
}

/// Appointment lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "appointment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
}

/// Error returned when parsing an enum label fails.
#[derive(Debug, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
