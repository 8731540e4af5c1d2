//! Lead entity model, webhook payload normalization, and the pure
//! filter/stat helpers the leads dashboard applies in memory.

use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use voyagent_core::types::{DbId, Timestamp};

use crate::models::status::{BudgetRange, Language, LeadStatus, TripType};

/// A row from the `leads` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Lead {
    pub id: DbId,
    pub caller_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub travel_dates: Option<String>,
    pub destination: String,
    pub trip_type: TripType,
    pub budget_range: Option<BudgetRange>,
    pub party_size: Option<String>,
    pub language: Option<Language>,
    pub notes: Option<String>,
    pub callback_time: Option<String>,
    pub status: LeadStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Insert DTO for a new lead, produced only by webhook normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub caller_name: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub travel_dates: Option<String>,
    pub destination: String,
    pub trip_type: TripType,
    pub budget_range: Option<BudgetRange>,
    pub party_size: Option<String>,
    pub language: Option<Language>,
    pub notes: Option<String>,
    pub callback_time: Option<String>,
    pub status: LeadStatus,
}

impl NewLead {
    /// Normalize an untyped lead payload into an insertable record.
    ///
    /// Missing, null, or empty-string fields fall back to fixed defaults:
    /// `"Unknown"` for name/phone, `"Not specified"` for destination,
    /// `other` for the trip type, and `None` for every optional field.
    /// Unrecognized enum labels degrade the same way. The status is
    /// always forced to `new`, whatever the payload claims.
    pub fn from_payload(payload: &Value) -> Self {
        Self {
            caller_name: text_or(payload, "caller_name", "Unknown"),
            phone_number: text_or(payload, "phone_number", "Unknown"),
            email: opt_text(payload, "email"),
            travel_dates: opt_text(payload, "travel_dates"),
            destination: text_or(payload, "destination", "Not specified"),
            trip_type: enum_field(payload, "trip_type").unwrap_or(TripType::Other),
            budget_range: enum_field(payload, "budget_range"),
            party_size: opt_text(payload, "party_size"),
            language: enum_field(payload, "language"),
            notes: opt_text(payload, "notes"),
            callback_time: opt_text(payload, "callback_time"),
            status: LeadStatus::New,
        }
    }
}

/// Extract a non-empty text field, or the given default.
///
/// Numbers are rendered to text (voice models sometimes emit a bare
/// number for fields like `party_size`).
fn text_or(payload: &Value, key: &str, default: &str) -> String {
    opt_text(payload, key).unwrap_or_else(|| default.to_string())
}

/// Extract an optional text field; missing, null, and `""` all map to `None`.
fn opt_text(payload: &Value, key: &str) -> Option<String> {
    match payload.get(key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Deserialize an enum-valued field, yielding `None` on anything
/// unrecognized rather than failing the whole payload.
fn enum_field<T: serde::de::DeserializeOwned>(payload: &Value, key: &str) -> Option<T> {
    payload
        .get(key)
        .and_then(|v| serde_json::from_value(v.clone()).ok())
}

/// Apply the dashboard status filter to a fetched set.
///
/// `None` is the "all" filter: the set comes back unmodified and in its
/// original order.
pub fn filter_by_status(leads: Vec<Lead>, status: Option<LeadStatus>) -> Vec<Lead> {
    match status {
        None => leads,
        Some(wanted) => leads.into_iter().filter(|l| l.status == wanted).collect(),
    }
}

/// Headline counts shown above the leads table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeadStats {
    pub total: usize,
    pub new: usize,
    pub contacted: usize,
    pub converted: usize,
}

impl LeadStats {
    /// Compute counts over the full fetched set.
    pub fn summarize(leads: &[Lead]) -> Self {
        let count = |s: LeadStatus| leads.iter().filter(|l| l.status == s).count();
        Self {
            total: leads.len(),
            new: count(LeadStatus::New),
            contacted: count(LeadStatus::Contacted),
            converted: count(LeadStatus::Converted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn lead(name: &str, status: LeadStatus) -> Lead {
        Lead {
            id: uuid::Uuid::new_v4(),
            caller_name: name.to_string(),
            phone_number: "555-0000".to_string(),
            email: None,
            travel_dates: None,
            destination: "Not specified".to_string(),
            trip_type: TripType::Other,
            budget_range: None,
            party_size: None,
            language: None,
            notes: None,
            callback_time: None,
            status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn flat_payload_keeps_provided_fields_verbatim() {
        let payload = json!({
            "caller_name": "Jean",
            "phone_number": "555-1234",
            "email": "jean@example.com",
            "destination": "Cuba",
            "trip_type": "cruise",
            "budget_range": "2000_5000",
            "party_size": "4",
            "language": "french",
            "notes": "prefers a balcony cabin",
            "travel_dates": "2026-12-10 to 2026-12-20",
            "callback_time": "afternoon",
        });

        let new = NewLead::from_payload(&payload);
        assert_eq!(new.caller_name, "Jean");
        assert_eq!(new.phone_number, "555-1234");
        assert_eq!(new.email.as_deref(), Some("jean@example.com"));
        assert_eq!(new.destination, "Cuba");
        assert_eq!(new.trip_type, TripType::Cruise);
        assert_eq!(new.budget_range, Some(BudgetRange::From2000To5000));
        assert_eq!(new.party_size.as_deref(), Some("4"));
        assert_eq!(new.language, Some(Language::French));
        assert_eq!(new.notes.as_deref(), Some("prefers a balcony cabin"));
        assert_eq!(
            new.travel_dates.as_deref(),
            Some("2026-12-10 to 2026-12-20")
        );
        assert_eq!(new.callback_time.as_deref(), Some("afternoon"));
        assert_eq!(new.status, LeadStatus::New);
    }

    #[test]
    fn missing_and_empty_fields_get_defaults() {
        let new = NewLead::from_payload(&json!({ "caller_name": "" }));
        assert_eq!(new.caller_name, "Unknown");
        assert_eq!(new.phone_number, "Unknown");
        assert_eq!(new.destination, "Not specified");
        assert_eq!(new.trip_type, TripType::Other);
        assert_eq!(new.email, None);
        assert_eq!(new.budget_range, None);
        assert_eq!(new.party_size, None);
        assert_eq!(new.language, None);
        assert_eq!(new.notes, None);
        assert_eq!(new.travel_dates, None);
        assert_eq!(new.callback_time, None);
    }

    #[test]
    fn status_in_payload_is_ignored() {
        let new = NewLead::from_payload(&json!({
            "caller_name": "Marie",
            "status": "converted",
        }));
        assert_eq!(new.status, LeadStatus::New);
    }

    #[test]
    fn unrecognized_enum_labels_degrade_to_defaults() {
        let new = NewLead::from_payload(&json!({
            "trip_type": "safari",
            "budget_range": "a lot",
            "language": "klingon",
        }));
        assert_eq!(new.trip_type, TripType::Other);
        assert_eq!(new.budget_range, None);
        assert_eq!(new.language, None);
    }

    #[test]
    fn numeric_party_size_is_rendered_to_text() {
        let new = NewLead::from_payload(&json!({ "party_size": 4 }));
        assert_eq!(new.party_size.as_deref(), Some("4"));
    }

    #[test]
    fn filter_all_returns_full_set_in_order() {
        let leads = vec![
            lead("a", LeadStatus::New),
            lead("b", LeadStatus::Lost),
            lead("c", LeadStatus::New),
        ];
        let names: Vec<String> = leads.iter().map(|l| l.caller_name.clone()).collect();

        let filtered = filter_by_status(leads, None);
        let filtered_names: Vec<String> =
            filtered.iter().map(|l| l.caller_name.clone()).collect();
        assert_eq!(filtered_names, names);
    }

    #[test]
    fn filter_by_status_keeps_only_matches() {
        let leads = vec![
            lead("a", LeadStatus::New),
            lead("b", LeadStatus::Lost),
            lead("c", LeadStatus::New),
        ];
        let filtered = filter_by_status(leads, Some(LeadStatus::New));
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|l| l.status == LeadStatus::New));
    }

    #[test]
    fn stats_count_by_status() {
        let leads = vec![
            lead("a", LeadStatus::New),
            lead("b", LeadStatus::Contacted),
            lead("c", LeadStatus::Converted),
            lead("d", LeadStatus::New),
            lead("e", LeadStatus::Lost),
        ];
        let stats = LeadStats::summarize(&leads);
        assert_eq!(stats.total, 5);
        assert_eq!(stats.new, 2);
        assert_eq!(stats.contacted, 1);
        assert_eq!(stats.converted, 1);
    }
}
