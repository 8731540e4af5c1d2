//! Lead capture webhook.
//!
//! The voice platform POSTs here whenever the assistant fires its
//! `capture_lead` tool. The body is parsed by hand rather than with the
//! `Json` extractor: the caller expects a fixed `{ "success": ... }`
//! envelope with a 500 status for anything it cannot process, never the
//! framework's 400/422 rejections.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use voyagent_core::types::DbId;
use voyagent_db::models::lead::NewLead;
use voyagent_db::repositories::lead_repo::LeadRepo;

use crate::state::AppState;

/// GET liveness probe, used by the voice platform's webhook check.
pub async fn webhook_status() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Lead capture webhook is active",
    }))
}

/// POST handler: normalize the payload, insert the lead, and answer
/// with the webhook envelope.
pub async fn capture_lead(State(state): State<AppState>, body: Bytes) -> Response {
    let lead_fields = match serde_json::from_slice::<Value>(&body)
        .ok()
        .as_ref()
        .and_then(lead_payload)
    {
        Some(fields) => fields,
        None => {
            tracing::warn!("Webhook payload could not be processed");
            return failure("Failed to process webhook");
        }
    };

    let new = NewLead::from_payload(&lead_fields);
    match LeadRepo::create(&state.pool, &new).await {
        Ok(lead) => {
            tracing::info!(lead_id = %lead.id, caller_name = %lead.caller_name, "Lead captured");
            Json(success_body(&lead.caller_name, lead.id)).into_response()
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to store lead");
            failure(&err.to_string())
        }
    }
}

/// The envelope the voice platform expects on a successful capture.
///
/// The name echoed back is the stored (normalized) one, so a defaulted
/// lead confirms as `Unknown`, not as whatever the payload held.
fn success_body(caller_name: &str, lead_id: DbId) -> Value {
    json!({
        "success": true,
        "message": format!("Lead captured successfully for {caller_name}"),
        "lead_id": lead_id,
    })
}

fn failure(detail: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": detail })),
    )
        .into_response()
}

/// Locate the lead fields inside a webhook body.
///
/// The platform wraps tool invocations as `message.toolCalls[]`, each
/// carrying `function.name` and `function.arguments`; arguments arrive
/// either as a JSON object or as a JSON-encoded string. A body with no
/// `capture_lead` invocation (or no wrapper at all) is treated as the
/// lead fields themselves, which is what manual curl tests send.
/// Returns `None` only when a `capture_lead` call is present but its
/// arguments cannot be decoded.
fn lead_payload(body: &Value) -> Option<Value> {
    let capture = body
        .pointer("/message/toolCalls")
        .and_then(Value::as_array)
        .and_then(|calls| {
            calls.iter().find(|call| {
                call.pointer("/function/name").and_then(Value::as_str) == Some("capture_lead")
            })
        });

    let Some(capture) = capture else {
        return Some(body.clone());
    };

    match capture.pointer("/function/arguments")? {
        obj @ Value::Object(_) => Some(obj.clone()),
        Value::String(raw) => serde_json::from_str(raw).ok(),
        _ => None,
    }
}
