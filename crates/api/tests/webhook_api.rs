//! Integration tests for the lead capture webhook's HTTP contract.
//!
//! The webhook promises its caller a fixed envelope: a 200 with
//! `{"success": true, ...}` on capture, and a 500 with
//! `{"success": false, "error": ...}` for anything it cannot process.
//! These tests drive the full middleware stack with an unreachable
//! database pool, so both the parse-failure and store-failure paths are
//! covered without a live server or database.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json, post_raw};
use serde_json::json;

// ---------------------------------------------------------------------------
// Test: GET /api/webhook/lead is a liveness probe
// ---------------------------------------------------------------------------

#[tokio::test]
async fn webhook_get_reports_active() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = get(app, "/api/webhook/lead").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["message"], "Lead capture webhook is active");
}

// ---------------------------------------------------------------------------
// Test: malformed JSON body yields the generic failure envelope, not a
// framework 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn malformed_body_returns_fixed_failure_envelope() {
    let app = common::build_test_app(common::unreachable_pool());
    let response = post_raw(app, "/api/webhook/lead", "{not json at all").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to process webhook");
}

// ---------------------------------------------------------------------------
// Test: undecodable tool-call arguments yield the same generic envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_tool_call_arguments_return_failure_envelope() {
    let app = common::build_test_app(common::unreachable_pool());
    let body = json!({
        "message": {
            "toolCalls": [{
                "function": {
                    "name": "capture_lead",
                    "arguments": "{\"caller_name\": broken",
                }
            }]
        }
    });
    let response = post_json(app, "/api/webhook/lead", body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Failed to process webhook");
}

// ---------------------------------------------------------------------------
// Test: a well-formed payload that fails to store reports the store error
// through the failure envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_returns_failure_envelope_with_detail() {
    let app = common::build_test_app(common::unreachable_pool());
    let body = json!({ "caller_name": "Jean", "phone_number": "555-1234" });
    let response = post_json(app, "/api/webhook/lead", body).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    // The detail comes from the store layer, so it is not the generic
    // parse-failure message.
    assert!(json["error"].is_string());
    assert_ne!(json["error"], "Failed to process webhook");
}
