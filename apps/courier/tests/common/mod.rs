#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use serde_json::Value;

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    courier_test_support::logging::init();
}

/// Check that the trace_id in the response body matches the X-Trace-Id header
pub fn assert_trace_id_matches(json: &Value, header_trace_id: &str) {
    let trace_id_in_body = json["trace_id"]
        .as_str()
        .expect("trace_id field should be a string");
    assert_eq!(
        trace_id_in_body, header_trace_id,
        "trace_id in body should match X-Trace-Id header"
    );
}

/// Validate that a response follows the ProblemDetails structure and that
/// trace_id matches the X-Trace-Id header. Returns the parsed body.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
    expected_detail: Option<&str>,
) -> Value {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("X-Trace-Id header should be present and valid UTF-8");
    assert!(!trace_id.is_empty(), "X-Trace-Id header should not be empty");

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let body = test::read_body(resp).await;
    let json: Value = serde_json::from_slice(&body).expect("problem body should be JSON");

    assert_eq!(json["code"], expected_code);
    assert_eq!(json["status"], expected_status);
    assert_eq!(
        json["type"],
        format!("https://courier.local/errors/{expected_code}")
    );
    assert!(json["title"].as_str().is_some_and(|t| !t.is_empty()));
    if let Some(detail) = expected_detail {
        assert_eq!(json["detail"], detail);
    }
    assert_trace_id_matches(&json, trace_id);

    json
}
