//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn base_error() -> Error {
    Error::invalid_request("bad")
}

#[rstest]
fn invalid_request_constructor_sets_code(base_error: Error) {
    assert_eq!(base_error.code(), ErrorCode::InvalidRequest);
    assert_eq!(base_error.message(), "bad");
}

#[rstest]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("exists"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
fn convenience_constructors_set_codes(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_empty_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyMessage)));
}

#[rstest]
fn new_substitutes_blank_messages() {
    let error = Error::new(ErrorCode::InternalError, "");
    assert!(!error.message().trim().is_empty());
}

#[rstest]
fn try_with_trace_id_rejects_empty_values(base_error: Error) {
    let result = base_error.try_with_trace_id("   ");
    assert!(matches!(result, Err(ErrorValidationError::EmptyTraceId)));
}

#[rstest]
fn new_returns_none_when_trace_id_out_of_scope() {
    let error = Error::internal("boom");
    assert!(error.trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn new_captures_trace_id_in_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("fixture is a valid UUID");
    let error = TraceId::scope(trace_id, async move { Error::conflict("already there") }).await;

    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_skips_empty_fields(base_error: Error) {
    let value = serde_json::to_value(base_error.with_trace_id("abc")).expect("serialise");
    assert_eq!(
        value,
        json!({"code": "invalid_request", "message": "bad", "traceId": "abc"})
    );
}

#[rstest]
fn deserialise_rejects_blank_messages() {
    let payload = json!({"code": "not_found", "message": " "});
    let result: Result<Error, _> = serde_json::from_value(payload);
    assert!(result.is_err());
}

#[rstest]
fn deserialise_round_trips_details() {
    let payload = json!({
        "code": "invalid_request",
        "message": "bad",
        "details": {"field": "name"}
    });
    let error: Error = serde_json::from_value(payload).expect("valid payload");
    assert_eq!(error.details(), Some(&json!({"field": "name"})));
    assert!(error.trace_id().is_none());
}
