//! Tests for HTTP error mapping.

use super::*;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("login required"), StatusCode::UNAUTHORIZED)]
#[case(Error::forbidden("teachers only"), StatusCode::FORBIDDEN)]
#[case(Error::read_only_node("replica"), StatusCode::FORBIDDEN)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::conflict("subject code already exists"), StatusCode::CONFLICT)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn response_body(error: &Error) -> (StatusCode, Option<String>, Value) {
    let response = ResponseError::error_response(error);
    let status = response.status();
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let body = serde_json::from_slice(&bytes).expect("error JSON");
    (status, header, body)
}

#[rstest]
#[actix_web::test]
async fn internal_errors_are_redacted(expected_trace_id: String) {
    let error = Error::internal("database error: syntax")
        .with_trace_id(expected_trace_id.clone())
        .with_details(json!({"secret": "x"}));

    let (status, header, body) = response_body(&error).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header.as_deref(), Some(expected_trace_id.as_str()));
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["message"], REDACTED_MESSAGE);
    assert_eq!(body["traceId"], expected_trace_id.as_str());
    assert!(body.get("details").is_none());
}

#[rstest]
#[actix_web::test]
async fn read_only_refusal_keeps_its_code() {
    let error = Error::read_only_node(crate::domain::READ_ONLY_MESSAGE);

    let (status, header, body) = response_body(&error).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(header.is_none());
    assert_eq!(body["code"], "read_only_node");
    assert_eq!(body["message"], crate::domain::READ_ONLY_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn validation_details_are_passed_through() {
    let error = Error::invalid_request("credits must be a positive integer")
        .with_details(json!({"field": "credits", "code": "credits_not_positive"}));

    let (status, _, body) = response_body(&error).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "credits");
}

#[rstest]
#[case(actix_web::error::ErrorBadRequest("boom"), ErrorCode::InvalidRequest, MALFORMED_MESSAGE)]
#[case(actix_web::error::ErrorPayloadTooLarge("big"), ErrorCode::InvalidRequest, MALFORMED_MESSAGE)]
#[case(actix_web::error::ErrorInternalServerError("boom"), ErrorCode::InternalError, REDACTED_MESSAGE)]
fn actix_errors_are_promoted_without_their_text(
    #[case] source: actix_web::Error,
    #[case] code: ErrorCode,
    #[case] message: &str,
) {
    let err = Error::from(source);

    assert_eq!(err.code(), code);
    assert_eq!(err.message(), message);
    assert_eq!(err.details(), None);
}
