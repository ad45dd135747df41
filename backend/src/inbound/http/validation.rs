//! Request-shape validation shared by the HTTP handlers.
//!
//! Malformed JSON bodies and non-numeric path segments are rejected with the
//! same `invalid_request` payload as domain validation failures, instead of
//! Actix's plain-text defaults.

use actix_web::{HttpRequest, error::JsonPayloadError, error::PathError, web};
use serde_json::json;

use crate::domain::{Error, StudentId, SubjectId};

fn body_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("request body is not valid JSON for this endpoint")
        .with_details(json!({ "code": "invalid_body", "reason": err.to_string() }))
        .into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request("path identifiers must be positive integers")
        .with_details(json!({ "code": "invalid_path", "reason": err.to_string() }))
        .into()
}

/// JSON extractor configuration mapping failures to domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(body_error)
}

/// Path extractor configuration mapping failures to domain errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

/// Parse a student id path segment.
pub(crate) fn student_id(raw: i64) -> Result<StudentId, Error> {
    StudentId::new(raw).map_err(Error::from)
}

/// Parse a subject id path segment.
pub(crate) fn subject_id(raw: i64) -> Result<SubjectId, Error> {
    SubjectId::new(raw).map_err(Error::from)
}
