//! The error every service and handler returns.
//!
//! An [`Error`] is a code, a message safe to show the caller, and optionally
//! the request's trace id and structured details. It serialises to the JSON
//! body the HTTP adapter sends; the adapter picks the status from the code.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Failure category, serialised in `snake_case`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Input failed validation.
    InvalidRequest,
    /// No session, or the credentials were wrong.
    Unauthorized,
    /// The session's role may not do this.
    Forbidden,
    /// Writes are refused on a replica.
    ReadOnlyNode,
    /// No row with that id.
    NotFound,
    /// A unique key is already taken.
    Conflict,
    /// MySQL could not be reached.
    ServiceUnavailable,
    /// Anything else; never shown verbatim.
    InternalError,
}

impl ErrorCode {
    /// Wire spelling of the code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid_request",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::ReadOnlyNode => "read_only_node",
            Self::NotFound => "not_found",
            Self::Conflict => "conflict",
            Self::ServiceUnavailable => "service_unavailable",
            Self::InternalError => "internal_error",
        }
    }

    /// Message used when a caller passes a blank one.
    const fn fallback_message(self) -> &'static str {
        match self {
            Self::InvalidRequest => "invalid request",
            Self::Unauthorized => "login required",
            Self::Forbidden => "forbidden",
            Self::ReadOnlyNode => "node is read-only",
            Self::NotFound => "not found",
            Self::Conflict => "conflict",
            Self::ServiceUnavailable => "database unavailable",
            Self::InternalError => "internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned by services and rendered by the HTTP adapter.
///
/// The message is never blank and neither is the trace id when present.
/// Deserialisation enforces both.
///
/// ```
/// use gradebook::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("student 7 not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "student 7 not found");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WireError", into = "WireError")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<String>,
    details: Option<Value>,
}

/// Why [`Error::try_new`] or [`Error::try_with_trace_id`] refused a value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorValidationError {
    /// Blank message.
    #[error("error message must not be empty")]
    EmptyMessage,
    /// Blank trace id.
    #[error("trace identifier must not be empty")]
    EmptyTraceId,
}

fn current_trace_id() -> Option<String> {
    TraceId::current().map(|id| id.to_string())
}

macro_rules! code_constructors {
    ($($name:ident => $code:ident),+ $(,)?) => {
        $(
            #[doc = concat!("An [`ErrorCode::", stringify!($code), "`] error.")]
            pub fn $name(message: impl Into<String>) -> Self {
                Self::new(ErrorCode::$code, message)
            }
        )+
    };
}

impl Error {
    /// Build an error, picking up the trace id in scope.
    ///
    /// A blank message is replaced by a generic one for the code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            code.fallback_message().to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: current_trace_id(),
            details: None,
        }
    }

    /// Like [`Error::new`] but refuses a blank message.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, ErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        Ok(Self::new(code, message))
    }

    code_constructors! {
        invalid_request => InvalidRequest,
        unauthorized => Unauthorized,
        forbidden => Forbidden,
        read_only_node => ReadOnlyNode,
        not_found => NotFound,
        conflict => Conflict,
        service_unavailable => ServiceUnavailable,
        internal => InternalError,
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Text for the caller.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Trace id of the request that failed, if known.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Structured extras, such as per-field validation failures.
    #[must_use]
    pub const fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Replace the trace id. A blank id leaves the current one in place.
    #[must_use]
    pub fn with_trace_id(self, id: impl Into<String>) -> Self {
        match self.try_with_trace_id(id) {
            Ok(updated) => updated,
            Err((unchanged, _)) => unchanged,
        }
    }

    /// Replace the trace id, handing `self` back when `id` is blank.
    pub fn try_with_trace_id(
        mut self,
        id: impl Into<String>,
    ) -> Result<Self, (Self, ErrorValidationError)> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err((self, ErrorValidationError::EmptyTraceId));
        }
        self.trace_id = Some(id);
        Ok(self)
    }

    /// Attach structured details.
    ///
    /// ```
    /// use gradebook::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "credits" }));
    /// assert_eq!(err.details(), Some(&json!({ "field": "credits" })));
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

/// JSON body shape of [`Error`].
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct WireError {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "trace_id")]
    trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl From<Error> for WireError {
    fn from(error: Error) -> Self {
        let Error {
            code,
            message,
            trace_id,
            details,
        } = error;
        Self {
            code,
            message,
            trace_id,
            details,
        }
    }
}

impl TryFrom<WireError> for Error {
    type Error = ErrorValidationError;

    /// Only the payload's own trace id is kept, never the one in scope.
    fn try_from(wire: WireError) -> Result<Self, Self::Error> {
        if wire.message.trim().is_empty() {
            return Err(ErrorValidationError::EmptyMessage);
        }
        if wire.trace_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
            return Err(ErrorValidationError::EmptyTraceId);
        }
        Ok(Self {
            code: wire.code,
            message: wire.message,
            trace_id: wire.trace_id,
            details: wire.details,
        })
    }
}
