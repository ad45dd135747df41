//! Domain primitives, use-case services and their ports.
//!
//! Purpose: Define strongly typed values for the gradebook (students,
//! subjects, scores), the caller's [`Session`] and the node's [`WriteGate`],
//! plus the services that combine them. Types are immutable once validated
//! and document their invariants and serialisation contracts in Rustdoc.
//!
//! Public surface:
//! - [`Error`] and [`ErrorCode`]: what every service returns.
//! - [`Session`]: who is calling, with the role guards.
//! - [`WriteGate`]: whether this node accepts writes.

pub mod auth;
pub mod error;
pub mod login_service;
pub mod node;
pub mod numeric_input;
pub mod own_profile_service;
pub mod password;
pub mod ports;
pub mod score;
pub mod score_book_service;
pub mod student;
pub mod student_roster_service;
pub mod subject;
pub mod subject_catalogue_service;
pub mod trace_id;

pub use self::auth::{LoginCredentials, LoginValidationError, Role, Session};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::login_service::AccountLoginService;
pub use self::node::{NodeInfo, NodeRole, NodeRoleParseError, READ_ONLY_MESSAGE, WriteGate};
pub use self::numeric_input::NumericInput;
pub use self::own_profile_service::OwnProfileService;
pub use self::score::{MAX_SCORE, MIN_SCORE, ScoreRow, ScoreValidationError, ScoreValue};
pub use self::score_book_service::ScoreBookService;
pub use self::student::{
    BIRTH_DATE_FORMAT, BirthDateInput, PersonalDetails, PersonalDetailsDraft, Student,
    StudentDraft, StudentId, StudentProfile, StudentValidationError,
};
pub use self::student_roster_service::StudentRosterService;
pub use self::subject::{
    Credits, DEFAULT_CREDITS, Subject, SubjectChoice, SubjectDefinition, SubjectDraft, SubjectId,
    SubjectValidationError,
};
pub use self::subject_catalogue_service::SubjectCatalogueService;
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use gradebook::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
