//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and register under the domain
//! type's name, so handler DTOs can point at them with `value_type`.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Login is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Logged in with the wrong role.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The node is a read-only replica.
    #[schema(rename = "read_only_node")]
    ReadOnlyNode,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A unique value is already taken.
    #[schema(rename = "conflict")]
    Conflict,
    /// The database could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "score must be between 0 and 10")]
    message: String,
    /// Request correlation id, also sent as the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level details for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::NodeRole`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NodeRole)]
pub enum NodeRoleSchema {
    /// Accepts writes.
    #[schema(rename = "primary")]
    Primary,
    /// Read-only.
    #[schema(rename = "replica")]
    Replica,
}

/// OpenAPI schema for [`crate::domain::NodeInfo`].
#[derive(ToSchema)]
#[schema(as = crate::domain::NodeInfo, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct NodeInfoSchema {
    /// Local role.
    role: NodeRoleSchema,
    /// Whether writes are accepted.
    writable: bool,
    /// Banner text.
    #[schema(example = "data served by the local PRIMARY node")]
    description: String,
}

/// OpenAPI schema for [`crate::domain::Student`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Student, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct StudentSchema {
    /// Primary key.
    #[schema(example = 7)]
    id: i32,
    /// Display name.
    #[schema(example = "Nguyen Van A")]
    full_name: String,
    /// Class label.
    #[schema(example = "10A")]
    class_name: Option<String>,
    /// Contact email.
    email: Option<String>,
    /// `YYYY-MM-DD`.
    #[schema(example = "2008-04-30", format = Date)]
    date_of_birth: Option<String>,
    /// Postal address.
    address: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Subject`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Subject, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct SubjectSchema {
    /// Primary key.
    id: i32,
    /// Unique code.
    #[schema(example = "CS101")]
    subject_code: String,
    /// Display name.
    #[schema(example = "Intro to Computing")]
    subject_name: String,
    /// Credit count.
    #[schema(example = 3)]
    credits: i32,
}

/// OpenAPI schema for [`crate::domain::SubjectChoice`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SubjectChoice)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct SubjectChoiceSchema {
    /// Subject id to submit.
    id: i32,
    /// Display label.
    #[schema(example = "CS101 - Intro to Computing")]
    label: String,
}

/// OpenAPI schema for [`crate::domain::ScoreRow`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ScoreRow, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ScoreRowSchema {
    /// Subject key.
    subject_id: i32,
    /// Subject code.
    subject_code: String,
    /// Subject name.
    subject_name: String,
    /// Subject credits.
    credits: i32,
    /// `null` when unscored.
    #[schema(example = 8.5)]
    score: Option<f64>,
}
