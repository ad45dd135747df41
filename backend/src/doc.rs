//! OpenAPI document for the gradebook API.
//!
//! [`ApiDoc`] lists every `/api/v1` handler and both health probes. Domain
//! types are described through the mirror types in
//! [`schemas`](crate::inbound::http::schemas) so the domain stays free of
//! utoipa. Debug builds serve the document through Swagger UI; the
//! `openapi-dump` binary prints it.

use crate::inbound::http::auth::{LoginRequest, SessionResponse};
use crate::inbound::http::messages::{CreatedResponse, MessageResponse};
use crate::inbound::http::profile::{OwnScoresResponse, ProfileRequest, ProfileResponse};
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, NodeInfoSchema, NodeRoleSchema, ScoreRowSchema, StudentSchema,
    SubjectChoiceSchema, SubjectSchema,
};
use crate::inbound::http::scores::{ScoreRequest, ScoreViewResponse};
use crate::inbound::http::students::{CreateStudentRequest, StudentListResponse, StudentRequest};
use crate::inbound::http::subjects::{SubjectListResponse, SubjectRequest};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `session` cookie as the `SessionCookie` security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// Route and schema registry for the gradebook API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Gradebook backend API",
        description = "Role-gated student, subject and score management over a primary or replica MySQL node."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::current_session,
        crate::inbound::http::node::node_info,
        crate::inbound::http::students::list_students,
        crate::inbound::http::students::get_student,
        crate::inbound::http::students::create_student,
        crate::inbound::http::students::update_student,
        crate::inbound::http::students::delete_student,
        crate::inbound::http::subjects::list_subjects,
        crate::inbound::http::subjects::subject_choices,
        crate::inbound::http::subjects::get_subject,
        crate::inbound::http::subjects::create_subject,
        crate::inbound::http::subjects::update_subject,
        crate::inbound::http::subjects::delete_subject,
        crate::inbound::http::scores::student_scores,
        crate::inbound::http::scores::record_score,
        crate::inbound::http::profile::own_profile,
        crate::inbound::http::profile::update_own_profile,
        crate::inbound::http::profile::own_scores,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        NodeRoleSchema,
        NodeInfoSchema,
        StudentSchema,
        SubjectSchema,
        SubjectChoiceSchema,
        ScoreRowSchema,
        LoginRequest,
        SessionResponse,
        MessageResponse,
        CreatedResponse,
        StudentRequest,
        CreateStudentRequest,
        StudentListResponse,
        SubjectRequest,
        SubjectListResponse,
        ScoreRequest,
        ScoreViewResponse,
        ProfileRequest,
        ProfileResponse,
        OwnScoresResponse,
    )),
    tags(
        (name = "auth", description = "Login, logout and session inspection"),
        (name = "node", description = "Local node role and write permission"),
        (name = "students", description = "Teacher management of student records"),
        (name = "subjects", description = "Teacher management of the subject catalogue"),
        (name = "scores", description = "Teacher score entry and per-student score view"),
        (name = "profile", description = "Student self-service"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
