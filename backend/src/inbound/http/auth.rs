//! Login, logout and session inspection.
//!
//! ```text
//! POST /api/v1/login   {"username":"gv01","password":"..."}
//! POST /api/v1/logout
//! GET  /api/v1/session
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{LoginCredentials, LoginValidationError, Role, Session};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Account name.
    #[schema(example = "gv01")]
    pub username: String,
    /// Account password.
    pub password: String,
}

impl TryFrom<&LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: &LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

/// Who is logged in on this cookie.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    /// Whether a login is active.
    pub authenticated: bool,
    /// Login name.
    #[schema(example = "sv07")]
    pub username: Option<String>,
    /// `teacher` or `student`.
    #[schema(example = "student")]
    pub role: Option<String>,
    /// Linked student record, for student logins.
    #[schema(example = 7)]
    pub student_id: Option<i32>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            authenticated: session.is_authenticated(),
            username: session.username().map(str::to_owned),
            role: session.role().map(|role| Role::as_str(role).to_owned()),
            student_id: session.student_id().map(|id| id.get()),
        }
    }
}

/// Authenticate and establish a session.
///
/// Any failure clears the caller's previous session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing credentials", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 403, description = "Student account without a student record", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionResponse>> {
    let attempt = match LoginCredentials::try_from(&*payload) {
        Ok(credentials) => state.login.authenticate(&credentials).await,
        Err(err) => Err(err.into()),
    };
    // A failed attempt logs out whoever held the cookie before.
    let authenticated = attempt.inspect_err(|_| session.clear())?;
    session.persist(&authenticated)?;
    Ok(web::Json(SessionResponse::from(&authenticated)))
}

/// Forget the current session.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    if let Some(username) = session.current().username() {
        info!(username, "logout");
    }
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Describe the current session; anonymous callers are not an error.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses((status = 200, description = "Current session", body = SessionResponse)),
    tags = ["auth"],
    operation_id = "currentSession",
    security([])
)]
#[get("/session")]
pub async fn current_session(session: SessionContext) -> web::Json<SessionResponse> {
    web::Json(SessionResponse::from(&session.current()))
}
