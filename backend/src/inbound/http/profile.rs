//! Student self-service endpoints. The student id always comes from the
//! session cookie.
//!
//! ```text
//! GET /api/v1/me/profile
//! PUT /api/v1/me/profile
//! GET /api/v1/me/scores
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{NodeInfo, PersonalDetailsDraft, ScoreRow, Student};
use crate::inbound::http::ApiResult;
use crate::inbound::http::messages::MessageResponse;
use crate::inbound::http::schemas::{ErrorSchema, NodeInfoSchema, ScoreRowSchema, StudentSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Editable profile fields. There is no class field; unknown keys such as
/// `className` are rejected.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProfileRequest {
    /// Required.
    pub full_name: String,
    /// Optional email.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Optional postal address.
    #[serde(default)]
    pub address: Option<String>,
}

impl From<ProfileRequest> for PersonalDetailsDraft {
    fn from(value: ProfileRequest) -> Self {
        Self {
            full_name: value.full_name,
            email: value.email,
            date_of_birth: value.date_of_birth,
            address: value.address,
        }
    }
}

/// The caller's own record with the serving node.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    /// Node that served the read.
    #[schema(value_type = NodeInfoSchema)]
    pub node: NodeInfo,
    /// Own student record.
    #[schema(value_type = StudentSchema)]
    pub student: Student,
}

/// The caller's own scores with the serving node.
#[derive(Serialize, utoipa::ToSchema)]
pub struct OwnScoresResponse {
    /// Node that served the read.
    #[schema(value_type = NodeInfoSchema)]
    pub node: NodeInfo,
    /// Every subject ordered by id; unscored subjects have `score: null`.
    #[schema(value_type = Vec<ScoreRowSchema>)]
    pub scores: Vec<ScoreRow>,
}

/// Load the caller's profile.
#[utoipa::path(
    get,
    path = "/api/v1/me/profile",
    responses(
        (status = 200, description = "Own profile", body = ProfileResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Students only", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "ownProfile"
)]
#[get("/me/profile")]
pub async fn own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let student = state.own_profile.profile(&session.current()).await?;
    Ok(web::Json(ProfileResponse {
        node: state.node.clone(),
        student,
    }))
}

/// Update name, email, birth date and address.
#[utoipa::path(
    put,
    path = "/api/v1/me/profile",
    request_body = ProfileRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 403, description = "Students only or read-only node", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "updateOwnProfile"
)]
#[put("/me/profile")]
pub async fn update_own_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ProfileRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let draft = PersonalDetailsDraft::from(payload.into_inner());
    state
        .own_profile
        .update_profile(&session.current(), &draft)
        .await?;
    Ok(web::Json(MessageResponse::new("profile updated")))
}

/// The caller's scores.
#[utoipa::path(
    get,
    path = "/api/v1/me/scores",
    responses(
        (status = 200, description = "Own scores", body = OwnScoresResponse),
        (status = 403, description = "Students only", body = ErrorSchema)
    ),
    tags = ["profile"],
    operation_id = "ownScores"
)]
#[get("/me/scores")]
pub async fn own_scores(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<OwnScoresResponse>> {
    let scores = state.own_profile.scores(&session.current()).await?;
    Ok(web::Json(OwnScoresResponse {
        node: state.node.clone(),
        scores,
    }))
}

#[cfg(test)]
mod tests;
