//! Teacher score endpoints.
//!
//! ```text
//! GET /api/v1/students/{id}/scores
//! PUT /api/v1/students/{id}/scores/{subject_id}   {"score": 8.5}
//! ```

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{NodeInfo, NumericInput, ScoreRow};
use crate::inbound::http::ApiResult;
use crate::inbound::http::messages::MessageResponse;
use crate::inbound::http::schemas::{ErrorSchema, NodeInfoSchema, ScoreRowSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{student_id, subject_id};

/// Score entry body. A number or numeric string in `[0, 10]`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ScoreRequest {
    /// Required.
    #[schema(value_type = f64, example = 8.5)]
    #[serde(default)]
    pub score: Option<NumericInput>,
}

/// One student's scores across every subject.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScoreViewResponse {
    /// Node that served the read.
    #[schema(value_type = NodeInfoSchema)]
    pub node: NodeInfo,
    /// Student whose scores are listed.
    pub student_id: i32,
    /// Every subject ordered by id; unscored subjects have `score: null`.
    #[schema(value_type = Vec<ScoreRowSchema>)]
    pub scores: Vec<ScoreRow>,
}

/// Score view for a student.
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}/scores",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Scores", body = ScoreViewResponse),
        (status = 403, description = "Teachers only", body = ErrorSchema)
    ),
    tags = ["scores"],
    operation_id = "studentScores"
)]
#[get("/students/{id}/scores")]
pub async fn student_scores(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<ScoreViewResponse>> {
    let id = student_id(path.into_inner())?;
    let scores = state.scores.scores_for_student(&session.current(), id).await?;
    Ok(web::Json(ScoreViewResponse {
        node: state.node.clone(),
        student_id: id.get(),
        scores,
    }))
}

/// Insert or replace one score.
#[utoipa::path(
    put,
    path = "/api/v1/students/{id}/scores/{subject_id}",
    params(
        ("id" = i64, Path, description = "Student id"),
        ("subject_id" = i64, Path, description = "Subject id")
    ),
    request_body = ScoreRequest,
    responses(
        (status = 200, description = "Recorded", body = MessageResponse),
        (status = 400, description = "Invalid score", body = ErrorSchema),
        (status = 403, description = "Teachers only or read-only node", body = ErrorSchema),
        (status = 404, description = "Student or subject not found", body = ErrorSchema)
    ),
    tags = ["scores"],
    operation_id = "recordScore"
)]
#[put("/students/{id}/scores/{subject_id}")]
pub async fn record_score(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(i64, i64)>,
    payload: web::Json<ScoreRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let (raw_student, raw_subject) = path.into_inner();
    let student = student_id(raw_student)?;
    let subject = subject_id(raw_subject)?;
    state
        .scores
        .record_score(&session.current(), student, subject, payload.into_inner().score)
        .await?;
    Ok(web::Json(MessageResponse::new(format!(
        "score saved for student {student}, subject {subject}"
    ))))
}
