//! Teacher endpoints for the subject catalogue.
//!
//! ```text
//! GET    /api/v1/subjects
//! POST   /api/v1/subjects
//! GET    /api/v1/subjects/choices
//! GET    /api/v1/subjects/{id}
//! PUT    /api/v1/subjects/{id}
//! DELETE /api/v1/subjects/{id}
//! ```
//!
//! `choices` must be registered before `{id}` so it is not parsed as an id.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{NodeInfo, NumericInput, Subject, SubjectChoice, SubjectDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::messages::{CreatedResponse, MessageResponse};
use crate::inbound::http::schemas::{
    ErrorSchema, NodeInfoSchema, SubjectChoiceSchema, SubjectSchema,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::subject_id;

/// Subject fields. `credits` accepts a number or a numeric string.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRequest {
    /// Required, unique.
    #[schema(example = "CS101")]
    pub subject_code: String,
    /// Required.
    #[schema(example = "Intro to Computing")]
    pub subject_name: String,
    /// Optional positive integer; defaults to 3.
    #[schema(value_type = Option<i32>, example = 3)]
    #[serde(default)]
    pub credits: Option<NumericInput>,
}

impl From<SubjectRequest> for SubjectDraft {
    fn from(value: SubjectRequest) -> Self {
        Self {
            subject_code: value.subject_code,
            subject_name: value.subject_name,
            credits: value.credits,
        }
    }
}

/// Subject table with the serving node.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubjectListResponse {
    /// Node that served the read.
    #[schema(value_type = NodeInfoSchema)]
    pub node: NodeInfo,
    /// Subjects ordered by id.
    #[schema(value_type = Vec<SubjectSchema>)]
    pub subjects: Vec<Subject>,
}

/// List all subjects.
#[utoipa::path(
    get,
    path = "/api/v1/subjects",
    responses(
        (status = 200, description = "Subjects", body = SubjectListResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Teachers only", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "listSubjects"
)]
#[get("/subjects")]
pub async fn list_subjects(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SubjectListResponse>> {
    let subjects = state.subjects.list(&session.current()).await?;
    Ok(web::Json(SubjectListResponse {
        node: state.node.clone(),
        subjects,
    }))
}

/// Picker entries for the score form.
#[utoipa::path(
    get,
    path = "/api/v1/subjects/choices",
    responses(
        (status = 200, description = "Subject choices", body = [SubjectChoiceSchema]),
        (status = 403, description = "Teachers only", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "subjectChoices"
)]
#[get("/subjects/choices")]
pub async fn subject_choices(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<SubjectChoice>>> {
    Ok(web::Json(state.subjects.choices(&session.current()).await?))
}

/// Fetch one subject.
#[utoipa::path(
    get,
    path = "/api/v1/subjects/{id}",
    params(("id" = i64, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Subject", body = SubjectSchema),
        (status = 403, description = "Teachers only", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "getSubject"
)]
#[get("/subjects/{id}")]
pub async fn get_subject(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Subject>> {
    let id = subject_id(path.into_inner())?;
    Ok(web::Json(state.subjects.get(&session.current(), id).await?))
}

/// Add a subject.
#[utoipa::path(
    post,
    path = "/api/v1/subjects",
    request_body = SubjectRequest,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 403, description = "Teachers only or read-only node", body = ErrorSchema),
        (status = 409, description = "Subject code already exists", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "createSubject"
)]
#[post("/subjects")]
pub async fn create_subject(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<SubjectRequest>,
) -> ApiResult<HttpResponse> {
    let draft = SubjectDraft::from(payload.into_inner());
    let id = state.subjects.create(&session.current(), &draft).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        id: id.get(),
        message: format!("subject {} created", draft.subject_code.trim()),
    }))
}

/// Replace a subject's fields.
#[utoipa::path(
    put,
    path = "/api/v1/subjects/{id}",
    params(("id" = i64, Path, description = "Subject id")),
    request_body = SubjectRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 403, description = "Teachers only or read-only node", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Subject code already exists", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "updateSubject"
)]
#[put("/subjects/{id}")]
pub async fn update_subject(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<SubjectRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = subject_id(path.into_inner())?;
    let draft = SubjectDraft::from(payload.into_inner());
    state.subjects.update(&session.current(), id, &draft).await?;
    Ok(web::Json(MessageResponse::new(format!("subject {id} updated"))))
}

/// Delete a subject and its scores.
#[utoipa::path(
    delete,
    path = "/api/v1/subjects/{id}",
    params(("id" = i64, Path, description = "Subject id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Teachers only or read-only node", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["subjects"],
    operation_id = "deleteSubject"
)]
#[delete("/subjects/{id}")]
pub async fn delete_subject(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = subject_id(path.into_inner())?;
    state.subjects.delete(&session.current(), id).await?;
    Ok(web::Json(MessageResponse::new(format!("subject {id} deleted"))))
}

#[cfg(test)]
mod tests;
