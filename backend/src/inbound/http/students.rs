//! Teacher endpoints for student records.
//!
//! ```text
//! GET    /api/v1/students
//! POST   /api/v1/students
//! GET    /api/v1/students/{id}
//! PUT    /api/v1/students/{id}
//! DELETE /api/v1/students/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::EnrolStudentRequest;
use crate::domain::{NodeInfo, Student, StudentDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::messages::{CreatedResponse, MessageResponse};
use crate::inbound::http::schemas::{ErrorSchema, NodeInfoSchema, StudentSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::student_id;

/// Student profile fields.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentRequest {
    /// Required.
    #[schema(example = "Nguyen Van A")]
    pub full_name: String,
    /// Optional class label.
    #[schema(example = "10A")]
    #[serde(default)]
    pub class_name: Option<String>,
    /// Optional email.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional `YYYY-MM-DD`.
    #[schema(example = "2008-04-30")]
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Optional postal address.
    #[serde(default)]
    pub address: Option<String>,
}

impl From<StudentRequest> for StudentDraft {
    fn from(value: StudentRequest) -> Self {
        Self {
            full_name: value.full_name,
            class_name: value.class_name,
            email: value.email,
            date_of_birth: value.date_of_birth,
            address: value.address,
        }
    }
}

/// New student plus the credentials of their login account.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    /// Required.
    #[schema(example = "Nguyen Van A")]
    pub full_name: String,
    /// Optional class label.
    #[serde(default)]
    pub class_name: Option<String>,
    /// Optional email.
    #[serde(default)]
    pub email: Option<String>,
    /// Optional `YYYY-MM-DD`.
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Optional postal address.
    #[serde(default)]
    pub address: Option<String>,
    /// Login name; must be unique.
    #[schema(example = "sv07")]
    pub username: String,
    /// Initial password.
    pub password: String,
}

impl From<CreateStudentRequest> for EnrolStudentRequest {
    fn from(value: CreateStudentRequest) -> Self {
        Self {
            profile: StudentDraft {
                full_name: value.full_name,
                class_name: value.class_name,
                email: value.email,
                date_of_birth: value.date_of_birth,
                address: value.address,
            },
            username: value.username,
            password: value.password,
        }
    }
}

/// Student table with the serving node.
#[derive(Serialize, utoipa::ToSchema)]
pub struct StudentListResponse {
    /// Node that served the read.
    #[schema(value_type = NodeInfoSchema)]
    pub node: NodeInfo,
    /// Students ordered by id.
    #[schema(value_type = Vec<StudentSchema>)]
    pub students: Vec<Student>,
}

/// List all students.
#[utoipa::path(
    get,
    path = "/api/v1/students",
    responses(
        (status = 200, description = "Students", body = StudentListResponse),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Teachers only", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "listStudents"
)]
#[get("/students")]
pub async fn list_students(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<StudentListResponse>> {
    let students = state.students.list(&session.current()).await?;
    Ok(web::Json(StudentListResponse {
        node: state.node.clone(),
        students,
    }))
}

/// Fetch one student.
#[utoipa::path(
    get,
    path = "/api/v1/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student", body = StudentSchema),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 403, description = "Teachers only", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "getStudent"
)]
#[get("/students/{id}")]
pub async fn get_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<Student>> {
    let id = student_id(path.into_inner())?;
    let student = state.students.get(&session.current(), id).await?;
    Ok(web::Json(student))
}

/// Create a student and their login account.
#[utoipa::path(
    post,
    path = "/api/v1/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Created", body = CreatedResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 403, description = "Teachers only or read-only node", body = ErrorSchema),
        (status = 409, description = "Username already exists", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "createStudent"
)]
#[post("/students")]
pub async fn create_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateStudentRequest>,
) -> ApiResult<HttpResponse> {
    let request = EnrolStudentRequest::from(payload.into_inner());
    let id = state.students.enrol(&session.current(), &request).await?;
    Ok(HttpResponse::Created().json(CreatedResponse {
        id: id.get(),
        message: format!("student {id} created with account {}", request.username.trim()),
    }))
}

/// Replace a student's profile.
#[utoipa::path(
    put,
    path = "/api/v1/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentRequest,
    responses(
        (status = 200, description = "Updated", body = MessageResponse),
        (status = 400, description = "Invalid input", body = ErrorSchema),
        (status = 403, description = "Teachers only or read-only node", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "updateStudent"
)]
#[put("/students/{id}")]
pub async fn update_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
    payload: web::Json<StudentRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = student_id(path.into_inner())?;
    let draft = StudentDraft::from(payload.into_inner());
    state.students.update(&session.current(), id, &draft).await?;
    Ok(web::Json(MessageResponse::new(format!("student {id} updated"))))
}

/// Delete a student with their scores and account.
#[utoipa::path(
    delete,
    path = "/api/v1/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Deleted", body = MessageResponse),
        (status = 403, description = "Teachers only or read-only node", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["students"],
    operation_id = "deleteStudent"
)]
#[delete("/students/{id}")]
pub async fn delete_student(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<i64>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = student_id(path.into_inner())?;
    state.students.delete(&session.current(), id).await?;
    Ok(web::Json(MessageResponse::new(format!("student {id} deleted"))))
}

#[cfg(test)]
mod tests;
