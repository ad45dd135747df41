//! Tests for the student handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::NaiveDate;
use mockall::predicate::eq;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::{Error, StudentId, WriteGate};
use crate::inbound::http::test_utils::{MockPorts, cookie_for, student, teacher, test_app};

fn sample_student(id: i64) -> Student {
    Student {
        id: StudentId::new(id).expect("valid id"),
        full_name: "Nguyen Van A".into(),
        class_name: Some("10A".into()),
        email: Some("a@example.com".into()),
        date_of_birth: NaiveDate::from_ymd_opt(2008, 4, 30),
        address: None,
    }
}

#[actix_web::test]
async fn list_includes_node_banner() {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_list()
        .times(1)
        .return_once(|_| Ok(vec![sample_student(1), sample_student(2)]));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/students")
        .cookie(cookie)
        .to_request();
    let body: Value = actix_test::call_and_read_body_json(&app, request).await;

    assert_eq!(body["node"]["role"], "primary");
    assert_eq!(body["node"]["writable"], true);
    let students = body["students"].as_array().expect("students array");
    assert_eq!(students.len(), 2);
    assert_eq!(students[0]["fullName"], "Nguyen Van A");
    assert_eq!(students[0]["dateOfBirth"], "2008-04-30");
    assert_eq!(students[0]["address"], Value::Null);
}

#[actix_web::test]
async fn anonymous_list_is_unauthorised() {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_list()
        .withf(|session| !session.is_authenticated())
        .return_once(|session| {
            session.require_teacher()?;
            Ok(Vec::new())
        });
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/students")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_returns_created_id() {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_enrol()
        .withf(|session, request| {
            session == &teacher()
                && request.username == "sv09"
                && request.profile.full_name == "Tran Thi B"
                && request.profile.class_name.as_deref() == Some("11B")
        })
        .times(1)
        .return_once(|_, _| Ok(StudentId::new(9).expect("valid id")));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/students")
            .cookie(cookie)
            .set_json(json!({
                "fullName": "Tran Thi B",
                "className": "11B",
                "username": "sv09",
                "password": "pw"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], 9);
}

#[actix_web::test]
async fn replica_refusal_surfaces_as_read_only_node() {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_delete()
        .return_once(|_, _| WriteGate::closed().ensure_writable());
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::closed()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/v1/students/3")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "read_only_node");
}

#[actix_web::test]
async fn update_passes_path_id_and_body() {
    let mut ports = MockPorts::default();
    ports
        .students
        .expect_update()
        .with(
            eq(teacher()),
            eq(StudentId::new(4).expect("valid id")),
            mockall::predicate::function(|draft: &StudentDraft| {
                draft.full_name == "Le Van C" && draft.email.is_none()
            }),
        )
        .times(1)
        .return_once(|_, _, _| Ok(()));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/students/4")
            .cookie(cookie)
            .set_json(json!({ "fullName": "Le Van C" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "student 4 updated");
}

#[actix_web::test]
async fn student_session_is_forbidden() {
    let mut ports = MockPorts::default();
    ports.students.expect_get().return_once(|session, _| {
        session.require_teacher()?;
        Err(Error::internal("unreachable"))
    });
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &student(7)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/students/7")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[case("/api/v1/students/0")]
#[case("/api/v1/students/-1")]
#[case("/api/v1/students/abc")]
#[actix_web::test]
async fn invalid_ids_never_reach_the_port(#[case] uri: &str) {
    let app =
        actix_test::init_service(test_app(MockPorts::default().into_state(WriteGate::open())))
            .await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(uri)
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn malformed_body_is_invalid_request() {
    let app =
        actix_test::init_service(test_app(MockPorts::default().into_state(WriteGate::open())))
            .await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/students")
            .cookie(cookie)
            .insert_header(("content-type", "application/json"))
            .set_payload("{\"fullName\":")
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["details"]["code"], "invalid_body");
}
