//! Tests for the subject handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use super::*;
use crate::domain::{Error, SubjectId, WriteGate};
use crate::inbound::http::test_utils::{MockPorts, cookie_for, teacher, test_app};

fn subject(id: i64, code: &str, name: &str) -> Subject {
    Subject {
        id: SubjectId::new(id).expect("valid id"),
        subject_code: code.into(),
        subject_name: name.into(),
        credits: 3,
    }
}

#[actix_web::test]
async fn choices_route_is_not_captured_as_an_id() {
    let mut ports = MockPorts::default();
    ports.subjects.expect_choices().times(1).return_once(|_| {
        Ok(vec![SubjectChoice::from(&subject(
            1,
            "CS101",
            "Intro to Computing",
        ))])
    });
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/subjects/choices")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body[0]["id"], 1);
    assert_eq!(body[0]["label"], "CS101 - Intro to Computing");
}

#[actix_web::test]
async fn create_accepts_string_credits() {
    let mut ports = MockPorts::default();
    ports
        .subjects
        .expect_create()
        .withf(|_, draft| {
            draft.subject_code == "MA201"
                && draft.credits == Some(NumericInput::Text("4".into()))
        })
        .times(1)
        .return_once(|_, _| Ok(SubjectId::new(5).expect("valid id")));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/subjects")
            .cookie(cookie)
            .set_json(json!({
                "subjectCode": "MA201",
                "subjectName": "Calculus",
                "credits": "4"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["id"], 5);
    assert_eq!(body["message"], "subject MA201 created");
}

#[actix_web::test]
async fn duplicate_code_is_conflict() {
    let mut ports = MockPorts::default();
    ports
        .subjects
        .expect_create()
        .return_once(|_, _| Err(Error::conflict("subject code already exists")));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/subjects")
            .cookie(cookie)
            .set_json(json!({ "subjectCode": "CS101", "subjectName": "Again" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "subject code already exists");
}

#[actix_web::test]
async fn list_on_replica_reports_read_only_banner() {
    let mut ports = MockPorts::default();
    ports
        .subjects
        .expect_list()
        .return_once(|_| Ok(vec![subject(1, "CS101", "Intro to Computing")]));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::closed()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/subjects")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(body["node"]["role"], "replica");
    assert_eq!(body["node"]["writable"], false);
    assert_eq!(body["subjects"][0]["subjectCode"], "CS101");
}

#[actix_web::test]
async fn missing_subject_is_not_found() {
    let mut ports = MockPorts::default();
    ports
        .subjects
        .expect_get()
        .return_once(|_, _| Err(Error::not_found("subject not found")));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/subjects/99")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
