//! Tests for the student self-service handlers.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use super::*;
use crate::domain::{Error, StudentId, WriteGate};
use crate::inbound::http::test_utils::{MockPorts, cookie_for, student, teacher, test_app};

#[actix_web::test]
async fn profile_is_read_from_the_session() {
    let mut ports = MockPorts::default();
    ports
        .own_profile
        .expect_profile()
        .withf(|session| session == &student(7))
        .return_once(|_| {
            Ok(Student {
                id: StudentId::new(7).expect("valid id"),
                full_name: "Pham Thi D".into(),
                class_name: Some("12C".into()),
                email: None,
                date_of_birth: None,
                address: None,
            })
        });
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &student(7)).await;

    let body: Value = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/me/profile")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(body["student"]["id"], 7);
    assert_eq!(body["student"]["className"], "12C");
    assert_eq!(body["node"]["role"], "primary");
}

#[actix_web::test]
async fn class_name_cannot_be_submitted() {
    let app =
        actix_test::init_service(test_app(MockPorts::default().into_state(WriteGate::open())))
            .await;
    let cookie = cookie_for(&app, &student(7)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/me/profile")
            .cookie(cookie)
            .set_json(json!({ "fullName": "Pham Thi D", "className": "13Z" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn update_forwards_personal_details() {
    let mut ports = MockPorts::default();
    ports
        .own_profile
        .expect_update_profile()
        .withf(|_, draft| {
            draft.full_name == "Pham Thi D" && draft.address.as_deref() == Some("Hanoi")
        })
        .times(1)
        .return_once(|_, _| Ok(()));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &student(7)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/me/profile")
            .cookie(cookie)
            .set_json(json!({ "fullName": "Pham Thi D", "address": "Hanoi" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn teacher_cannot_use_self_service() {
    let mut ports = MockPorts::default();
    ports.own_profile.expect_scores().return_once(|session| {
        session.require_student()?;
        Ok(Vec::new())
    });
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::open()))).await;
    let cookie = cookie_for(&app, &teacher()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/me/scores")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn replica_refuses_profile_update() {
    let mut ports = MockPorts::default();
    ports
        .own_profile
        .expect_update_profile()
        .return_once(|_, _| Err(Error::read_only_node(crate::domain::READ_ONLY_MESSAGE)));
    let app = actix_test::init_service(test_app(ports.into_state(WriteGate::closed()))).await;
    let cookie = cookie_for(&app, &student(7)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/api/v1/me/profile")
            .cookie(cookie)
            .set_json(json!({ "fullName": "Pham Thi D" }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "read_only_node");
}
