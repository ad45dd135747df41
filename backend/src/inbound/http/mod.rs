//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod error;
pub mod health;
pub mod messages;
pub mod node;
pub mod profile;
pub mod schemas;
pub mod scores;
pub mod session;
pub mod session_config;
pub mod state;
pub mod students;
pub mod subjects;
#[cfg(test)]
pub mod test_utils;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every `/api/v1` handler on `cfg`.
///
/// Literal segments precede their `{id}` siblings so that
/// `/subjects/choices` is never captured as a subject id.
pub fn api_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(auth::current_session)
        .service(node::node_info)
        .service(students::list_students)
        .service(students::create_student)
        .service(scores::student_scores)
        .service(scores::record_score)
        .service(students::get_student)
        .service(students::update_student)
        .service(students::delete_student)
        .service(subjects::list_subjects)
        .service(subjects::create_subject)
        .service(subjects::subject_choices)
        .service(subjects::get_subject)
        .service(subjects::update_subject)
        .service(subjects::delete_subject)
        .service(profile::own_profile)
        .service(profile::update_own_profile)
        .service(profile::own_scores);
}
