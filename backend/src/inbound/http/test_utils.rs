//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, test, web};

use crate::domain::ports::{
    MockLoginService, MockOwnProfile, MockScoreBook, MockStudentRoster, MockSubjectCatalogue,
};
use crate::domain::{Error, NodeInfo, Session, StudentId, WriteGate};
use crate::inbound::http::api_routes;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::session_config::SESSION_COOKIE_NAME;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::inbound::http::validation::{json_config, path_config};

const TEST_SESSION_ROUTE: &str = "/__test/session";

/// Session middleware with a fresh key and the `Secure` flag off so cookies
/// survive plain-HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_secure(false)
        .build()
}

/// The session cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// One mock per driving port. Unset expectations panic when called, so a
/// test that leaves a port untouched also proves it was never reached.
pub struct MockPorts {
    pub login: MockLoginService,
    pub students: MockStudentRoster,
    pub subjects: MockSubjectCatalogue,
    pub scores: MockScoreBook,
    pub own_profile: MockOwnProfile,
}

impl Default for MockPorts {
    fn default() -> Self {
        Self {
            login: MockLoginService::new(),
            students: MockStudentRoster::new(),
            subjects: MockSubjectCatalogue::new(),
            scores: MockScoreBook::new(),
            own_profile: MockOwnProfile::new(),
        }
    }
}

impl MockPorts {
    /// Freeze the mocks into handler state for a node behind `gate`.
    pub fn into_state(self, gate: WriteGate) -> HttpState {
        HttpState::new(
            HttpStatePorts {
                login: Arc::new(self.login),
                students: Arc::new(self.students),
                subjects: Arc::new(self.subjects),
                scores: Arc::new(self.scores),
                own_profile: Arc::new(self.own_profile),
            },
            NodeInfo::from(gate),
        )
    }
}

/// The API under `/api/v1` plus a route that stores any posted [`Session`],
/// so tests can act as a given caller without going through login.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .app_data(json_config())
        .app_data(path_config())
        .wrap(test_session_middleware())
        .service(
            web::scope("/api/v1")
                .route(
                    TEST_SESSION_ROUTE,
                    web::post().to(
                        |session: SessionContext, body: web::Json<Session>| async move {
                            session.persist(&body)?;
                            Ok::<_, Error>(HttpResponse::NoContent().finish())
                        },
                    ),
                )
                .configure(api_routes),
        )
}

/// Cookie carrying `session` for use on later requests to `app`.
pub async fn cookie_for<S, B>(app: &S, session: &Session) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let request = test::TestRequest::post()
        .uri(&format!("/api/v1{TEST_SESSION_ROUTE}"))
        .set_json(session)
        .to_request();
    let response = test::call_service(app, request).await;
    session_cookie(&response)
}

/// A logged-in teacher.
pub fn teacher() -> Session {
    Session::Teacher {
        username: "gv01".into(),
    }
}

/// A logged-in student linked to record `id`.
pub fn student(id: i64) -> Session {
    Session::Student {
        username: format!("sv{id:02}"),
        student_id: StudentId::new(id).expect("valid student id"),
    }
}
