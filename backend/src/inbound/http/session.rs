//! Handler-side view of the login cookie.
//!
//! Wraps the Actix cookie session so handlers deal only in the domain
//! [`Session`] variant: persist it after login, read it back per request and
//! purge it on logout.

use actix_session::Session as CookieSession;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Session};

pub(crate) const SESSION_KEY: &str = "gradebook_session";

/// Extractor giving handlers the caller's [`Session`].
#[derive(Clone)]
pub struct SessionContext(CookieSession);

impl SessionContext {
    /// Wrap an Actix cookie session.
    pub fn new(session: CookieSession) -> Self {
        Self(session)
    }

    /// Store the authenticated session, replacing any previous one.
    pub fn persist(&self, session: &Session) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(SESSION_KEY, session)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// The caller's session; absent or unreadable cookies are anonymous.
    pub fn current(&self) -> Session {
        match self.0.get::<Session>(SESSION_KEY) {
            Ok(Some(session)) => session,
            Ok(None) => Session::Unauthenticated,
            Err(error) => {
                warn!(%error, "discarding unreadable session cookie");
                Session::Unauthenticated
            }
        }
    }

    /// Forget the caller entirely.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = CookieSession::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
