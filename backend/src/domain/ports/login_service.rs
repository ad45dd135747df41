//! Driving port for login.
//!
//! Inbound adapters call it with validated credentials and store the returned
//! [`Session`] without knowing where accounts live, which keeps HTTP handler
//! tests free of persistence.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Session};

/// Authentication use-case.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and describe the resulting session.
    ///
    /// Unknown users and wrong passwords are indistinguishable to callers.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, Error>;
}
