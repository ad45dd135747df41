//! Account-backed implementation of the [`LoginService`] driving port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::password::{PasswordCheck, verify_password};
use crate::domain::ports::{AccountRecord, AccountRepository, LoginService};
use crate::domain::{Error, LoginCredentials, Role, Session};

const INVALID_CREDENTIALS: &str = "invalid username or password";
const UNLINKED_STUDENT: &str = "student account is not linked to a student record";

/// Verifies credentials against stored accounts.
#[derive(Clone)]
pub struct AccountLoginService<A> {
    accounts: Arc<A>,
}

impl<A> AccountLoginService<A> {
    /// Create a service reading from `accounts`.
    pub fn new(accounts: Arc<A>) -> Self {
        Self { accounts }
    }
}

fn session_for(account: AccountRecord) -> Result<Session, Error> {
    match (account.role, account.student_id) {
        (Role::Teacher, _) => Ok(Session::Teacher {
            username: account.username,
        }),
        (Role::Student, Some(student_id)) => Ok(Session::Student {
            username: account.username,
            student_id,
        }),
        (Role::Student, None) => Err(Error::forbidden(UNLINKED_STUDENT)),
    }
}

#[async_trait]
impl<A> LoginService for AccountLoginService<A>
where
    A: AccountRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Session, Error> {
        let account = self
            .accounts
            .find_by_username(credentials.username())
            .await
            .map_err(|err| err.into_domain("duplicate account", "account not found"))?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        match verify_password(&account.password, credentials.password()) {
            PasswordCheck::Match => {}
            PasswordCheck::LegacyMatch => {
                warn!(username = %account.username, "plaintext password accepted; rotate it");
            }
            PasswordCheck::Mismatch => return Err(Error::unauthorized(INVALID_CREDENTIALS)),
        }

        let session = session_for(account)?;
        info!(
            username = session.username().unwrap_or_default(),
            role = ?session.role(),
            "login succeeded"
        );
        Ok(session)
    }
}
