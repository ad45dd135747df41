//! Port for looking up login accounts.

use async_trait::async_trait;

use crate::domain::{Role, StudentId};

use super::RepositoryError;

/// Stored login account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountRecord {
    /// Login name (unique).
    pub username: String,
    /// Stored password value; see [`crate::domain::password`].
    pub password: String,
    /// Account role.
    pub role: Role,
    /// Linked student record for student accounts.
    pub student_id: Option<StudentId>,
}

/// Read access to the `users` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Fetch the account with exactly this username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountRecord>, RepositoryError>;
}
