//! Error shared by every driven repository port.
//!
//! All repositories talk to the same MySQL database, so they fail in the
//! same ways. Services translate these variants into domain [`Error`]s with
//! [`RepositoryError::into_domain`], supplying the wording for conflicts and
//! missing references that only the use-case knows.
//!
//! [`Error`]: crate::domain::Error

use tracing::debug;

use crate::domain::Error;

use super::define_port_error;

define_port_error! {
    /// Errors raised by repository adapters.
    pub enum RepositoryError {
        /// The database could not be reached.
        Connection { message } =>
            "database connection failed: {message}",
        /// A unique constraint rejected the write.
        Conflict { constraint } =>
            "duplicate value violates {constraint}",
        /// A foreign key pointed at a row that does not exist.
        MissingReference { message } =>
            "referenced row does not exist: {message}",
        /// Any other statement failure.
        Query { message } =>
            "database query failed: {message}",
    }
}

impl RepositoryError {
    /// Translate into a domain error.
    ///
    /// `conflict` and `missing` provide the user-facing wording for the two
    /// outcomes whose meaning depends on the operation.
    pub fn into_domain(self, conflict: &str, missing: &str) -> Error {
        debug!(error = %self, "repository operation failed");
        match self {
            Self::Connection { .. } => Error::service_unavailable("database is unavailable"),
            Self::Conflict { .. } => Error::conflict(conflict),
            Self::MissingReference { .. } => Error::not_found(missing),
            Self::Query { message } => Error::internal(format!("database error: {message}")),
        }
    }
}
