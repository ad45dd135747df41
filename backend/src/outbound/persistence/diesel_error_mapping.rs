//! Diesel and connection error mapping shared by every MySQL repository.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::RepositoryError;

use super::connection::ConnectError;

/// Map a failed connect into a connection error.
pub(crate) fn map_connect_error(error: ConnectError) -> RepositoryError {
    debug!(%error, "database connect failed");
    match error {
        ConnectError::Establish { message } => RepositoryError::connection(message),
        ConnectError::InvalidSettings { message } => RepositoryError::query(message),
    }
}

/// Map Diesel errors into repository errors.
///
/// Unique and foreign-key violations keep the constraint name (or the server
/// message when MySQL does not report one) for the logs; services choose the
/// wording callers see.
pub(crate) fn map_diesel_error(error: DieselError) -> RepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RepositoryError::conflict(info.constraint_name().unwrap_or_else(|| info.message()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RepositoryError::missing_reference(info.constraint_name().unwrap_or_else(|| info.message()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RepositoryError::connection("database connection error")
        }
        DieselError::NotFound => RepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => RepositoryError::query("database query error"),
        _ => RepositoryError::query("database error"),
    }
}
