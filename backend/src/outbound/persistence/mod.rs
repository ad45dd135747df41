//! MySQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the domain repository
//! ports backed by MySQL through `diesel-async`.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Guards, the write-gate and validation live in the
//!   services.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **One connection per call**: [`MysqlConnector`] opens a connection for
//!   each operation and drops it afterwards. There is no pool.
//! - **Strongly typed errors**: Diesel errors are mapped to
//!   [`RepositoryError`](crate::domain::ports::RepositoryError) in one
//!   place.
//!
//! # Example
//!
//! ```no_run
//! use gradebook::outbound::persistence::{DbSettings, DieselSubjectRepository, MysqlConnector};
//!
//! let settings = DbSettings::new("localhost", "distributed_db");
//! let connector = MysqlConnector::new(&settings).expect("valid settings");
//! let subjects = DieselSubjectRepository::new(connector);
//! # let _ = subjects;
//! ```

mod connection;
mod diesel_account_repository;
mod diesel_error_mapping;
mod diesel_score_repository;
mod diesel_student_repository;
mod diesel_subject_repository;
mod models;
mod schema;

pub use connection::{ConnectError, DbSettings, MysqlConnector};
pub use diesel_account_repository::DieselAccountRepository;
pub use diesel_score_repository::DieselScoreRepository;
pub use diesel_student_repository::DieselStudentRepository;
pub use diesel_subject_repository::DieselSubjectRepository;

diesel::define_sql_function! {
    /// MySQL `LAST_INSERT_ID()` for the current connection.
    fn last_insert_id() -> diesel::sql_types::Unsigned<diesel::sql_types::BigInt>;
}
