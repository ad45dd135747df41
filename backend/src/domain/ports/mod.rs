//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `StudentRoster`, `SubjectCatalogue`,
//! `ScoreBook`, `OwnProfile`) are called by inbound adapters. Driven ports
//! (the `*Repository` traits) are implemented by outbound adapters and share
//! one [`RepositoryError`].

mod macros;
pub(crate) use macros::define_port_error;

mod account_repository;
mod login_service;
mod own_profile;
mod repository_error;
mod score_book;
mod score_repository;
mod student_repository;
mod student_roster;
mod subject_catalogue;
mod subject_repository;

#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountRecord, AccountRepository};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use own_profile::MockOwnProfile;
pub use own_profile::OwnProfile;
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use score_book::MockScoreBook;
pub use score_book::ScoreBook;
#[cfg(test)]
pub use score_repository::MockScoreRepository;
pub use score_repository::ScoreRepository;
#[cfg(test)]
pub use student_repository::MockStudentRepository;
pub use student_repository::{NewStudentAccount, StudentRepository};
#[cfg(test)]
pub use student_roster::MockStudentRoster;
pub use student_roster::{EnrolStudentRequest, StudentRoster};
#[cfg(test)]
pub use subject_catalogue::MockSubjectCatalogue;
pub use subject_catalogue::SubjectCatalogue;
#[cfg(test)]
pub use subject_repository::MockSubjectRepository;
pub use subject_repository::SubjectRepository;
