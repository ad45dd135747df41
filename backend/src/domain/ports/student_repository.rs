//! Port for student persistence.
//!
//! Update and delete return `false` when no row has the given id so services
//! can report `not_found` without treating it as a storage failure.

use async_trait::async_trait;

use crate::domain::{PersonalDetails, Student, StudentId, StudentProfile};

use super::RepositoryError;

/// Login account created together with a student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudentAccount {
    /// Login name; must be unique.
    pub username: String,
    /// Already-hashed password value.
    pub password_hash: String,
}

/// Storage for student rows and their linked accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students ordered by id.
    async fn list(&self) -> Result<Vec<Student>, RepositoryError>;

    /// One student by id.
    async fn find(&self, id: StudentId) -> Result<Option<Student>, RepositoryError>;

    /// Insert a student and its `student` role account atomically.
    ///
    /// A duplicate username surfaces as [`RepositoryError::Conflict`] and
    /// leaves no student row behind.
    async fn create_with_account(
        &self,
        profile: &StudentProfile,
        account: &NewStudentAccount,
    ) -> Result<StudentId, RepositoryError>;

    /// Overwrite every profile column.
    async fn update(
        &self,
        id: StudentId,
        profile: &StudentProfile,
    ) -> Result<bool, RepositoryError>;

    /// Overwrite the student-editable subset, leaving `class_name` alone.
    async fn update_personal_details(
        &self,
        id: StudentId,
        details: &PersonalDetails,
    ) -> Result<bool, RepositoryError>;

    /// Delete a student; scores and the linked account cascade.
    async fn delete(&self, id: StudentId) -> Result<bool, RepositoryError>;
}
