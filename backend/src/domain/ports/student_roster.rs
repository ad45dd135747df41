//! Driving port for teacher-managed student records.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Error, Session, Student, StudentDraft, StudentId};

/// Input for creating a student together with their login account.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct EnrolStudentRequest {
    /// Profile fields.
    pub profile: StudentDraft,
    /// Login name for the new `student` account.
    pub username: String,
    /// Initial password; hashed before storage.
    pub password: String,
}

impl fmt::Debug for EnrolStudentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnrolStudentRequest")
            .field("profile", &self.profile)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Student management use-cases. Every operation requires a teacher session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentRoster: Send + Sync {
    /// All students ordered by id.
    async fn list(&self, session: &Session) -> Result<Vec<Student>, Error>;

    /// One student, or `not_found`.
    async fn get(&self, session: &Session, id: StudentId) -> Result<Student, Error>;

    /// Create a student and a linked `student` account in one transaction.
    async fn enrol(
        &self,
        session: &Session,
        request: &EnrolStudentRequest,
    ) -> Result<StudentId, Error>;

    /// Replace every profile field.
    async fn update(
        &self,
        session: &Session,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<(), Error>;

    /// Remove a student together with their scores and account.
    async fn delete(&self, session: &Session, id: StudentId) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let request = EnrolStudentRequest {
            username: "sv07".into(),
            password: "hunter2".into(),
            ..EnrolStudentRequest::default()
        };
        let rendered = format!("{request:?}");
        assert!(rendered.contains("sv07"));
        assert!(!rendered.contains("hunter2"));
    }
}
