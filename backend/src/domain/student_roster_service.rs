//! Teacher-facing student management.
//!
//! Each mutation runs the same sequence: teacher guard, write gate, input
//! validation, then exactly one repository call. Failing any step leaves the
//! repository untouched.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::password::hash_password;
use crate::domain::ports::{
    EnrolStudentRequest, NewStudentAccount, RepositoryError, StudentRepository, StudentRoster,
};
use crate::domain::{
    Error, LoginCredentials, Session, Student, StudentDraft, StudentId, StudentProfile, WriteGate,
};

const STUDENT_NOT_FOUND: &str = "student not found";
const USERNAME_TAKEN: &str = "username already exists";

/// Student roster backed by a [`StudentRepository`].
#[derive(Clone)]
pub struct StudentRosterService<S> {
    students: Arc<S>,
    gate: WriteGate,
}

impl<S> StudentRosterService<S> {
    /// Create a service over `students`, refusing writes when `gate` is closed.
    pub fn new(students: Arc<S>, gate: WriteGate) -> Self {
        Self { students, gate }
    }
}

fn storage_error(err: RepositoryError) -> Error {
    err.into_domain(USERNAME_TAKEN, STUDENT_NOT_FOUND)
}

fn found(updated: bool) -> Result<(), Error> {
    if updated {
        Ok(())
    } else {
        Err(Error::not_found(STUDENT_NOT_FOUND))
    }
}

#[async_trait]
impl<S> StudentRoster for StudentRosterService<S>
where
    S: StudentRepository,
{
    async fn list(&self, session: &Session) -> Result<Vec<Student>, Error> {
        session.require_teacher()?;
        self.students.list().await.map_err(storage_error)
    }

    async fn get(&self, session: &Session, id: StudentId) -> Result<Student, Error> {
        session.require_teacher()?;
        self.students
            .find(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::not_found(STUDENT_NOT_FOUND))
    }

    async fn enrol(
        &self,
        session: &Session,
        request: &EnrolStudentRequest,
    ) -> Result<StudentId, Error> {
        session.require_teacher()?;
        self.gate.ensure_writable()?;
        let profile = StudentProfile::try_from_draft(&request.profile)?;
        let credentials = LoginCredentials::try_from_parts(&request.username, &request.password)?;
        let account = NewStudentAccount {
            username: credentials.username().to_owned(),
            password_hash: hash_password(credentials.password())
                .map_err(|err| Error::internal(err.to_string()))?,
        };

        let id = self
            .students
            .create_with_account(&profile, &account)
            .await
            .map_err(storage_error)?;
        info!(student_id = %id, username = %account.username, "student enrolled");
        Ok(id)
    }

    async fn update(
        &self,
        session: &Session,
        id: StudentId,
        draft: &StudentDraft,
    ) -> Result<(), Error> {
        session.require_teacher()?;
        self.gate.ensure_writable()?;
        let profile = StudentProfile::try_from_draft(draft)?;
        found(
            self.students
                .update(id, &profile)
                .await
                .map_err(storage_error)?,
        )?;
        info!(student_id = %id, "student updated");
        Ok(())
    }

    async fn delete(&self, session: &Session, id: StudentId) -> Result<(), Error> {
        session.require_teacher()?;
        self.gate.ensure_writable()?;
        found(self.students.delete(id).await.map_err(storage_error)?)?;
        info!(student_id = %id, "student deleted");
        Ok(())
    }
}
