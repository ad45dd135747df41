//! Student self-service: own profile and own scores.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{OwnProfile, RepositoryError, ScoreRepository, StudentRepository};
use crate::domain::{
    Error, PersonalDetails, PersonalDetailsDraft, ScoreRow, Session, Student, WriteGate,
};

const RECORD_MISSING: &str = "student record not found";

fn storage_error(err: RepositoryError) -> Error {
    err.into_domain("profile conflicts with existing data", RECORD_MISSING)
}

/// Own-profile use-cases over student and score repositories.
#[derive(Clone)]
pub struct OwnProfileService<S, C> {
    students: Arc<S>,
    scores: Arc<C>,
    gate: WriteGate,
}

impl<S, C> OwnProfileService<S, C> {
    /// Create a service over the given repositories.
    pub fn new(students: Arc<S>, scores: Arc<C>, gate: WriteGate) -> Self {
        Self {
            students,
            scores,
            gate,
        }
    }
}

#[async_trait]
impl<S, C> OwnProfile for OwnProfileService<S, C>
where
    S: StudentRepository,
    C: ScoreRepository,
{
    async fn profile(&self, session: &Session) -> Result<Student, Error> {
        let id = session.require_student()?;
        self.students
            .find(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::not_found(RECORD_MISSING))
    }

    async fn update_profile(
        &self,
        session: &Session,
        draft: &PersonalDetailsDraft,
    ) -> Result<(), Error> {
        let id = session.require_student()?;
        self.gate.ensure_writable()?;
        let details = PersonalDetails::try_from_draft(draft)?;
        let updated = self
            .students
            .update_personal_details(id, &details)
            .await
            .map_err(storage_error)?;
        if !updated {
            return Err(Error::not_found(RECORD_MISSING));
        }
        info!(student_id = %id, "student updated own profile");
        Ok(())
    }

    async fn scores(&self, session: &Session) -> Result<Vec<ScoreRow>, Error> {
        let id = session.require_student()?;
        self.scores
            .scores_for_student(id)
            .await
            .map_err(storage_error)
    }
}
