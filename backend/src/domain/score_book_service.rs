//! Teacher score entry and per-student score views.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{RepositoryError, ScoreBook, ScoreRepository};
use crate::domain::{
    Error, NumericInput, ScoreRow, ScoreValue, Session, StudentId, SubjectId, WriteGate,
};

const SCORE_TARGET_MISSING: &str = "student or subject not found";

fn storage_error(err: RepositoryError) -> Error {
    err.into_domain("score already exists", SCORE_TARGET_MISSING)
}

/// Score book backed by a [`ScoreRepository`].
#[derive(Clone)]
pub struct ScoreBookService<S> {
    scores: Arc<S>,
    gate: WriteGate,
}

impl<S> ScoreBookService<S> {
    /// Create a service over `scores`.
    pub fn new(scores: Arc<S>, gate: WriteGate) -> Self {
        Self { scores, gate }
    }
}

#[async_trait]
impl<S> ScoreBook for ScoreBookService<S>
where
    S: ScoreRepository,
{
    async fn scores_for_student(
        &self,
        session: &Session,
        student: StudentId,
    ) -> Result<Vec<ScoreRow>, Error> {
        session.require_teacher()?;
        self.scores
            .scores_for_student(student)
            .await
            .map_err(storage_error)
    }

    async fn record_score(
        &self,
        session: &Session,
        student: StudentId,
        subject: SubjectId,
        score: Option<NumericInput>,
    ) -> Result<(), Error> {
        session.require_teacher()?;
        self.gate.ensure_writable()?;
        let value = ScoreValue::parse(score.as_ref())?;
        self.scores
            .upsert(student, subject, value)
            .await
            .map_err(storage_error)?;
        info!(student_id = %student, subject_id = %subject, "score recorded");
        Ok(())
    }
}
