//! Port for scores and the per-student score view.

use async_trait::async_trait;

use crate::domain::{ScoreRow, ScoreValue, StudentId, SubjectId};

use super::RepositoryError;

/// Storage for the `scores` table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Insert or replace the score keyed by `(student, subject)`.
    ///
    /// An unknown student or subject is a [`RepositoryError::MissingReference`].
    async fn upsert(
        &self,
        student: StudentId,
        subject: SubjectId,
        score: ScoreValue,
    ) -> Result<(), RepositoryError>;

    /// Every subject ordered by id, with this student's score or `None`.
    async fn scores_for_student(&self, student: StudentId)
    -> Result<Vec<ScoreRow>, RepositoryError>;
}
