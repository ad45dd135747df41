//! Driving port for teacher score entry.

use async_trait::async_trait;

use crate::domain::{Error, NumericInput, ScoreRow, Session, StudentId, SubjectId};

/// Score use-cases for teachers.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreBook: Send + Sync {
    /// Every subject with the student's score, `None` where unscored.
    async fn scores_for_student(
        &self,
        session: &Session,
        student: StudentId,
    ) -> Result<Vec<ScoreRow>, Error>;

    /// Insert or replace one score.
    async fn record_score(
        &self,
        session: &Session,
        student: StudentId,
        subject: SubjectId,
        score: Option<NumericInput>,
    ) -> Result<(), Error>;
}
