//! Driving port for student self-service.
//!
//! The student id always comes from the session, never from the request.

use async_trait::async_trait;

use crate::domain::{Error, PersonalDetailsDraft, ScoreRow, Session, Student};

/// Use-cases available to a logged-in student.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OwnProfile: Send + Sync {
    /// The caller's student record.
    async fn profile(&self, session: &Session) -> Result<Student, Error>;

    /// Edit name, email, birth date and address. Class is not editable.
    async fn update_profile(
        &self,
        session: &Session,
        draft: &PersonalDetailsDraft,
    ) -> Result<(), Error>;

    /// The caller's score view.
    async fn scores(&self, session: &Session) -> Result<Vec<ScoreRow>, Error>;
}
