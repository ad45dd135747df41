//! Driving port for the subject catalogue.

use async_trait::async_trait;

use crate::domain::{Error, Session, Subject, SubjectChoice, SubjectDraft, SubjectId};

/// Subject management use-cases. Every operation requires a teacher session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectCatalogue: Send + Sync {
    /// All subjects ordered by id.
    async fn list(&self, session: &Session) -> Result<Vec<Subject>, Error>;

    /// One subject, or `not_found`.
    async fn get(&self, session: &Session, id: SubjectId) -> Result<Subject, Error>;

    /// Picker entries for the score form.
    async fn choices(&self, session: &Session) -> Result<Vec<SubjectChoice>, Error>;

    /// Add a subject; a taken code is a `conflict`.
    async fn create(&self, session: &Session, draft: &SubjectDraft) -> Result<SubjectId, Error>;

    /// Replace a subject's fields.
    async fn update(
        &self,
        session: &Session,
        id: SubjectId,
        draft: &SubjectDraft,
    ) -> Result<(), Error>;

    /// Remove a subject and its scores.
    async fn delete(&self, session: &Session, id: SubjectId) -> Result<(), Error>;
}
