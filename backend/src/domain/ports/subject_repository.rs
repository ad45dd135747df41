//! Port for subject persistence.

use async_trait::async_trait;

use crate::domain::{Subject, SubjectDefinition, SubjectId};

use super::RepositoryError;

/// Storage for subject rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    /// All subjects ordered by id.
    async fn list(&self) -> Result<Vec<Subject>, RepositoryError>;

    /// One subject by id.
    async fn find(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError>;

    /// Insert a subject. A taken code is a [`RepositoryError::Conflict`].
    async fn create(&self, definition: &SubjectDefinition) -> Result<SubjectId, RepositoryError>;

    /// Overwrite a subject; `false` when the id does not exist.
    async fn update(
        &self,
        id: SubjectId,
        definition: &SubjectDefinition,
    ) -> Result<bool, RepositoryError>;

    /// Delete a subject; its scores cascade. `false` when the id does not exist.
    async fn delete(&self, id: SubjectId) -> Result<bool, RepositoryError>;
}
