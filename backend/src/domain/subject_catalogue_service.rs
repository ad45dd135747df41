//! Teacher-facing subject management.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{RepositoryError, SubjectCatalogue, SubjectRepository};
use crate::domain::{
    Error, Session, Subject, SubjectChoice, SubjectDefinition, SubjectDraft, SubjectId, WriteGate,
};

const SUBJECT_NOT_FOUND: &str = "subject not found";
const CODE_TAKEN: &str = "subject code already exists";

/// Subject catalogue backed by a [`SubjectRepository`].
#[derive(Clone)]
pub struct SubjectCatalogueService<S> {
    subjects: Arc<S>,
    gate: WriteGate,
}

impl<S> SubjectCatalogueService<S> {
    /// Create a service over `subjects`.
    pub fn new(subjects: Arc<S>, gate: WriteGate) -> Self {
        Self { subjects, gate }
    }
}

fn storage_error(err: RepositoryError) -> Error {
    err.into_domain(CODE_TAKEN, SUBJECT_NOT_FOUND)
}

fn found(affected: bool) -> Result<(), Error> {
    if affected {
        Ok(())
    } else {
        Err(Error::not_found(SUBJECT_NOT_FOUND))
    }
}

#[async_trait]
impl<S> SubjectCatalogue for SubjectCatalogueService<S>
where
    S: SubjectRepository,
{
    async fn list(&self, session: &Session) -> Result<Vec<Subject>, Error> {
        session.require_teacher()?;
        self.subjects.list().await.map_err(storage_error)
    }

    async fn get(&self, session: &Session, id: SubjectId) -> Result<Subject, Error> {
        session.require_teacher()?;
        self.subjects
            .find(id)
            .await
            .map_err(storage_error)?
            .ok_or_else(|| Error::not_found(SUBJECT_NOT_FOUND))
    }

    async fn choices(&self, session: &Session) -> Result<Vec<SubjectChoice>, Error> {
        let subjects = self.list(session).await?;
        Ok(subjects.iter().map(SubjectChoice::from).collect())
    }

    async fn create(&self, session: &Session, draft: &SubjectDraft) -> Result<SubjectId, Error> {
        session.require_teacher()?;
        self.gate.ensure_writable()?;
        let definition = SubjectDefinition::try_from_draft(draft)?;
        let id = self
            .subjects
            .create(&definition)
            .await
            .map_err(storage_error)?;
        info!(subject_id = %id, code = definition.subject_code(), "subject created");
        Ok(id)
    }

    async fn update(
        &self,
        session: &Session,
        id: SubjectId,
        draft: &SubjectDraft,
    ) -> Result<(), Error> {
        session.require_teacher()?;
        self.gate.ensure_writable()?;
        let definition = SubjectDefinition::try_from_draft(draft)?;
        found(
            self.subjects
                .update(id, &definition)
                .await
                .map_err(storage_error)?,
        )?;
        info!(subject_id = %id, "subject updated");
        Ok(())
    }

    async fn delete(&self, session: &Session, id: SubjectId) -> Result<(), Error> {
        session.require_teacher()?;
        self.gate.ensure_writable()?;
        found(self.subjects.delete(id).await.map_err(storage_error)?)?;
        info!(subject_id = %id, "subject deleted");
        Ok(())
    }
}
