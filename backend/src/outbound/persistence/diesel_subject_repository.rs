//! MySQL-backed subject repository.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::{AsyncMysqlConnection, RunQueryDsl};

use crate::domain::ports::{RepositoryError, SubjectRepository};
use crate::domain::{Subject, SubjectDefinition, SubjectId};

use super::connection::MysqlConnector;
use super::diesel_error_mapping::{map_connect_error, map_diesel_error};
use super::last_insert_id;
use super::models::{SubjectDefinitionRow, SubjectRow, inserted_id};
use super::schema::subjects;

/// Diesel-backed implementation of [`SubjectRepository`].
#[derive(Clone)]
pub struct DieselSubjectRepository {
    connector: MysqlConnector,
}

impl DieselSubjectRepository {
    /// Create a repository that connects through `connector`.
    pub fn new(connector: MysqlConnector) -> Self {
        Self { connector }
    }

    async fn connect(&self) -> Result<AsyncMysqlConnection, RepositoryError> {
        self.connector.connect().await.map_err(map_connect_error)
    }
}

async fn subject_exists(
    conn: &mut AsyncMysqlConnection,
    id: SubjectId,
) -> Result<bool, RepositoryError> {
    diesel::select(exists(subjects::table.find(id.get())))
        .get_result::<bool>(conn)
        .await
        .map_err(map_diesel_error)
}

#[async_trait]
impl SubjectRepository for DieselSubjectRepository {
    async fn list(&self) -> Result<Vec<Subject>, RepositoryError> {
        let mut conn = self.connect().await?;
        let rows = subjects::table
            .select(SubjectRow::as_select())
            .order(subjects::id.asc())
            .load::<SubjectRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Subject::try_from).collect()
    }

    async fn find(&self, id: SubjectId) -> Result<Option<Subject>, RepositoryError> {
        let mut conn = self.connect().await?;
        let row = subjects::table
            .find(id.get())
            .select(SubjectRow::as_select())
            .first::<SubjectRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Subject::try_from).transpose()
    }

    async fn create(&self, definition: &SubjectDefinition) -> Result<SubjectId, RepositoryError> {
        let mut conn = self.connect().await?;
        diesel::insert_into(subjects::table)
            .values(&SubjectDefinitionRow::from(definition))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        // LAST_INSERT_ID() is scoped to this connection.
        let raw_id = diesel::select(last_insert_id())
            .get_result::<u64>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        SubjectId::new(inserted_id(raw_id)?)
            .map_err(|err| RepositoryError::query(format!("inserted subject id: {err}")))
    }

    async fn update(
        &self,
        id: SubjectId,
        definition: &SubjectDefinition,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.connect().await?;
        let affected = diesel::update(subjects::table.find(id.get()))
            .set(&SubjectDefinitionRow::from(definition))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected > 0 {
            return Ok(true);
        }
        subject_exists(&mut conn, id).await
    }

    async fn delete(&self, id: SubjectId) -> Result<bool, RepositoryError> {
        let mut conn = self.connect().await?;
        let affected = diesel::delete(subjects::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
