//! MySQL-backed scores and the per-student score view.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Double, Integer};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RepositoryError, ScoreRepository};
use crate::domain::{ScoreRow, ScoreValue, StudentId, SubjectId};

use super::connection::MysqlConnector;
use super::diesel_error_mapping::{map_connect_error, map_diesel_error};
use super::models::ScoreViewRow;
use super::schema::{scores, subjects};

const UPSERT_SQL: &str = r"
INSERT INTO scores (student_id, subject_id, score)
VALUES (?, ?, ?)
ON DUPLICATE KEY UPDATE score = VALUES(score)
";

/// Diesel-backed implementation of [`ScoreRepository`].
#[derive(Clone)]
pub struct DieselScoreRepository {
    connector: MysqlConnector,
}

impl DieselScoreRepository {
    /// Create a repository that connects through `connector`.
    pub fn new(connector: MysqlConnector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl ScoreRepository for DieselScoreRepository {
    async fn upsert(
        &self,
        student: StudentId,
        subject: SubjectId,
        score: ScoreValue,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.connector.connect().await.map_err(map_connect_error)?;
        sql_query(UPSERT_SQL)
            .bind::<Integer, _>(student.get())
            .bind::<Integer, _>(subject.get())
            .bind::<Double, _>(score.get())
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn scores_for_student(
        &self,
        student: StudentId,
    ) -> Result<Vec<ScoreRow>, RepositoryError> {
        let mut conn = self.connector.connect().await.map_err(map_connect_error)?;
        let rows = subjects::table
            .left_join(
                scores::table.on(scores::subject_id
                    .eq(subjects::id)
                    .and(scores::student_id.eq(student.get()))),
            )
            .select((
                subjects::id,
                subjects::subject_code,
                subjects::subject_name,
                subjects::credits,
                scores::score.nullable(),
            ))
            .order(subjects::id.asc())
            .load::<ScoreViewRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(ScoreRow::try_from).collect()
    }
}
