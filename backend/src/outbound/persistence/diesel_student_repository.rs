//! MySQL-backed student repository.
//!
//! Student creation inserts the student and its login account in one
//! transaction: a duplicate username rolls the student row back too.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncMysqlConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{NewStudentAccount, RepositoryError, StudentRepository};
use crate::domain::{PersonalDetails, Role, Student, StudentId, StudentProfile};

use super::connection::MysqlConnector;
use super::diesel_error_mapping::{map_connect_error, map_diesel_error};
use super::last_insert_id;
use super::models::{
    NewAccountRow, PersonalDetailsRow, StudentProfileRow, StudentRow, student_id_from_row,
};
use super::schema::{students, users};

/// Diesel-backed implementation of [`StudentRepository`].
#[derive(Clone)]
pub struct DieselStudentRepository {
    connector: MysqlConnector,
}

impl DieselStudentRepository {
    /// Create a repository that connects through `connector`.
    pub fn new(connector: MysqlConnector) -> Self {
        Self { connector }
    }

    async fn connect(&self) -> Result<AsyncMysqlConnection, RepositoryError> {
        self.connector.connect().await.map_err(map_connect_error)
    }
}

/// Disambiguate a zero-row update: MySQL may report 0 affected rows when the
/// row exists but every value was already current.
async fn student_exists(
    conn: &mut AsyncMysqlConnection,
    id: StudentId,
) -> Result<bool, RepositoryError> {
    diesel::select(exists(students::table.find(id.get())))
        .get_result::<bool>(conn)
        .await
        .map_err(map_diesel_error)
}

#[async_trait]
impl StudentRepository for DieselStudentRepository {
    async fn list(&self) -> Result<Vec<Student>, RepositoryError> {
        let mut conn = self.connect().await?;
        let rows = students::table
            .select(StudentRow::as_select())
            .order(students::id.asc())
            .load::<StudentRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(Student::try_from).collect()
    }

    async fn find(&self, id: StudentId) -> Result<Option<Student>, RepositoryError> {
        let mut conn = self.connect().await?;
        let row = students::table
            .find(id.get())
            .select(StudentRow::as_select())
            .first::<StudentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(Student::try_from).transpose()
    }

    async fn create_with_account(
        &self,
        profile: &StudentProfile,
        account: &NewStudentAccount,
    ) -> Result<StudentId, RepositoryError> {
        let mut conn = self.connect().await?;
        let student_row = StudentProfileRow::from(profile);

        let id = conn
            .transaction::<i32, diesel::result::Error, _>(|conn| {
                async move {
                    diesel::insert_into(students::table)
                        .values(&student_row)
                        .execute(conn)
                        .await?;
                    let raw_id = diesel::select(last_insert_id())
                        .get_result::<u64>(conn)
                        .await?;
                    let student_id = i32::try_from(raw_id).map_err(|_| {
                        diesel::result::Error::QueryBuilderError(
                            format!("student id {raw_id} is out of range").into(),
                        )
                    })?;
                    diesel::insert_into(users::table)
                        .values(&NewAccountRow {
                            username: &account.username,
                            password: &account.password_hash,
                            role: Role::Student.as_str(),
                            student_id,
                        })
                        .execute(conn)
                        .await?;
                    Ok(student_id)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        debug!(student_id = id, "student and account inserted");
        student_id_from_row(id)
    }

    async fn update(
        &self,
        id: StudentId,
        profile: &StudentProfile,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.connect().await?;
        let affected = diesel::update(students::table.find(id.get()))
            .set(&StudentProfileRow::from(profile))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected > 0 {
            return Ok(true);
        }
        student_exists(&mut conn, id).await
    }

    async fn update_personal_details(
        &self,
        id: StudentId,
        details: &PersonalDetails,
    ) -> Result<bool, RepositoryError> {
        let mut conn = self.connect().await?;
        let affected = diesel::update(students::table.find(id.get()))
            .set(&PersonalDetailsRow::from(details))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if affected > 0 {
            return Ok(true);
        }
        student_exists(&mut conn, id).await
    }

    async fn delete(&self, id: StudentId) -> Result<bool, RepositoryError> {
        let mut conn = self.connect().await?;
        let affected = diesel::delete(students::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
