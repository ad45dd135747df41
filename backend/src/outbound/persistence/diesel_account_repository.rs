//! MySQL-backed account lookup for login.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AccountRecord, AccountRepository, RepositoryError};

use super::connection::MysqlConnector;
use super::diesel_error_mapping::{map_connect_error, map_diesel_error};
use super::models::AccountRow;
use super::schema::users;

/// Diesel-backed implementation of [`AccountRepository`].
#[derive(Clone)]
pub struct DieselAccountRepository {
    connector: MysqlConnector,
}

impl DieselAccountRepository {
    /// Create a repository that connects through `connector`.
    pub fn new(connector: MysqlConnector) -> Self {
        Self { connector }
    }
}

#[async_trait]
impl AccountRepository for DieselAccountRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AccountRecord>, RepositoryError> {
        let mut conn = self.connector.connect().await.map_err(map_connect_error)?;
        let row = users::table
            .filter(users::username.eq(username))
            .select(AccountRow::as_select())
            .first::<AccountRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(AccountRecord::try_from).transpose()
    }
}
