//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUserAccount, PasswordHash, User, UserAccount, UserId, Username};

use super::error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{history, users};

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Repository over `pool`.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserPersistenceError {
    map_pool_error(error, UserPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let username = Username::new(row.username).map_err(|err| {
        warn!(user_id = row.id, %err, "stored username fails validation");
        UserPersistenceError::query("stored username is invalid")
    })?;
    Ok(UserAccount {
        user: User::new(UserId::new(row.id), username),
        password_hash: PasswordHash::new(row.password_hash),
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            username: account.username.as_str(),
            password_hash: account.password_hash.as_str(),
        };

        let stored = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserPersistenceError::duplicate_username(account.username.as_str())
                } else {
                    diesel_error(err)
                }
            })?;

        row_to_account(stored)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn delete_with_history(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let raw_id = id.get();

        // History goes first so the removal does not depend on the cascade.
        let removed = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(history::table.filter(history::user_id.eq(raw_id)))
                        .execute(conn)
                        .await?;
                    diesel::delete(users::table.find(raw_id))
                        .execute(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(diesel_error)?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rows_convert_to_accounts() {
        let account = row_to_account(UserRow {
            id: 4,
            username: "alice".into(),
            password_hash: "$argon2id$x".into(),
        })
        .expect("valid row");
        assert_eq!(account.user.id(), UserId::new(4));
        assert_eq!(account.user.username().as_str(), "alice");
        assert_eq!(account.password_hash.as_str(), "$argon2id$x");
    }

    #[rstest]
    fn invalid_stored_usernames_are_query_errors() {
        let err = row_to_account(UserRow {
            id: 4,
            username: "x".into(),
            password_hash: String::new(),
        })
        .expect_err("too short");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn checkout_failures_are_connection_errors() {
        let err = pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, UserPersistenceError::connection("timed out"));
    }
}
