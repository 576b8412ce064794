//! Driven port for account storage.
use async_trait::async_trait;

use crate::domain::{NewUserAccount, UserAccount, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by user repository adapters.
    pub enum UserPersistenceError {
        /// The backing store could not be reached.
        Connection {
            /// Adapter-supplied detail.
            message: String,
        } => "user repository connection failed: {message}",
        /// A query or mutation failed.
        Query {
            /// Adapter-supplied detail.
            message: String,
        } => "user repository query failed: {message}",
        /// The username is already registered.
        DuplicateUsername {
            /// The name that collided.
            username: String,
        } => "username already registered: {username}",
    }
}

/// Account storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account, failing with `DuplicateUsername` on a clash.
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, UserPersistenceError>;

    /// Look up an account by exact username.
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Look up an account by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Remove the account and all of its history in one transaction.
    ///
    /// Returns `false` when no such user existed.
    async fn delete_with_history(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
