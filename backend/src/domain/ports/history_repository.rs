//! Driven port for transformation history storage.
use async_trait::async_trait;

use crate::domain::{HistoryEntry, HistoryEntryId, NewHistoryEntry, UserId};

use super::define_port_error;

define_port_error! {
    /// Failures raised by history repository adapters.
    pub enum HistoryPersistenceError {
        /// The backing store could not be reached.
        Connection {
            /// Adapter-supplied detail.
            message: String,
        } => "history repository connection failed: {message}",
        /// A query or mutation failed.
        Query {
            /// Adapter-supplied detail.
            message: String,
        } => "history repository query failed: {message}",
    }
}

/// Per-user transformation history storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryRepository: Send + Sync {
    /// Store `entry` and return it with its assigned id.
    async fn append(&self, entry: &NewHistoryEntry) -> Result<HistoryEntry, HistoryPersistenceError>;

    /// Entries owned by `user_id`, newest first with ties broken by id.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<HistoryEntry>, HistoryPersistenceError>;

    /// Delete one entry if `user_id` owns it. Returns whether a row went away.
    async fn delete_for_user(
        &self,
        user_id: UserId,
        id: HistoryEntryId,
    ) -> Result<bool, HistoryPersistenceError>;

    /// Delete every entry of `user_id`, returning how many were removed.
    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, HistoryPersistenceError>;
}
