//! Driving port for deleting history entries.
use async_trait::async_trait;

use crate::domain::{Error, HistoryEntryId, UserId};

/// History mutations on behalf of an authenticated user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryCommand: Send + Sync {
    /// Delete one entry owned by `owner`. Missing and foreign ids are both
    /// reported as not found.
    async fn delete_entry(&self, owner: UserId, id: HistoryEntryId) -> Result<(), Error>;

    /// Delete all of `owner`'s entries, returning how many were removed.
    async fn clear(&self, owner: UserId) -> Result<u64, Error>;
}
