//! Driving port for reading a caller's history.
use async_trait::async_trait;

use crate::domain::{Error, HistoryEntry, UserId};

/// History reads on behalf of an authenticated user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HistoryQuery: Send + Sync {
    /// Entries owned by `owner`, newest first.
    async fn list(&self, owner: UserId) -> Result<Vec<HistoryEntry>, Error>;
}
