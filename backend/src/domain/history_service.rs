//! Listing and deleting a caller's history.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::ports::{
    HistoryCommand, HistoryPersistenceError, HistoryQuery, HistoryRepository,
};
use crate::domain::{Error, HistoryEntry, HistoryEntryId, UserId};

pub(crate) fn map_history_error(error: HistoryPersistenceError) -> Error {
    match error {
        HistoryPersistenceError::Connection { message } => {
            warn!(%message, "history store unavailable");
            Error::service_unavailable("history store unavailable")
        }
        HistoryPersistenceError::Query { message } => Error::internal(message),
    }
}

/// Implements both history driving ports over one repository.
pub struct HistoryService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> HistoryService<R> {
    /// Serve history reads and deletes from `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> HistoryQuery for HistoryService<R>
where
    R: HistoryRepository + ?Sized,
{
    async fn list(&self, owner: UserId) -> Result<Vec<HistoryEntry>, Error> {
        self.repository
            .list_for_user(owner)
            .await
            .map_err(map_history_error)
    }
}

#[async_trait]
impl<R> HistoryCommand for HistoryService<R>
where
    R: HistoryRepository + ?Sized,
{
    async fn delete_entry(&self, owner: UserId, id: HistoryEntryId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete_for_user(owner, id)
            .await
            .map_err(map_history_error)?;
        if !removed {
            return Err(Error::not_found("History item not found"));
        }
        debug!(user_id = %owner, entry_id = id.get(), "history entry deleted");
        Ok(())
    }

    async fn clear(&self, owner: UserId) -> Result<u64, Error> {
        let removed = self
            .repository
            .delete_all_for_user(owner)
            .await
            .map_err(map_history_error)?;
        debug!(user_id = %owner, removed, "history cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockHistoryRepository;
    use mockall::predicate::eq;
    use rstest::rstest;

    #[rstest]
    #[case(true, None)]
    #[case(false, Some(ErrorCode::NotFound))]
    #[tokio::test]
    async fn delete_entry_reports_missing_or_foreign_ids(
        #[case] removed: bool,
        #[case] expected: Option<ErrorCode>,
    ) {
        let mut repo = MockHistoryRepository::new();
        repo.expect_delete_for_user()
            .with(eq(UserId::new(1)), eq(HistoryEntryId::new(5)))
            .return_const(Ok(removed));
        let svc = HistoryService::new(Arc::new(repo));
        let result = svc.delete_entry(UserId::new(1), HistoryEntryId::new(5)).await;
        assert_eq!(result.err().map(|err| err.code()), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn clear_reports_count() {
        let mut repo = MockHistoryRepository::new();
        repo.expect_delete_all_for_user()
            .with(eq(UserId::new(1)))
            .return_const(Ok(3));
        let svc = HistoryService::new(Arc::new(repo));
        assert_eq!(svc.clear(UserId::new(1)).await.expect("cleared"), 3);
    }

    #[rstest]
    #[tokio::test]
    async fn query_failures_become_internal_errors() {
        let mut repo = MockHistoryRepository::new();
        repo.expect_list_for_user()
            .returning(|_| Err(HistoryPersistenceError::query("syntax")));
        let svc = HistoryService::new(Arc::new(repo));
        let err = svc.list(UserId::new(1)).await.expect_err("failed");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }
}
