//! Process-local repositories.
//!
//! Used when no database URL is configured and by the HTTP integration
//! tests. Both repositories share one [`InMemoryStore`] so deleting a user
//! also drops their history, mirroring the foreign-key cascade in Postgres.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    HistoryPersistenceError, HistoryRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    HistoryEntry, HistoryEntryId, NewHistoryEntry, NewUserAccount, User, UserAccount, UserId,
    sort_newest_first,
};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, UserAccount>,
    history: BTreeMap<HistoryEntryId, HistoryEntry>,
    next_user_id: i64,
    next_entry_id: i64,
}

impl Tables {
    fn allocate_user_id(&mut self) -> UserId {
        self.next_user_id += 1;
        UserId::new(self.next_user_id)
    }

    fn allocate_entry_id(&mut self) -> HistoryEntryId {
        self.next_entry_id += 1;
        HistoryEntryId::new(self.next_entry_id)
    }
}

/// Shared tables behind both in-memory repositories.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStore {
    /// Empty store; ids start at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// User repository view over this store.
    #[must_use]
    pub fn users(&self) -> InMemoryUserRepository {
        InMemoryUserRepository {
            store: self.clone(),
        }
    }

    /// History repository view over this store.
    #[must_use]
    pub fn history(&self) -> InMemoryHistoryRepository {
        InMemoryHistoryRepository {
            store: self.clone(),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory store poisoned".to_owned())
    }
}

/// [`UserRepository`] over an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, account: &NewUserAccount) -> Result<UserAccount, UserPersistenceError> {
        let mut tables = self.store.lock().map_err(UserPersistenceError::query)?;
        if tables
            .users
            .values()
            .any(|existing| existing.user.username() == &account.username)
        {
            return Err(UserPersistenceError::duplicate_username(
                account.username.as_str(),
            ));
        }
        let id = tables.allocate_user_id();
        let stored = UserAccount {
            user: User::new(id, account.username.clone()),
            password_hash: account.password_hash.clone(),
        };
        tables.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let tables = self.store.lock().map_err(UserPersistenceError::query)?;
        Ok(tables
            .users
            .values()
            .find(|account| account.user.username().as_str() == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let tables = self.store.lock().map_err(UserPersistenceError::query)?;
        Ok(tables.users.get(&id).cloned())
    }

    async fn delete_with_history(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut tables = self.store.lock().map_err(UserPersistenceError::query)?;
        if tables.users.remove(&id).is_none() {
            return Ok(false);
        }
        tables.history.retain(|_, entry| entry.user_id != id);
        Ok(true)
    }
}

/// [`HistoryRepository`] over an [`InMemoryStore`].
#[derive(Debug, Clone)]
pub struct InMemoryHistoryRepository {
    store: InMemoryStore,
}

#[async_trait]
impl HistoryRepository for InMemoryHistoryRepository {
    async fn append(
        &self,
        entry: &NewHistoryEntry,
    ) -> Result<HistoryEntry, HistoryPersistenceError> {
        let mut tables = self.store.lock().map_err(HistoryPersistenceError::query)?;
        if !tables.users.contains_key(&entry.user_id) {
            return Err(HistoryPersistenceError::query(format!(
                "user {} does not exist",
                entry.user_id
            )));
        }
        let id = tables.allocate_entry_id();
        let stored = entry.clone().into_entry(id);
        tables.history.insert(id, stored.clone());
        Ok(stored)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<HistoryEntry>, HistoryPersistenceError> {
        let tables = self.store.lock().map_err(HistoryPersistenceError::query)?;
        let mut entries: Vec<HistoryEntry> = tables
            .history
            .values()
            .filter(|entry| entry.user_id == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    async fn delete_for_user(
        &self,
        user_id: UserId,
        id: HistoryEntryId,
    ) -> Result<bool, HistoryPersistenceError> {
        let mut tables = self.store.lock().map_err(HistoryPersistenceError::query)?;
        let owned = tables
            .history
            .get(&id)
            .is_some_and(|entry| entry.user_id == user_id);
        if owned {
            tables.history.remove(&id);
        }
        Ok(owned)
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, HistoryPersistenceError> {
        let mut tables = self.store.lock().map_err(HistoryPersistenceError::query)?;
        let before = tables.history.len();
        tables.history.retain(|_, entry| entry.user_id != user_id);
        let removed = before.saturating_sub(tables.history.len());
        u64::try_from(removed).map_err(|err| HistoryPersistenceError::query(err.to_string()))
    }
}
