//! PostgreSQL-backed `HistoryRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{HistoryPersistenceError, HistoryRepository};
use crate::domain::text::TransformKind;
use crate::domain::{HistoryEntry, HistoryEntryId, NewHistoryEntry, UserId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{HistoryRow, NewHistoryRow};
use super::pool::{DbPool, PoolError};
use super::schema::history;

/// Diesel implementation of [`HistoryRepository`].
#[derive(Clone)]
pub struct DieselHistoryRepository {
    pool: DbPool,
}

impl DieselHistoryRepository {
    /// Repository over `pool`.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> HistoryPersistenceError {
    map_pool_error(error, HistoryPersistenceError::connection)
}

fn diesel_error(error: diesel::result::Error) -> HistoryPersistenceError {
    map_diesel_error(
        error,
        HistoryPersistenceError::query,
        HistoryPersistenceError::connection,
    )
}

fn row_to_entry(row: HistoryRow) -> Result<HistoryEntry, HistoryPersistenceError> {
    let kind = row.kind.parse::<TransformKind>().map_err(|err| {
        warn!(entry_id = row.id, kind = %err.0, "stored transform kind is unknown");
        HistoryPersistenceError::query("stored transform kind is unknown")
    })?;
    Ok(HistoryEntry {
        id: HistoryEntryId::new(row.id),
        user_id: UserId::new(row.user_id),
        original_text: row.original_text,
        result_text: row.result_text,
        kind,
        created_at: row.created_at,
    })
}

#[async_trait]
impl HistoryRepository for DieselHistoryRepository {
    async fn append(
        &self,
        entry: &NewHistoryEntry,
    ) -> Result<HistoryEntry, HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewHistoryRow {
            user_id: entry.user_id.get(),
            original_text: &entry.original_text,
            result_text: &entry.result_text,
            kind: entry.kind.as_str(),
            created_at: entry.created_at,
        };

        let stored = diesel::insert_into(history::table)
            .values(&row)
            .returning(HistoryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;

        row_to_entry(stored)
    }

    async fn list_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<HistoryEntry>, HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<HistoryRow> = history::table
            .filter(history::user_id.eq(user_id.get()))
            .order((history::created_at.desc(), history::id.desc()))
            .select(HistoryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        rows.into_iter().map(row_to_entry).collect()
    }

    async fn delete_for_user(
        &self,
        user_id: UserId,
        id: HistoryEntryId,
    ) -> Result<bool, HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(
            history::table
                .filter(history::id.eq(id.get()))
                .filter(history::user_id.eq(user_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(diesel_error)?;

        Ok(removed > 0)
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<u64, HistoryPersistenceError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(history::table.filter(history::user_id.eq(user_id.get())))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;

        u64::try_from(removed).map_err(|err| HistoryPersistenceError::query(err.to_string()))
    }
}
