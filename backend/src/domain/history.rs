//! Per-user transformation history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use super::text::TransformKind;

/// Database-assigned history entry identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryEntryId(i64);

impl HistoryEntryId {
    /// Wrap a raw row id.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw row id.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

/// One recorded transformation. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Row id.
    pub id: HistoryEntryId,
    /// Owning user.
    pub user_id: UserId,
    /// Text as submitted.
    pub original_text: String,
    /// Text after the transformation.
    pub result_text: String,
    /// Which transformation ran.
    pub kind: TransformKind,
    /// When the transformation ran.
    pub created_at: DateTime<Utc>,
}

/// Entry awaiting insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryEntry {
    /// Owning user.
    pub user_id: UserId,
    /// Text as submitted.
    pub original_text: String,
    /// Text after the transformation.
    pub result_text: String,
    /// Which transformation ran.
    pub kind: TransformKind,
    /// When the transformation ran.
    pub created_at: DateTime<Utc>,
}

impl NewHistoryEntry {
    /// Attach the id the store assigned.
    #[must_use]
    pub fn into_entry(self, id: HistoryEntryId) -> HistoryEntry {
        HistoryEntry {
            id,
            user_id: self.user_id,
            original_text: self.original_text,
            result_text: self.result_text,
            kind: self.kind,
            created_at: self.created_at,
        }
    }
}

/// Sort newest first, breaking timestamp ties by descending id.
pub fn sort_newest_first(entries: &mut [HistoryEntry]) {
    entries.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn entry(id: i64, offset_secs: i64) -> HistoryEntry {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).single().expect("valid");
        NewHistoryEntry {
            user_id: UserId::new(1),
            original_text: "a".into(),
            result_text: "b".into(),
            kind: TransformKind::Clean,
            created_at: base + Duration::seconds(offset_secs),
        }
        .into_entry(HistoryEntryId::new(id))
    }

    #[rstest]
    fn newest_first_with_id_tiebreak() {
        let mut entries = vec![entry(1, 0), entry(2, 10), entry(3, 10), entry(4, 5)];
        sort_newest_first(&mut entries);
        let ids: Vec<i64> = entries.iter().map(|e| e.id.get()).collect();
        assert_eq!(ids, vec![3, 2, 4, 1]);
    }
}
