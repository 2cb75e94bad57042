// SPDX-License-Identifier: MPL-2.0

mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("database path error: {0}")]
    Path(String),
}

/// One cached profile row, keyed by the permanent account id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedProfile {
    /// Permanent 32-hex account id. Unique, never reassigned.
    pub id: String,
    /// Lowercased current-or-stale nickname. Not unique: handle reuse
    /// leaves behind colliding rows that are repaired lazily.
    pub nickname: String,
    /// Display-cased name as last observed upstream.
    pub display_name: String,
    /// Unix seconds; only ever increases on refresh.
    pub expires_at: i64,
    /// Encoded skin sheet.
    pub skin: Vec<u8>,
    /// Encoded cape, if the account has one.
    pub cape: Option<Vec<u8>>,
    /// Head thumbnail derived from `skin` at the same refresh.
    pub head: Vec<u8>,
    /// Slim ("Alex") model variant.
    pub slim: bool,
    /// Owner opt-in for fragment search. Never written by a refresh.
    pub searchable: bool,
    /// Back-reference to a claiming account. Set externally, read-only here.
    pub owner_id: Option<String>,
}

/// Persistent store the engine delegates to. Any backend with unique-key
/// upsert semantics qualifies; correctness under concurrent refreshes
/// rests entirely on `upsert` being atomic per id.
pub trait ProfileStore: Send + Sync {
    fn find_by_id(&self, id: &str) -> Result<Option<CachedProfile>, StoreError>;

    /// All rows currently bound to a lowercased nickname (collisions
    /// included — that is the point).
    fn find_by_nickname(&self, nickname: &str) -> Result<Vec<CachedProfile>, StoreError>;

    /// Insert or overwrite the refresh-derived columns of the row keyed by
    /// `row.id`. Must not touch `searchable` or `owner_id` on conflict.
    fn upsert(&self, row: &CachedProfile) -> Result<(), StoreError>;

    /// Patch only the nickname fields of an existing row (collision repair).
    fn rename(&self, id: &str, nickname: &str, display_name: &str) -> Result<(), StoreError>;

    /// Count searchable rows whose nickname contains `fragment`.
    fn count_matching(&self, fragment: &str) -> Result<u64, StoreError>;

    /// One page of searchable rows whose nickname contains `fragment`,
    /// ordered by display name.
    fn find_page(
        &self,
        fragment: &str,
        take: u32,
        page: u32,
    ) -> Result<Vec<CachedProfile>, StoreError>;

    /// Up to `limit` rows ordered by `expires_at` ascending (most overdue
    /// first) — the revalidation sweep's work list.
    fn stalest(&self, limit: usize) -> Result<Vec<CachedProfile>, StoreError>;
}
