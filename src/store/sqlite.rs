// SPDX-License-Identifier: MPL-2.0

use rusqlite::{Connection, Row, params};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::store::schema::SCHEMA;
use crate::store::{CachedProfile, ProfileStore, StoreError};

const ROW_COLUMNS: &str =
    "id, nickname, display_name, expires_at, skin, cape, head, slim, searchable, owner_id";

/// SQLite-backed profile store.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the database at `path`.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Path(format!("failed to create store dir: {e}")))?;
        }
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open the default per-user database under the XDG data directory.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(&Self::default_path()?)
    }

    /// Private in-process database, used by tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn default_path() -> Result<PathBuf, StoreError> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StoreError::Path("could not find data directory".to_string()))?;
        Ok(data_dir.join("skinvault").join("profiles.db"))
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("store lock poisoned")
    }

    fn row_to_profile(row: &Row<'_>) -> rusqlite::Result<CachedProfile> {
        Ok(CachedProfile {
            id: row.get(0)?,
            nickname: row.get(1)?,
            display_name: row.get(2)?,
            expires_at: row.get(3)?,
            skin: row.get(4)?,
            cape: row.get(5)?,
            head: row.get(6)?,
            slim: row.get(7)?,
            searchable: row.get(8)?,
            owner_id: row.get(9)?,
        })
    }
}

impl ProfileStore for SqliteStore {
    fn find_by_id(&self, id: &str) -> Result<Option<CachedProfile>, StoreError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {ROW_COLUMNS} FROM profiles WHERE id = ?"))?;
        match stmt.query_row([id], Self::row_to_profile) {
            Ok(profile) => Ok(Some(profile)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(other) => Err(StoreError::Database(other)),
        }
    }

    fn find_by_nickname(&self, nickname: &str) -> Result<Vec<CachedProfile>, StoreError> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare(&format!("SELECT {ROW_COLUMNS} FROM profiles WHERE nickname = ?"))?;
        let rows = stmt
            .query_map([nickname], Self::row_to_profile)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn upsert(&self, row: &CachedProfile) -> Result<(), StoreError> {
        let conn = self.conn();
        // searchable and owner_id are owned by external collaborators:
        // they apply on first insert but are never clobbered on conflict.
        conn.execute(
            r#"
            INSERT INTO profiles (
                id, nickname, display_name, expires_at,
                skin, cape, head, slim, searchable, owner_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            ON CONFLICT(id) DO UPDATE SET
                nickname = excluded.nickname,
                display_name = excluded.display_name,
                expires_at = excluded.expires_at,
                skin = excluded.skin,
                cape = excluded.cape,
                head = excluded.head,
                slim = excluded.slim
            "#,
            params![
                row.id,
                row.nickname,
                row.display_name,
                row.expires_at,
                row.skin,
                row.cape,
                row.head,
                row.slim,
                row.searchable,
                row.owner_id,
            ],
        )?;
        Ok(())
    }

    fn rename(&self, id: &str, nickname: &str, display_name: &str) -> Result<(), StoreError> {
        let conn = self.conn();
        conn.execute(
            "UPDATE profiles SET nickname = ?2, display_name = ?3 WHERE id = ?1",
            params![id, nickname, display_name],
        )?;
        Ok(())
    }

    fn count_matching(&self, fragment: &str) -> Result<u64, StoreError> {
        let conn = self.conn();
        let count: u64 = conn.query_row(
            "SELECT COUNT(*) FROM profiles WHERE searchable = 1 AND instr(nickname, ?1) > 0",
            [fragment],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    fn find_page(
        &self,
        fragment: &str,
        take: u32,
        page: u32,
    ) -> Result<Vec<CachedProfile>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            r#"
            SELECT {ROW_COLUMNS} FROM profiles
            WHERE searchable = 1 AND instr(nickname, ?1) > 0
            ORDER BY display_name ASC
            LIMIT ?2 OFFSET ?3
            "#
        ))?;
        let rows = stmt
            .query_map(
                params![fragment, take, i64::from(take) * i64::from(page)],
                Self::row_to_profile,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn stalest(&self, limit: usize) -> Result<Vec<CachedProfile>, StoreError> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {ROW_COLUMNS} FROM profiles ORDER BY expires_at ASC LIMIT ?"
        ))?;
        let rows = stmt
            .query_map([limit as i64], Self::row_to_profile)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}
