// SPDX-License-Identifier: MPL-2.0

/// SQL schema for the profile cache database
pub const SCHEMA: &str = r#"
-- Database version for migrations
PRAGMA user_version = 1;

-- profiles: one row per permanent account id. Rows are never deleted;
-- nickname is a reusable lease and is deliberately NOT unique.
CREATE TABLE IF NOT EXISTS profiles (
    id TEXT PRIMARY KEY,
    nickname TEXT NOT NULL,
    display_name TEXT NOT NULL,
    expires_at INTEGER NOT NULL,
    skin BLOB NOT NULL,
    cape BLOB,
    head BLOB NOT NULL,
    slim INTEGER NOT NULL DEFAULT 0,
    searchable INTEGER NOT NULL DEFAULT 0,
    owner_id TEXT
);

CREATE INDEX IF NOT EXISTS idx_profiles_nickname ON profiles(nickname);
CREATE INDEX IF NOT EXISTS idx_profiles_expires_at ON profiles(expires_at);
"#;
