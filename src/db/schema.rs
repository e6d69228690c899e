//! Database schema definitions and migrations

pub const SCHEMA_VERSION: i32 = 1;

/// Initial schema creation SQL
pub const CREATE_TABLES: &str = r#"
-- Users table. One row per normalized name; the name is the identity
-- users carry across devices, not the generated user_id.
CREATE TABLE IF NOT EXISTS users (
    user_id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    name_key TEXT NOT NULL UNIQUE,
    career TEXT NOT NULL DEFAULT '',
    level TEXT NOT NULL DEFAULT '',
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    last_login TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_users_name_key ON users(name_key);

-- Roadmap documents, at most one per user. The generated plan is kept
-- as a JSON blob; task ids and completion flags are injected at save time.
CREATE TABLE IF NOT EXISTS roadmaps (
    id TEXT PRIMARY KEY NOT NULL,
    user_id TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    user_name TEXT NOT NULL,
    name_key TEXT NOT NULL UNIQUE,
    roadmap_json TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_roadmaps_name_key ON roadmaps(name_key);

-- Schema version tracking
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
