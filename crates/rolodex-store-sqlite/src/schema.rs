//! SQL schema for the Rolodex SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` records insertion order; `contact_id` is the public identifier.
-- Rows are never deleted by the service: soft delete only sets the flag.
CREATE TABLE IF NOT EXISTS contacts (
    seq             INTEGER PRIMARY KEY AUTOINCREMENT,
    contact_id      TEXT    NOT NULL UNIQUE,
    name            TEXT    NOT NULL,
    email           TEXT    NOT NULL UNIQUE,   -- trimmed, lower-cased
    phone           TEXT    NOT NULL UNIQUE,   -- trimmed
    created_at      TEXT    NOT NULL,          -- ISO 8601 UTC; server-assigned
    last_updated_at TEXT,
    is_deleted      INTEGER NOT NULL DEFAULT 0,
    deleted_at      TEXT
);

CREATE INDEX IF NOT EXISTS contacts_live_idx ON contacts(is_deleted, seq);

PRAGMA user_version = 1;
";
