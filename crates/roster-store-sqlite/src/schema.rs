//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout; future migrations will be gated on it.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS employees (
    emp_id            TEXT PRIMARY KEY CHECK (emp_id != ''),
    name              TEXT NOT NULL,
    phone             TEXT NOT NULL,
    address           TEXT NOT NULL,
    email             TEXT NOT NULL,
    -- Hasher output only; plaintext never reaches this column.
    credential_digest TEXT NOT NULL,
    app_group         TEXT NOT NULL,   -- 'ED-APP-ADMIN' | 'ED-APP-USERS' | other
    bank_account_id   TEXT NOT NULL,
    salary            REAL NOT NULL CHECK (salary >= 0),
    active            INTEGER NOT NULL DEFAULT 1
);

CREATE INDEX IF NOT EXISTS employees_active_idx ON employees(active);

PRAGMA user_version = 1;
";
