//! SQL schema for the Sevak SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.
//!
//! The registry's invariants live here as constraints, not just in
//! application code: `membership_number` and `sequential_id` are UNIQUE
//! columns, and the partial unique index on `(area, role)` admits at most
//! one president and one vice-president per area while leaving plain
//! members unconstrained.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS volunteers (
    volunteer_id      TEXT PRIMARY KEY,
    sequential_id     INTEGER NOT NULL UNIQUE,
    name              TEXT NOT NULL,
    membership_number TEXT NOT NULL UNIQUE,
    mobile_number     TEXT NOT NULL,
    address           TEXT NOT NULL,
    area              TEXT NOT NULL,
    role              TEXT NOT NULL DEFAULT 'member',  -- 'member' | 'president' | 'vice-president'
    appointed_by      TEXT NOT NULL DEFAULT 'system',
    appointment_date  TEXT,                            -- NULL until first role change
    image_url         TEXT NOT NULL DEFAULT '',
    join_date         TEXT NOT NULL,                   -- ISO 8601 UTC; store-assigned
    last_updated      TEXT NOT NULL,
    is_active         INTEGER NOT NULL DEFAULT 1
);

-- One president and one vice-president per area, enforced by the store
-- itself. Members are exempt.
CREATE UNIQUE INDEX IF NOT EXISTS volunteers_officer_slot_idx
    ON volunteers(area, role) WHERE role != 'member';

CREATE INDEX IF NOT EXISTS volunteers_area_role_idx ON volunteers(area, role);

PRAGMA user_version = 1;
";
