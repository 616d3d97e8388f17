//! Database schema and migrations for custodia.
//!
//! Migrations are applied sequentially when the database is opened.

/// Database migrations.
///
/// Each migration is a SQL script that will be executed in order.
/// The schema_version table tracks which migrations have been applied.
pub const MIGRATIONS: &[&str] = &[
    // v1: Initial schema - users table
    r#"
-- Users table for registration, approval and login
CREATE TABLE users (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    name            TEXT NOT NULL,
    email           TEXT NOT NULL COLLATE NOCASE UNIQUE,
    password        TEXT NOT NULL,          -- Argon2 hash
    role            TEXT NOT NULL DEFAULT 'user',     -- 'admin', 'investigation-officer', 'forensic-expert', 'user'
    police_station  TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'pending',  -- 'pending', 'approved', 'rejected'
    created_at      TEXT NOT NULL DEFAULT (datetime('now')),
    last_login      TEXT
);

CREATE INDEX idx_users_status ON users(status);
CREATE INDEX idx_users_station ON users(police_station);

-- At most one admin per police station; the workflow's existence check
-- races under concurrent signups, this index is the authority.
CREATE UNIQUE INDEX idx_users_station_admin ON users(police_station) WHERE role = 'admin';
"#,
];
