//! v001 -- Initial schema creation.
//!
//! Creates the three tables: `donors`, `payments` and `admins`.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Donors
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS donors (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    last_name  TEXT NOT NULL UNIQUE,          -- case-sensitive exact match
    created_at TEXT NOT NULL                  -- RFC-3339
);

-- ----------------------------------------------------------------
-- Payments: one row per donor and billing month
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS payments (
    donor_id    INTEGER NOT NULL,             -- FK -> donors(id)
    month       INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year        INTEGER NOT NULL CHECK (year >= 0),
    recorded_at TEXT NOT NULL,
    recorded_by INTEGER NOT NULL,             -- Telegram user id

    PRIMARY KEY (donor_id, month, year),
    FOREIGN KEY (donor_id) REFERENCES donors(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_payments_period ON payments(year, month);

-- ----------------------------------------------------------------
-- Admins granted at runtime (in addition to ADMIN_IDS)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS admins (
    telegram_id INTEGER PRIMARY KEY NOT NULL,
    added_at    TEXT NOT NULL
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
