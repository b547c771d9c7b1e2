//! CRUD operations for [`Donor`] records.

use std::collections::HashSet;

use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::database::{timestamp_at, Database};
use crate::error::{Result, StoreError};
use crate::models::{BatchOutcome, Donor};

impl Database {
    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Insert a donor.  Returns `false` if the surname already exists.
    ///
    /// Relies on the UNIQUE constraint, so two concurrent inserts of the same
    /// surname yield exactly one `true`.
    pub fn add_donor(&self, last_name: &str) -> Result<bool> {
        let affected = self.conn().execute(
            "INSERT INTO donors (last_name, created_at) VALUES (?1, ?2)
             ON CONFLICT DO NOTHING",
            params![last_name, Utc::now().to_rfc3339()],
        )?;
        Ok(affected > 0)
    }

    /// Insert several donors independently; there is no batch transaction,
    /// so a partial result is normal.  Repeated surnames are attempted once.
    pub fn add_donors<S: AsRef<str>>(&self, last_names: &[S]) -> Result<BatchOutcome> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut outcome = BatchOutcome::default();

        for last_name in last_names {
            let last_name: &str = last_name.as_ref();
            if !seen.insert(last_name) {
                continue;
            }
            if self.add_donor(last_name)? {
                outcome.added.push(last_name.to_string());
            } else {
                outcome.existed.push(last_name.to_string());
            }
        }

        Ok(outcome)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    /// Exact, case-sensitive lookup by surname.
    pub fn get_donor(&self, last_name: &str) -> Result<Option<Donor>> {
        self.conn()
            .query_row(
                "SELECT id, last_name, created_at FROM donors WHERE last_name = ?1",
                params![last_name],
                row_to_donor,
            )
            .optional()
            .map_err(StoreError::Sqlite)
    }

    /// All donors, ordered by surname.
    pub fn list_donors(&self) -> Result<Vec<Donor>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT id, last_name, created_at FROM donors ORDER BY last_name ASC")?;
        let rows = stmt.query_map([], row_to_donor)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    // ------------------------------------------------------------------
    // Delete
    // ------------------------------------------------------------------

    /// Delete a donor by surname.  Returns `true` if a row was deleted.
    // ON DELETE CASCADE: payment history goes with it
    pub fn remove_donor(&self, last_name: &str) -> Result<bool> {
        let affected = self
            .conn()
            .execute("DELETE FROM donors WHERE last_name = ?1", params![last_name])?;
        Ok(affected > 0)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Map a `rusqlite::Row` (`id, last_name, created_at`) to a [`Donor`].
pub(crate) fn row_to_donor(row: &rusqlite::Row<'_>) -> rusqlite::Result<Donor> {
    Ok(Donor {
        id: row.get(0)?,
        last_name: row.get(1)?,
        created_at: timestamp_at(row, 2)?,
    })
}
