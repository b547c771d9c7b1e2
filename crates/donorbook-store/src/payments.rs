//! CRUD operations for [`Payment`] records and the paid / unpaid reports.

use chrono::Utc;
use donorbook_shared::{ActorId, Period};
use rusqlite::params;

use crate::database::{timestamp_at, Database};
use crate::donors::row_to_donor;
use crate::error::{Result, StoreError};
use crate::models::{Donor, Payment};

impl Database {
    /// Record a payment.  Returns `false` if the donor already has one for
    /// this period.
    pub fn record_payment(&self, donor_id: i64, period: Period, recorded_by: ActorId) -> Result<bool> {
        let affected = self.conn().execute(
            "INSERT INTO payments (donor_id, month, year, recorded_at, recorded_by)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT DO NOTHING",
            params![
                donor_id,
                period.month,
                period.year,
                Utc::now().to_rfc3339(),
                recorded_by.0,
            ],
        )?;
        Ok(affected > 0)
    }

    /// Delete a payment.  Returns `true` if a row was deleted.
    pub fn delete_payment(&self, donor_id: i64, period: Period) -> Result<bool> {
        let affected = self.conn().execute(
            "DELETE FROM payments WHERE donor_id = ?1 AND month = ?2 AND year = ?3",
            params![donor_id, period.month, period.year],
        )?;
        Ok(affected > 0)
    }

    /// Donors with a payment for `period`, ordered by surname.
    pub fn list_paid_donors(&self, period: Period) -> Result<Vec<Donor>> {
        let mut stmt = self.conn().prepare(
            "SELECT d.id, d.last_name, d.created_at
             FROM donors d
             INNER JOIN payments p ON d.id = p.donor_id
             WHERE p.month = ?1 AND p.year = ?2
             ORDER BY d.last_name ASC",
        )?;
        let rows = stmt.query_map(params![period.month, period.year], row_to_donor)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    /// Donors without a payment for `period`, ordered by surname.
    pub fn list_unpaid_donors(&self, period: Period) -> Result<Vec<Donor>> {
        let mut stmt = self.conn().prepare(
            "SELECT d.id, d.last_name, d.created_at
             FROM donors d
             WHERE d.id NOT IN (
                 SELECT donor_id FROM payments WHERE month = ?1 AND year = ?2
             )
             ORDER BY d.last_name ASC",
        )?;
        let rows = stmt.query_map(params![period.month, period.year], row_to_donor)?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }

    /// Payment history of one donor, most recent period first.
    pub fn get_history(&self, donor_id: i64) -> Result<Vec<Payment>> {
        let mut stmt = self.conn().prepare(
            "SELECT donor_id, month, year, recorded_at, recorded_by
             FROM payments
             WHERE donor_id = ?1
             ORDER BY year DESC, month DESC",
        )?;

        let rows = stmt.query_map(params![donor_id], |row| {
            Ok(Payment {
                donor_id: row.get(0)?,
                period: Period::new(row.get(1)?, row.get(2)?),
                recorded_at: timestamp_at(row, 3)?,
                recorded_by: ActorId(row.get(4)?),
            })
        })?;

        let mut history = Vec::new();
        for row in rows {
            history.push(row?);
        }
        Ok(history)
    }
}
