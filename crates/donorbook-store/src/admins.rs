use chrono::Utc;
use donorbook_shared::ActorId;
use rusqlite::{params, OptionalExtension};

use crate::database::{timestamp_at, Database};
use crate::error::{Result, StoreError};
use crate::models::Admin;

impl Database {
    pub fn is_admin(&self, telegram_id: ActorId) -> Result<bool> {
        let found = self
            .conn()
            .query_row(
                "SELECT 1 FROM admins WHERE telegram_id = ?1",
                params![telegram_id.0],
                |_| Ok(()),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// Returns `false` if the id was already an admin.
    pub fn add_admin(&self, telegram_id: ActorId) -> Result<bool> {
        let affected = self.conn().execute(
            "INSERT INTO admins (telegram_id, added_at) VALUES (?1, ?2)
             ON CONFLICT DO NOTHING",
            params![telegram_id.0, Utc::now().to_rfc3339()],
        )?;
        Ok(affected > 0)
    }

    pub fn list_admins(&self) -> Result<Vec<Admin>> {
        let mut stmt = self
            .conn()
            .prepare("SELECT telegram_id, added_at FROM admins ORDER BY added_at ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(Admin {
                telegram_id: ActorId(row.get(0)?),
                added_at: timestamp_at(row, 1)?,
            })
        })?;
        rows.collect::<std::result::Result<Vec<_>, _>>()
            .map_err(StoreError::Sqlite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::tests::test_db;

    #[test]
    fn add_admin_is_idempotent() {
        let (db, _dir) = test_db();
        let id = ActorId(777);

        assert!(!db.is_admin(id).unwrap());
        assert!(db.add_admin(id).unwrap());
        assert!(!db.add_admin(id).unwrap());
        assert!(db.is_admin(id).unwrap());

        let admins = db.list_admins().unwrap();
        assert_eq!(admins.len(), 1);
        assert_eq!(admins[0].telegram_id, id);
    }
}
