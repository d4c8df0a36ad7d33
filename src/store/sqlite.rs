//! SQLite-backed credential table for local runs and tests.
//! Used by: store.

use std::sync::Mutex;

use chrono::Utc;
use rusqlite::Connection;

use crate::error::{Error, Result};

use super::CredentialRecord;

pub struct SqliteStore {
    conn: Mutex<Connection>,
    table: String,
}

/// A row as read back by [`SqliteStore::recent`]. The service never reads
/// records; this exists for tests and local inspection.
#[derive(Debug)]
pub struct StoredRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub stored_at: String,
}

impl SqliteStore {
    /// `table` must already be a validated identifier.
    pub fn open(path: &str, table: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT NOT NULL,
                password TEXT NOT NULL,
                stored_at TEXT NOT NULL
            )"
        ))?;
        Ok(Self {
            conn: Mutex::new(conn),
            table: table.to_string(),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:", crate::config::DEFAULT_COLLECTION)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| Error::Lock(e.to_string()))
    }

    pub fn ping(&self) -> Result<()> {
        let conn = self.lock()?;
        conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
        Ok(())
    }

    pub fn insert(&self, record: &CredentialRecord) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO {} (email, password, stored_at) VALUES (?1, ?2, ?3)",
                self.table
            ),
            (&record.email, &record.password, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    /// Used by tests and local inspection, not by any route.
    pub fn count(&self) -> Result<u64> {
        let conn = self.lock()?;
        let n: i64 =
            conn.query_row(&format!("SELECT COUNT(*) FROM {}", self.table), [], |row| row.get(0))?;
        Ok(n as u64)
    }

    /// Most recent rows first.
    pub fn recent(&self, limit: usize) -> Result<Vec<StoredRow>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, email, password, stored_at FROM {} ORDER BY id DESC LIMIT ?1",
            self.table
        ))?;
        let rows = stmt
            .query_map([limit], |row| {
                Ok(StoredRow {
                    id: row.get(0)?,
                    email: row.get(1)?,
                    password: row.get(2)?,
                    stored_at: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
