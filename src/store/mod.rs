//! SQLite storage for bean records
//!
//! The store owns persistence and identity: ids are assigned by SQLite on
//! insert and never reused. Everything else (filtering, sorting, paging)
//! happens client side over the full result set.

pub mod beans;
pub mod schema;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::BeanError;

/// SQLite database holding the dry_beans table
pub struct BeanDb {
    conn: Mutex<Connection>,
}

impl BeanDb {
    /// Open or create the database at the given path
    pub fn open(db_path: &Path) -> Result<Self, BeanError> {
        info!("Opening SQLite database at {:?}", db_path);

        let conn = Connection::open(db_path)
            .map_err(|e| BeanError::Database(format!("Failed to open SQLite: {}", e)))?;

        // WAL mode for better concurrent read performance
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")
            .map_err(|e| BeanError::Database(format!("Failed to set PRAGMA: {}", e)))?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        db.init_schema()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self, BeanError> {
        debug!("Opening in-memory SQLite database");

        let conn = Connection::open_in_memory()
            .map_err(|e| BeanError::Database(format!("Failed to open in-memory SQLite: {}", e)))?;

        let db = Self {
            conn: Mutex::new(conn),
        };

        db.init_schema()?;

        Ok(db)
    }

    fn init_schema(&self) -> Result<(), BeanError> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| BeanError::Internal(format!("Lock poisoned: {}", e)))?;

        schema::init_schema(&conn)
    }

    /// Run a read operation against the connection
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, BeanError>
    where
        F: FnOnce(&Connection) -> Result<T, BeanError>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| BeanError::Internal(format!("Lock poisoned: {}", e)))?;
        f(&conn)
    }

    /// Run a write operation with exclusive access (for transactions)
    pub fn with_conn_mut<F, T>(&self, f: F) -> Result<T, BeanError>
    where
        F: FnOnce(&mut Connection) -> Result<T, BeanError>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|e| BeanError::Internal(format!("Lock poisoned: {}", e)))?;
        f(&mut conn)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<DbStats, BeanError> {
        self.with_conn(|conn| {
            let bean_count: i64 = conn
                .query_row("SELECT COUNT(*) FROM dry_beans", [], |row| row.get(0))
                .map_err(|e| BeanError::Database(format!("Query failed: {}", e)))?;

            let class_count: i64 = conn
                .query_row(
                    "SELECT COUNT(DISTINCT bean_class) FROM dry_beans",
                    [],
                    |row| row.get(0),
                )
                .map_err(|e| BeanError::Database(format!("Query failed: {}", e)))?;

            Ok(DbStats {
                bean_count: bean_count as u64,
                class_count: class_count as u64,
            })
        })
    }
}

/// Database statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct DbStats {
    pub bean_count: u64,
    pub class_count: u64,
}

// Re-exports
pub use beans::{BeanInput, BeanRecord, BulkResult};
