//! Database schema definitions

use rusqlite::Connection;
use tracing::info;

use crate::error::BeanError;

/// Current schema version for migrations
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn init_schema(conn: &Connection) -> Result<(), BeanError> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Creating new database schema v{}", SCHEMA_VERSION);
        create_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version < SCHEMA_VERSION {
        info!(
            "Migrating schema from v{} to v{}",
            current_version, SCHEMA_VERSION
        );
        migrate_schema(conn, current_version)?;
    } else {
        info!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get current schema version (0 if not initialized)
fn get_schema_version(conn: &Connection) -> Result<i32, BeanError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
        [],
    )
    .map_err(|e| BeanError::Database(format!("Failed to create schema_version table: {}", e)))?;

    let version: i32 = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .unwrap_or(0);

    Ok(version)
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), BeanError> {
    conn.execute("DELETE FROM schema_version", [])
        .map_err(|e| BeanError::Database(format!("Failed to clear schema_version: {}", e)))?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?)", [version])
        .map_err(|e| BeanError::Database(format!("Failed to set schema_version: {}", e)))?;
    Ok(())
}

/// Create all tables
fn create_tables(conn: &Connection) -> Result<(), BeanError> {
    conn.execute_batch(BEANS_SCHEMA)
        .map_err(|e| BeanError::Database(format!("Failed to create dry_beans table: {}", e)))
}

/// Migrate schema from older version
fn migrate_schema(conn: &Connection, _from_version: i32) -> Result<(), BeanError> {
    // Add migration steps here as schema evolves
    set_schema_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

/// Dry-bean sample table
///
/// AUTOINCREMENT keeps ids monotonic so a deleted id is never handed out
/// again. Timestamps carry millisecond precision so updated_at is
/// distinguishable from created_at even for immediate edits.
const BEANS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS dry_beans (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bean_class TEXT NOT NULL,

    -- Core shape descriptors (required)
    area REAL NOT NULL,
    perimeter REAL NOT NULL,
    major_axis_length REAL NOT NULL,
    minor_axis_length REAL NOT NULL,

    -- Extended shape descriptors (optional)
    aspect_ratio REAL,
    eccentricity REAL,
    convex_area REAL,
    equiv_diameter REAL,
    extent REAL,
    solidity REAL,
    roundness REAL,
    compactness REAL,
    shape_factor1 REAL,
    shape_factor2 REAL,
    shape_factor3 REAL,
    shape_factor4 REAL,

    -- Display only
    image_url TEXT,

    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
);

CREATE INDEX IF NOT EXISTS idx_dry_beans_class ON dry_beans(bean_class);
"#;
