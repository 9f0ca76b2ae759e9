// src/db/migrations.rs
//
// Database schema initialization and migrations
//
// PRINCIPLES:
// - Explicit schema versions
// - No automatic migrations
// - Clear error messages
// - Idempotent operations

use crate::error::{AppError, AppResult};
use rusqlite::Connection;

/// Current schema version
/// Increment this when adding migrations
const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
///
/// This function:
/// 1. Checks current schema version
/// 2. Applies necessary migrations
/// 3. Updates version tracking
///
/// Safe to call multiple times (idempotent).
pub fn initialize_database(conn: &Connection) -> AppResult<()> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        // Fresh database - apply initial schema
        apply_initial_schema(conn)?;
        set_schema_version(conn, 1)?;
    } else if current_version < CURRENT_SCHEMA_VERSION {
        // Future: apply incremental migrations here
        return Err(AppError::Other(format!(
            "Schema version {} is outdated. Expected {}. Manual migration required.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    } else if current_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Other(format!(
            "Schema version {} is newer than supported {}. Update the application.",
            current_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Get current schema version
/// Returns 0 if schema_version table doesn't exist (fresh database)
fn get_schema_version(conn: &Connection) -> AppResult<i32> {
    let table_exists: bool = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )
        .map_err(AppError::Database)?;

    if !table_exists {
        return Ok(0);
    }

    let version: Option<i32> = conn
        .query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get(0)
        })
        .map_err(AppError::Database)?;

    Ok(version.unwrap_or(0))
}

/// Set schema version
fn set_schema_version(conn: &Connection, version: i32) -> AppResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [version],
    )
    .map_err(AppError::Database)?;

    Ok(())
}

/// Apply initial schema (version 1)
fn apply_initial_schema(conn: &Connection) -> AppResult<()> {
    let schema = include_str!("../../schema.sql");

    conn.execute_batch(schema)
        .map_err(|e| AppError::Other(format!("Failed to apply initial schema: {}", e)))?;

    Ok(())
}

/// Verify database integrity
///
/// Runs SQLite's integrity check. Should be called periodically.
pub fn verify_database_integrity(conn: &Connection) -> AppResult<()> {
    let result: String = conn
        .query_row("PRAGMA integrity_check", [], |row| row.get(0))
        .map_err(AppError::Database)?;

    if result != "ok" {
        return Err(AppError::Other(format!(
            "Database integrity check failed: {}",
            result
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::create_test_connection;

    #[test]
    fn test_initialize_fresh_database() {
        let conn = create_test_connection().unwrap();

        // Should be version 0 initially
        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);

        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);

        // Verify all domain tables exist
        let table_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert!(table_count >= 7, "Expected at least 7 tables, got {}", table_count);
    }

    #[test]
    fn test_initialize_idempotent() {
        let conn = create_test_connection().unwrap();

        initialize_database(&conn).unwrap();
        initialize_database(&conn).unwrap();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        // Request referencing a missing item must be rejected
        let result = conn.execute(
            "INSERT INTO requests (id, item_id, requester_id, status, fulfillment_id, created_at)
             VALUES ('r-1', 'no-such-item', 'no-such-user', 'pending', NULL, datetime('now'))",
            [],
        );

        assert!(result.is_err(), "Foreign key constraint should have been violated");
    }

    #[test]
    fn test_one_active_request_per_item_index() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        conn.execute(
            "INSERT INTO users (id, email, role, created_at)
             VALUES ('u-1', 'a@office.test', 'orderer', datetime('now'))",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO items (id, name, category, is_evergreen, created_at)
             VALUES ('i-1', 'Coffee', 'Kitchen', 0, datetime('now'))",
            [],
        )
        .unwrap();

        conn.execute(
            "INSERT INTO requests (id, item_id, requester_id, status, fulfillment_id, created_at)
             VALUES ('r-1', 'i-1', 'u-1', 'pending', NULL, datetime('now'))",
            [],
        )
        .unwrap();

        // Second active request for the same item hits the partial index
        let duplicate = conn.execute(
            "INSERT INTO requests (id, item_id, requester_id, status, fulfillment_id, created_at)
             VALUES ('r-2', 'i-1', 'u-1', 'pending', NULL, datetime('now'))",
            [],
        );
        assert!(duplicate.is_err(), "Partial unique index should reject a second active request");

        // A fulfilled request for the same item is outside the index
        conn.execute(
            "INSERT INTO fulfillments (id, trigger_kind, status, fulfilled_at, created_at)
             VALUES ('f-1', 'threshold', 'fulfilled', datetime('now'), datetime('now'))",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO requests (id, item_id, requester_id, status, fulfillment_id, created_at)
             VALUES ('r-3', 'i-1', 'u-1', 'fulfilled', 'f-1', datetime('now'))",
            [],
        )
        .unwrap();
    }

    #[test]
    fn test_settings_singleton_checks() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        // Only id = 1 is accepted
        let wrong_id = conn.execute(
            "INSERT INTO fulfillment_settings (id, min_pending_items, updated_at)
             VALUES (2, 5, datetime('now'))",
            [],
        );
        assert!(wrong_id.is_err());

        // min_pending_items must be >= 1
        let zero = conn.execute(
            "INSERT INTO fulfillment_settings (id, min_pending_items, updated_at)
             VALUES (1, 0, datetime('now'))",
            [],
        );
        assert!(zero.is_err());
    }

    #[test]
    fn test_integrity_check() {
        let conn = create_test_connection().unwrap();
        initialize_database(&conn).unwrap();

        verify_database_integrity(&conn).unwrap();
    }
}
