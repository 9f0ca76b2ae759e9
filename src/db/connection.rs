// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

/// Default database file path when the embedding application does not
/// configure one: {APP_DATA}/restock/restock.db
pub fn default_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let restock_dir = app_data_dir.join("restock");

    std::fs::create_dir_all(&restock_dir).map_err(AppError::Io)?;

    Ok(restock_dir.join("restock.db"))
}

/// Create a connection pool
///
/// Pool configuration:
/// - Max 15 connections
/// - SQLite in WAL mode for better concurrency
/// - Foreign keys enabled
/// - Busy timeout set to avoid immediate errors under contention
pub fn create_connection_pool(db_path: &Path) -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::file(db_path).with_init(|conn| {
        // Foreign key support is not on by default in SQLite
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )?;
        Ok(())
    });

    let pool = Pool::builder()
        .max_size(15)
        .build(manager)
        .map_err(|e| AppError::Other(format!("Failed to create connection pool: {}", e)))?;

    Ok(pool)
}

/// Get a connection from the pool with a clearer error message.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Other(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone in-memory connection (for schema-level tests).
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory().map_err(AppError::Database)?;

    conn.execute_batch("PRAGMA foreign_keys = ON;")
        .map_err(AppError::Database)?;

    Ok(conn)
}

/// Pool over a temp-file database with the schema applied; the TempDir must
/// outlive the pool.
#[cfg(test)]
pub fn create_test_pool() -> (tempfile::TempDir, ConnectionPool) {
    let dir = tempfile::tempdir().expect("tempdir");
    let pool = create_connection_pool(&dir.path().join("restock-test.db")).expect("pool");
    {
        let conn = pool.get().expect("conn");
        crate::db::migrations::initialize_database(&conn).expect("schema");
    }
    (dir, pool)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_pool_creation() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_connection_pool(&dir.path().join("restock.db")).unwrap();
        let conn = get_connection(&pool).unwrap();

        // Verify foreign keys are enabled
        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }

    #[test]
    fn test_test_connection() {
        let conn = create_test_connection().unwrap();

        let result: i32 = conn.query_row("SELECT 1 + 1", [], |row| row.get(0)).unwrap();
        assert_eq!(result, 2);

        let fk_enabled: i32 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk_enabled, 1);
    }
}
