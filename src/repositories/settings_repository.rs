// src/repositories/settings_repository.rs
//
// Threshold settings persistence.
//
// The settings row is a keyed singleton (id fixed at 1, CHECK-enforced).
// Lazy initialization and the explicit update both go through conflict-
// tolerant statements, so concurrent first reads cannot duplicate the row.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::Arc;

use crate::db::ConnectionPool;
use crate::domain::ThresholdSettings;
use crate::error::{AppError, AppResult};

/// Fixed primary key of the singleton row.
const SETTINGS_ROW_ID: i64 = 1;

#[cfg_attr(test, mockall::automock)]
pub trait SettingsRepository: Send + Sync {
    /// Read the singleton, creating it with defaults on first use.
    fn get_or_init(&self) -> AppResult<ThresholdSettings>;
    /// Insert-or-update the singleton.
    fn upsert(&self, settings: &ThresholdSettings) -> AppResult<()>;
}

pub struct SqliteSettingsRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteSettingsRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_settings(row: &Row) -> Result<ThresholdSettings, rusqlite::Error> {
        let updated_at_str: String = row.get("updated_at")?;
        let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(ThresholdSettings {
            min_pending_items: row.get("min_pending_items")?,
            updated_at,
        })
    }

    fn query_current(conn: &Connection) -> AppResult<Option<ThresholdSettings>> {
        let mut stmt = conn.prepare(
            "SELECT min_pending_items, updated_at
             FROM fulfillment_settings
             WHERE id = ?1",
        )?;

        match stmt.query_row(params![SETTINGS_ROW_ID], Self::row_to_settings) {
            Ok(settings) => Ok(Some(settings)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

impl SettingsRepository for SqliteSettingsRepository {
    fn get_or_init(&self) -> AppResult<ThresholdSettings> {
        let conn = self.pool.get()?;

        if let Some(settings) = Self::query_current(&conn)? {
            return Ok(settings);
        }

        let defaults = ThresholdSettings::default();
        conn.execute(
            "INSERT OR IGNORE INTO fulfillment_settings (id, min_pending_items, updated_at)
             VALUES (?1, ?2, ?3)",
            params![
                SETTINGS_ROW_ID,
                defaults.min_pending_items,
                defaults.updated_at.to_rfc3339(),
            ],
        )?;

        // A concurrent initializer may have won; read whichever row survived.
        Self::query_current(&conn)?.ok_or_else(|| {
            AppError::Other("Failed to initialize fulfillment settings".to_string())
        })
    }

    fn upsert(&self, settings: &ThresholdSettings) -> AppResult<()> {
        let conn = self.pool.get()?;

        conn.execute(
            "INSERT INTO fulfillment_settings (id, min_pending_items, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                 min_pending_items = excluded.min_pending_items,
                 updated_at = excluded.updated_at",
            params![
                SETTINGS_ROW_ID,
                settings.min_pending_items,
                settings.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }
}
