// src/repositories/notification_repository.rs
//
// Notification persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Notification, NotificationKind};
use crate::error::{AppError, AppResult};

#[cfg_attr(test, mockall::automock)]
pub trait NotificationRepository: Send + Sync {
    /// Insert a fan-out batch atomically (all orderers or none).
    fn insert_batch(&self, notifications: &[Notification]) -> AppResult<()>;
    /// Set `read_at`, scoped to the owning user; `NotFound` otherwise.
    fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<()>;
    /// Unread notifications for one user, newest first.
    fn list_unread(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<Notification>>;
}

pub struct SqliteNotificationRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteNotificationRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Notification - returns rusqlite::Error for query_map compatibility
    fn row_to_notification(row: &Row) -> Result<Notification, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let user_id_str: String = row.get("user_id")?;
        let user_id = Uuid::parse_str(&user_id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let kind_str: String = row.get("kind")?;
        let kind = match kind_str.as_str() {
            "immediate" => NotificationKind::Immediate,
            "threshold" => NotificationKind::Threshold,
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        let metadata_json: Option<String> = row.get("metadata")?;
        let metadata = metadata_json
            .map(|s| {
                serde_json::from_str(&s)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        let read_at_str: Option<String> = row.get("read_at")?;
        let read_at = read_at_str
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Notification {
            id,
            user_id,
            kind,
            message: row.get("message")?,
            metadata,
            read_at,
            created_at,
        })
    }
}

impl NotificationRepository for SqliteNotificationRepository {
    fn insert_batch(&self, notifications: &[Notification]) -> AppResult<()> {
        if notifications.is_empty() {
            return Ok(());
        }

        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        for notification in notifications {
            let metadata_json = notification
                .metadata
                .as_ref()
                .map(serde_json::to_string)
                .transpose()?;

            tx.execute(
                "INSERT INTO notifications (id, user_id, kind, message, metadata, read_at, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, NULL, ?6)",
                params![
                    notification.id.to_string(),
                    notification.user_id.to_string(),
                    notification.kind.to_string(),
                    notification.message,
                    metadata_json,
                    notification.created_at.to_rfc3339(),
                ],
            )?;
        }

        tx.commit()?;

        Ok(())
    }

    fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
        read_at: DateTime<Utc>,
    ) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "UPDATE notifications SET read_at = ?3 WHERE id = ?1 AND user_id = ?2",
            params![
                notification_id.to_string(),
                user_id.to_string(),
                read_at.to_rfc3339(),
            ],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound("Notification not found.".to_string()));
        }

        Ok(())
    }

    fn list_unread(&self, user_id: Uuid, limit: u32) -> AppResult<Vec<Notification>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, user_id, kind, message, metadata, read_at, created_at
             FROM notifications
             WHERE user_id = ?1 AND read_at IS NULL
             ORDER BY created_at DESC
             LIMIT ?2",
        )?;

        let notifications: Vec<Notification> = stmt
            .query_map(params![user_id.to_string(), limit], Self::row_to_notification)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(notifications)
    }
}
