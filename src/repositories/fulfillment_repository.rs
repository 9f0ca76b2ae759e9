// src/repositories/fulfillment_repository.rs
//
// Fulfillment persistence.
//
// `close_out_active` is the one multi-statement atomic section in the
// system: snapshot, classify, insert, and close run inside a single rusqlite
// transaction on one pooled connection, so no request can join or leave the
// active set between the snapshot read and the batch update.

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{summary_trigger, Fulfillment, FulfillmentStatus, FulfillmentTrigger};
use crate::error::{AppError, AppResult};

/// Receipt of a successful close-out.
#[derive(Debug, Clone)]
pub struct FulfillmentCloseOut {
    pub fulfillment: Fulfillment,
    pub fulfilled_count: u32,
}

/// A closed request as shown in fulfillment history.
#[derive(Debug, Clone)]
pub struct FulfilledRequestRow {
    pub id: Uuid,
    pub fulfillment_id: Uuid,
    pub item_id: Uuid,
    pub item_name: String,
    pub item_category: String,
    pub requester_email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
pub trait FulfillmentRepository: Send + Sync {
    /// Atomically close out every active request into a new fulfillment.
    /// Returns `None` (and writes nothing) when the active set is empty.
    fn close_out_active(&self) -> AppResult<Option<FulfillmentCloseOut>>;
    /// Fulfilled records, newest first.
    fn list_recent_fulfilled(&self, limit: u32) -> AppResult<Vec<Fulfillment>>;
    /// The requests closed by the given fulfillments, newest first.
    fn list_requests_for(&self, fulfillment_ids: &[Uuid]) -> AppResult<Vec<FulfilledRequestRow>>;
}

pub struct SqliteFulfillmentRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteFulfillmentRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Fulfillment - returns rusqlite::Error for query_map compatibility
    fn row_to_fulfillment(row: &Row) -> Result<Fulfillment, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let trigger_str: String = row.get("trigger_kind")?;
        let trigger = match trigger_str.as_str() {
            "immediate" => FulfillmentTrigger::Immediate,
            "threshold" => FulfillmentTrigger::Threshold,
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        let status_str: String = row.get("status")?;
        let status = match status_str.as_str() {
            "pending" => FulfillmentStatus::Pending,
            "fulfilled" => FulfillmentStatus::Fulfilled,
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        let fulfilled_at_str: Option<String> = row.get("fulfilled_at")?;
        let fulfilled_at = fulfilled_at_str
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

        Ok(Fulfillment {
            id,
            trigger,
            status,
            fulfilled_at,
            created_at,
        })
    }

    fn row_to_fulfilled_request(row: &Row) -> Result<FulfilledRequestRow, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let fulfillment_id_str: String = row.get("fulfillment_id")?;
        let fulfillment_id = Uuid::parse_str(&fulfillment_id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let item_id_str: String = row.get("item_id")?;
        let item_id = Uuid::parse_str(&item_id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(FulfilledRequestRow {
            id,
            fulfillment_id,
            item_id,
            item_name: row.get("item_name")?,
            item_category: row.get("item_category")?,
            requester_email: row.get("requester_email")?,
            created_at,
        })
    }
}

impl FulfillmentRepository for SqliteFulfillmentRepository {
    fn close_out_active(&self) -> AppResult<Option<FulfillmentCloseOut>> {
        let mut conn = self.pool.get()?;
        let tx = conn.transaction()?;

        let snapshot: Vec<(String, bool)> = {
            let mut stmt = tx.prepare(
                "SELECT r.id, i.is_evergreen
                 FROM requests r
                 INNER JOIN items i ON i.id = r.item_id
                 WHERE r.status IN ('pending', 'in_fulfillment')
                   AND r.fulfillment_id IS NULL",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, bool>(1)?))
            })?;
            rows.collect::<Result<Vec<_>, _>>()?
        };

        if snapshot.is_empty() {
            // Nothing written yet; dropping the transaction rolls back.
            return Ok(None);
        }

        let any_evergreen = snapshot.iter().any(|(_, is_evergreen)| *is_evergreen);
        let fulfillment = Fulfillment::new(summary_trigger(any_evergreen));

        tx.execute(
            "INSERT INTO fulfillments (id, trigger_kind, status, fulfilled_at, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                fulfillment.id.to_string(),
                fulfillment.trigger.to_string(),
                fulfillment.status.to_string(),
                fulfillment.fulfilled_at.map(|dt| dt.to_rfc3339()),
                fulfillment.created_at.to_rfc3339(),
            ],
        )?;

        let closed = tx.execute(
            "UPDATE requests
             SET status = 'fulfilled', fulfillment_id = ?1
             WHERE status IN ('pending', 'in_fulfillment') AND fulfillment_id IS NULL",
            params![fulfillment.id.to_string()],
        )?;

        if closed != snapshot.len() {
            // Cannot happen inside one SQLite transaction; guard the contract anyway.
            return Err(AppError::Other(
                "Active set changed between snapshot and close-out".to_string(),
            ));
        }

        tx.commit()?;

        Ok(Some(FulfillmentCloseOut {
            fulfillment,
            fulfilled_count: closed as u32,
        }))
    }

    fn list_recent_fulfilled(&self, limit: u32) -> AppResult<Vec<Fulfillment>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, trigger_kind, status, fulfilled_at, created_at
             FROM fulfillments
             WHERE status = 'fulfilled'
             ORDER BY fulfilled_at DESC, created_at DESC
             LIMIT ?1",
        )?;

        let fulfillments: Vec<Fulfillment> = stmt
            .query_map(params![limit], Self::row_to_fulfillment)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(fulfillments)
    }

    fn list_requests_for(&self, fulfillment_ids: &[Uuid]) -> AppResult<Vec<FulfilledRequestRow>> {
        if fulfillment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let conn = self.pool.get()?;

        let placeholders = vec!["?"; fulfillment_ids.len()].join(", ");
        let sql = format!(
            "SELECT r.id AS id, r.fulfillment_id AS fulfillment_id, r.item_id AS item_id,
                    r.created_at AS created_at,
                    i.name AS item_name, i.category AS item_category,
                    u.email AS requester_email
             FROM requests r
             INNER JOIN items i ON i.id = r.item_id
             INNER JOIN users u ON u.id = r.requester_id
             WHERE r.fulfillment_id IN ({})
             ORDER BY r.created_at DESC",
            placeholders
        );

        let ids: Vec<String> = fulfillment_ids.iter().map(|id| id.to_string()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let rows: Vec<FulfilledRequestRow> = stmt
            .query_map(
                rusqlite::params_from_iter(ids.iter()),
                Self::row_to_fulfilled_request,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
