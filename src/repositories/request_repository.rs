// src/repositories/request_repository.rs
//
// Request ledger persistence.
//
// The "one active request per item" invariant lives in the partial unique
// index `requests_one_active_per_item_uq`; this repository converts that
// index firing into the tagged `InsertOutcome::AlreadyActive` result.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{Request, RequestStatus};
use crate::error::{AppError, AppResult};
use crate::repositories::is_unique_violation;

/// Result of an unconditional active-request insert.
///
/// A uniqueness violation is an expected outcome, not an error: the caller
/// receives the surviving row instead of an exception used for control flow.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    Created(Request),
    AlreadyActive(Request),
}

/// One line of the current list: an active request joined with its item and
/// the requester's identity.
#[derive(Debug, Clone)]
pub struct ActiveRequestRow {
    pub request: Request,
    pub item_name: String,
    pub item_category: String,
    pub item_is_evergreen: bool,
    pub requester_email: String,
}

#[cfg_attr(test, mockall::automock)]
pub trait RequestRepository: Send + Sync {
    /// Attempt the insert unconditionally; the partial unique index decides
    /// the winner under a race.
    fn insert_active(&self, request: &Request) -> AppResult<InsertOutcome>;
    /// Delete a request only while it is active; `NotFound` otherwise.
    fn delete_active(&self, request_id: Uuid) -> AppResult<()>;
    /// The current list, most recent first. Recomputed on each call.
    fn list_active(&self) -> AppResult<Vec<ActiveRequestRow>>;
    /// Distinct items represented among active requests.
    fn count_distinct_active_items(&self) -> AppResult<u32>;
}

pub struct SqliteRequestRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteRequestRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Request - returns rusqlite::Error for query_map compatibility
    fn row_to_request(row: &Row) -> Result<Request, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let item_id_str: String = row.get("item_id")?;
        let item_id = Uuid::parse_str(&item_id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let requester_id_str: String = row.get("requester_id")?;
        let requester_id = Uuid::parse_str(&requester_id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let status_str: String = row.get("status")?;
        let status = match status_str.as_str() {
            "pending" => RequestStatus::Pending,
            "in_fulfillment" => RequestStatus::InFulfillment,
            "fulfilled" => RequestStatus::Fulfilled,
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        let fulfillment_id_str: Option<String> = row.get("fulfillment_id")?;
        let fulfillment_id = fulfillment_id_str
            .map(|s| {
                Uuid::parse_str(&s)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Request {
            id,
            item_id,
            requester_id,
            status,
            fulfillment_id,
            created_at,
        })
    }

    fn query_active_by_item(conn: &Connection, item_id: Uuid) -> AppResult<Option<Request>> {
        let mut stmt = conn.prepare(
            "SELECT id, item_id, requester_id, status, fulfillment_id, created_at
             FROM requests
             WHERE item_id = ?1
               AND status IN ('pending', 'in_fulfillment')
               AND fulfillment_id IS NULL
             LIMIT 1",
        )?;

        match stmt.query_row(params![item_id.to_string()], Self::row_to_request) {
            Ok(request) => Ok(Some(request)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

impl RequestRepository for SqliteRequestRepository {
    fn insert_active(&self, request: &Request) -> AppResult<InsertOutcome> {
        let conn = self.pool.get()?;

        // Two attempts cover the rare insert -> conflict -> cancel interleaving
        // where the winning row disappears before we can read it back.
        for _ in 0..2 {
            let result = conn.execute(
                "INSERT INTO requests (id, item_id, requester_id, status, fulfillment_id, created_at)
                 VALUES (?1, ?2, ?3, ?4, NULL, ?5)",
                params![
                    request.id.to_string(),
                    request.item_id.to_string(),
                    request.requester_id.to_string(),
                    request.status.to_string(),
                    request.created_at.to_rfc3339(),
                ],
            );

            match result {
                Ok(_) => return Ok(InsertOutcome::Created(request.clone())),
                Err(e) if is_unique_violation(&e) => {
                    if let Some(existing) = Self::query_active_by_item(&conn, request.item_id)? {
                        return Ok(InsertOutcome::AlreadyActive(existing));
                    }
                }
                Err(e) => return Err(AppError::Database(e)),
            }
        }

        Err(AppError::Other(
            "Could not settle the active-request insert".to_string(),
        ))
    }

    fn delete_active(&self, request_id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute(
            "DELETE FROM requests
             WHERE id = ?1
               AND status IN ('pending', 'in_fulfillment')
               AND fulfillment_id IS NULL",
            params![request_id.to_string()],
        )?;

        if rows_affected == 0 {
            return Err(AppError::NotFound("Request not found.".to_string()));
        }

        Ok(())
    }

    fn list_active(&self) -> AppResult<Vec<ActiveRequestRow>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT r.id AS id, r.item_id AS item_id, r.requester_id AS requester_id,
                    r.status AS status, r.fulfillment_id AS fulfillment_id,
                    r.created_at AS created_at,
                    i.name AS item_name, i.category AS item_category,
                    i.is_evergreen AS item_is_evergreen,
                    u.email AS requester_email
             FROM requests r
             INNER JOIN items i ON i.id = r.item_id
             INNER JOIN users u ON u.id = r.requester_id
             WHERE r.status IN ('pending', 'in_fulfillment')
               AND r.fulfillment_id IS NULL
             ORDER BY r.created_at DESC",
        )?;

        let rows: Vec<ActiveRequestRow> = stmt
            .query_map([], |row| {
                Ok(ActiveRequestRow {
                    request: Self::row_to_request(row)?,
                    item_name: row.get("item_name")?,
                    item_category: row.get("item_category")?,
                    item_is_evergreen: row.get("item_is_evergreen")?,
                    requester_email: row.get("requester_email")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    fn count_distinct_active_items(&self) -> AppResult<u32> {
        let conn = self.pool.get()?;

        let count: u32 = conn.query_row(
            "SELECT COUNT(DISTINCT item_id)
             FROM requests
             WHERE status IN ('pending', 'in_fulfillment') AND fulfillment_id IS NULL",
            [],
            |row| row.get(0),
        )?;

        Ok(count)
    }
}
