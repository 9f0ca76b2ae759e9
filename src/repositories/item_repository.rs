// src/repositories/item_repository.rs
//
// Catalog item persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::Item;
use crate::error::{AppError, AppResult};
use crate::repositories::is_unique_violation;

#[cfg_attr(test, mockall::automock)]
pub trait ItemRepository: Send + Sync {
    /// Insert a new item; a duplicate `(name, category)` surfaces as
    /// `AppError::Conflict`.
    fn insert(&self, item: &Item) -> AppResult<()>;
    /// Update name/category/evergreen of an existing item.
    fn update(&self, item: &Item) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Item>>;
    /// Case-insensitive lookup on `(name, category)`.
    fn find_by_name_category(&self, name: &str, category: &str) -> AppResult<Option<Item>>;
    fn list_all(&self) -> AppResult<Vec<Item>>;
    fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub struct SqliteItemRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteItemRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Item - returns rusqlite::Error for query_map compatibility
    fn row_to_item(row: &Row) -> Result<Item, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(Item {
            id,
            name: row.get("name")?,
            category: row.get("category")?,
            is_evergreen: row.get("is_evergreen")?,
            created_at,
        })
    }
}

impl ItemRepository for SqliteItemRepository {
    fn insert(&self, item: &Item) -> AppResult<()> {
        let conn = self.pool.get()?;

        let result = conn.execute(
            "INSERT INTO items (id, name, category, is_evergreen, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                item.id.to_string(),
                item.name,
                item.category,
                item.is_evergreen,
                item.created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(
                "An item with this name and category already exists.".to_string(),
            )),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn update(&self, item: &Item) -> AppResult<()> {
        let conn = self.pool.get()?;

        let result = conn.execute(
            "UPDATE items SET name = ?2, category = ?3, is_evergreen = ?4 WHERE id = ?1",
            params![
                item.id.to_string(),
                item.name,
                item.category,
                item.is_evergreen,
            ],
        );

        match result {
            Ok(0) => Err(AppError::NotFound("Item not found.".to_string())),
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(
                "An item with this name and category already exists.".to_string(),
            )),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<Item>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, category, is_evergreen, created_at
             FROM items WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], Self::row_to_item) {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_name_category(&self, name: &str, category: &str) -> AppResult<Option<Item>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, category, is_evergreen, created_at
             FROM items
             WHERE lower(name) = lower(?1) AND lower(category) = lower(?2)
             LIMIT 1",
        )?;

        match stmt.query_row(params![name, category], Self::row_to_item) {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_all(&self) -> AppResult<Vec<Item>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, category, is_evergreen, created_at
             FROM items
             ORDER BY name",
        )?;

        let items: Vec<Item> = stmt
            .query_map([], Self::row_to_item)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(items)
    }

    fn delete(&self, id: Uuid) -> AppResult<()> {
        let conn = self.pool.get()?;

        let rows_affected = conn.execute("DELETE FROM items WHERE id = ?1", params![id.to_string()])?;

        if rows_affected == 0 {
            return Err(AppError::NotFound("Item not found.".to_string()));
        }

        Ok(())
    }
}
