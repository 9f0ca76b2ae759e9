// src/repositories/user_repository.rs
//
// User directory persistence

use chrono::{DateTime, Utc};
use rusqlite::{params, Row};
use std::sync::Arc;
use uuid::Uuid;

use crate::db::ConnectionPool;
use crate::domain::{User, UserRole};
use crate::error::{AppError, AppResult};
use crate::repositories::is_unique_violation;

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a duplicate email surfaces as `AppError::Conflict`.
    fn insert(&self, user: &User) -> AppResult<()>;
    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>>;
    /// Lookup by normalized email.
    fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;
    /// Every user holding the orderer role (notification fan-out targets).
    fn list_orderers(&self) -> AppResult<Vec<User>>;
    fn count(&self) -> AppResult<u64>;
}

pub struct SqliteUserRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteUserRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to User - returns rusqlite::Error for query_map compatibility
    fn row_to_user(row: &Row) -> Result<User, rusqlite::Error> {
        let id_str: String = row.get("id")?;
        let id = Uuid::parse_str(&id_str)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let role_str: String = row.get("role")?;
        let role = match role_str.as_str() {
            "orderer" => UserRole::Orderer,
            "colleague" => UserRole::Colleague,
            _ => return Err(rusqlite::Error::InvalidQuery),
        };

        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        Ok(User {
            id,
            email: row.get("email")?,
            role,
            created_at,
        })
    }
}

impl UserRepository for SqliteUserRepository {
    fn insert(&self, user: &User) -> AppResult<()> {
        let conn = self.pool.get()?;

        let result = conn.execute(
            "INSERT INTO users (id, email, role, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id.to_string(),
                user.email,
                user.role.to_string(),
                user.created_at.to_rfc3339(),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AppError::Conflict(
                "A user with this email already exists.".to_string(),
            )),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, email, role, created_at FROM users WHERE id = ?1")?;

        match stmt.query_row(params![id.to_string()], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let conn = self.pool.get()?;

        let mut stmt =
            conn.prepare("SELECT id, email, role, created_at FROM users WHERE email = ?1")?;

        match stmt.query_row(params![email], Self::row_to_user) {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(AppError::Database(e)),
        }
    }

    fn list_orderers(&self) -> AppResult<Vec<User>> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, email, role, created_at
             FROM users
             WHERE role = 'orderer'
             ORDER BY created_at",
        )?;

        let users: Vec<User> = stmt
            .query_map([], Self::row_to_user)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    fn count(&self) -> AppResult<u64> {
        let conn = self.pool.get()?;

        let count: u64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;

        Ok(count)
    }
}
