use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A member of the office, provisioned by the auth collaborator.
///
/// The core needs users for two reasons: notification fan-out targets every
/// orderer, and active-list rows join the requester's email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Normalized (trimmed, lowercased) email address; unique
    pub email: String,

    /// Authorization role
    pub role: UserRole,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Role-based authorization; there are no finer-grained permissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Orderer,
    Colleague,
}

/// The per-call identity object resolved by the request-handling layer.
#[derive(Debug, Clone, Copy)]
pub struct Identity {
    pub id: Uuid,
    pub role: UserRole,
}

impl User {
    /// Create a new User. The email must already be normalized.
    pub fn new(email: String, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            role,
            created_at: Utc::now(),
        }
    }

    pub fn identity(&self) -> Identity {
        Identity {
            id: self.id,
            role: self.role,
        }
    }
}

impl Identity {
    pub fn is_orderer(&self) -> bool {
        self.role == UserRole::Orderer
    }
}

/// Canonical email form used for lookups and the orderer allowlist.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Orderer => write!(f, "orderer"),
            UserRole::Colleague => write!(f, "colleague"),
        }
    }
}
