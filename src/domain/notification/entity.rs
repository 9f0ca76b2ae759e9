use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A "time to order" message for one orderer.
///
/// Created in batch, one per orderer, when a trigger fires. Mutated only to
/// set `read_at`; never deleted by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Internal immutable identifier
    pub id: Uuid,

    /// The orderer this copy belongs to
    pub user_id: Uuid,

    /// Which trigger produced it
    pub kind: NotificationKind,

    /// Human-readable message
    pub message: String,

    /// Structured payload (item id/name for immediate, counts for threshold)
    pub metadata: Option<serde_json::Value>,

    /// Set when the orderer dismisses it
    pub read_at: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Immediate,
    Threshold,
}

impl Notification {
    pub fn new(
        user_id: Uuid,
        kind: NotificationKind,
        message: String,
        metadata: Option<serde_json::Value>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            message,
            metadata,
            read_at: None,
            created_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Immediate => write!(f, "immediate"),
            NotificationKind::Threshold => write!(f, "threshold"),
        }
    }
}
