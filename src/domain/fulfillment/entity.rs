use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The historical record of one order: the atomic close-out of every request
/// that was active at that moment.
///
/// Immutable once created. In this model `status` is always written as
/// `fulfilled` at creation; no partial fulfillment state is ever observed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fulfillment {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Why this order was classified the way it was (summary over the batch,
    /// independent of any per-addition trigger decisions)
    pub trigger: FulfillmentTrigger,

    /// Always `Fulfilled` under the current model; the enum mirrors the store
    pub status: FulfillmentStatus,

    /// When the order was placed
    pub fulfilled_at: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// The reason a notification or fulfillment was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentTrigger {
    Immediate,
    Threshold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentStatus {
    Pending,
    Fulfilled,
}

impl Fulfillment {
    /// Create a fulfillment record stamped as fulfilled now.
    pub fn new(trigger: FulfillmentTrigger) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            trigger,
            status: FulfillmentStatus::Fulfilled,
            fulfilled_at: Some(now),
            created_at: now,
        }
    }
}

impl std::fmt::Display for FulfillmentTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FulfillmentTrigger::Immediate => write!(f, "immediate"),
            FulfillmentTrigger::Threshold => write!(f, "threshold"),
        }
    }
}

impl std::fmt::Display for FulfillmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FulfillmentStatus::Pending => write!(f, "pending"),
            FulfillmentStatus::Fulfilled => write!(f, "fulfilled"),
        }
    }
}
