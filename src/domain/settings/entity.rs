use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Threshold used when no settings row exists yet.
pub const DEFAULT_MIN_PENDING_ITEMS: u32 = 5;

/// The fulfillment-settings singleton: how many distinct items have to be on
/// the list before the "place an order" notification fires.
///
/// Stored as a single row with a fixed id; lazily created on first read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettings {
    /// Minimum distinct pending items before the threshold trigger fires
    pub min_pending_items: u32,

    /// Last change timestamp
    pub updated_at: DateTime<Utc>,
}

impl ThresholdSettings {
    pub fn new(min_pending_items: u32) -> Self {
        Self {
            min_pending_items,
            updated_at: Utc::now(),
        }
    }
}

impl Default for ThresholdSettings {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_PENDING_ITEMS)
    }
}
