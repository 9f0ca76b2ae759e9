// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.
//
// CRITICAL RULES:
// - Events are facts, not commands
// - Events are immutable
// - Events carry only the data needed to react
// - No business logic in event types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// USER DIRECTORY EVENTS
// ============================================================================

/// Emitted when a new user is provisioned into the directory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProvisioned {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub user_id: Uuid,
    pub email: String,
    pub role: String, // "orderer" or "colleague"
}

impl UserProvisioned {
    pub fn new(user_id: Uuid, email: String, role: String) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            user_id,
            email,
            role,
        }
    }
}

impl DomainEvent for UserProvisioned {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "UserProvisioned"
    }
}

// ============================================================================
// CATALOG EVENTS
// ============================================================================

/// Emitted when a new catalog item is created
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCreated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub item_id: Uuid,
    pub name: String,
    pub category: String,
    pub is_evergreen: bool,
}

impl ItemCreated {
    pub fn new(item_id: Uuid, name: String, category: String, is_evergreen: bool) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            item_id,
            name,
            category,
            is_evergreen,
        }
    }
}

impl DomainEvent for ItemCreated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ItemCreated"
    }
}

/// Emitted when a catalog item's fields change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub item_id: Uuid,
}

impl ItemUpdated {
    pub fn new(item_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            item_id,
        }
    }
}

impl DomainEvent for ItemUpdated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ItemUpdated"
    }
}

/// Emitted when a catalog item is removed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDeleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub item_id: Uuid,
}

impl ItemDeleted {
    pub fn new(item_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            item_id,
        }
    }
}

impl DomainEvent for ItemDeleted {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ItemDeleted"
    }
}

// ============================================================================
// REQUEST LEDGER EVENTS
// ============================================================================

/// Emitted when a new request lands on the current list.
/// Idempotent re-adds do not emit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestAdded {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
    pub item_id: Uuid,
    pub requester_id: Uuid,
    /// "immediate", "threshold", or None when nothing fired
    pub trigger: Option<String>,
    pub distinct_active_items: u32,
}

impl RequestAdded {
    pub fn new(
        request_id: Uuid,
        item_id: Uuid,
        requester_id: Uuid,
        trigger: Option<String>,
        distinct_active_items: u32,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
            item_id,
            requester_id,
            trigger,
            distinct_active_items,
        }
    }
}

impl DomainEvent for RequestAdded {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "RequestAdded"
    }
}

/// Emitted when an active request is cancelled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCancelled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub request_id: Uuid,
}

impl RequestCancelled {
    pub fn new(request_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            request_id,
        }
    }
}

impl DomainEvent for RequestCancelled {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "RequestCancelled"
    }
}

// ============================================================================
// FULFILLMENT EVENTS
// ============================================================================

/// Emitted when the orderer closes out the current list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListFulfilled {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub fulfillment_id: Uuid,
    pub trigger: String, // "immediate" or "threshold"
    pub fulfilled_count: u32,
}

impl ListFulfilled {
    pub fn new(fulfillment_id: Uuid, trigger: String, fulfilled_count: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            fulfillment_id,
            trigger,
            fulfilled_count,
        }
    }
}

impl DomainEvent for ListFulfilled {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ListFulfilled"
    }
}

// ============================================================================
// SETTINGS EVENTS
// ============================================================================

/// Emitted when the orderer changes the notification threshold
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdUpdated {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub min_pending_items: u32,
}

impl ThresholdUpdated {
    pub fn new(min_pending_items: u32) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            min_pending_items,
        }
    }
}

impl DomainEvent for ThresholdUpdated {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ThresholdUpdated"
    }
}
