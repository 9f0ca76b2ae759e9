// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are wire-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::{Item, Notification, ThresholdSettings, User};
use crate::repositories::{ActiveRequestRow, FulfilledRequestRow};
use crate::services::{
    AddRequestOutcome, DashboardData, FulfillmentReceipt, FulfillmentWithRequests,
    ThresholdSummary,
};

// ============================================================================
// USER DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserDto {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDto {
    pub id: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            role: user.role.to_string(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// CATALOG DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDto {
    pub id: String,
    pub name: String,
    pub category: String,
    pub is_evergreen: bool,
    pub created_at: String,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name,
            category: item.category,
            is_evergreen: item.is_evergreen,
            created_at: item.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertItemDto {
    /// Absent to create, present to edit
    pub id: Option<String>,
    pub name: String,
    pub category: String,
    pub is_evergreen: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindOrCreateItemDto {
    pub name: String,
    pub category: Option<String>,
}

// ============================================================================
// REQUEST DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddRequestResultDto {
    pub already_on_list: bool,
    pub trigger: Option<String>,
    pub current_distinct_items: u32,
}

impl From<AddRequestOutcome> for AddRequestResultDto {
    fn from(outcome: AddRequestOutcome) -> Self {
        Self {
            already_on_list: outcome.already_on_list,
            trigger: outcome.trigger.map(|t| t.to_string()),
            current_distinct_items: outcome.current_distinct_items,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveRequestDto {
    pub id: String,
    pub status: String,
    pub created_at: String,
    pub item_id: String,
    pub item_name: String,
    pub item_category: String,
    pub item_is_evergreen: bool,
    pub requester_id: String,
    pub requester_email: String,
}

impl From<ActiveRequestRow> for ActiveRequestDto {
    fn from(row: ActiveRequestRow) -> Self {
        Self {
            id: row.request.id.to_string(),
            status: row.request.status.to_string(),
            created_at: row.request.created_at.to_rfc3339(),
            item_id: row.request.item_id.to_string(),
            item_name: row.item_name,
            item_category: row.item_category,
            item_is_evergreen: row.item_is_evergreen,
            requester_id: row.request.requester_id.to_string(),
            requester_email: row.requester_email,
        }
    }
}

// ============================================================================
// THRESHOLD DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateThresholdDto {
    pub min_pending_items: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSettingsDto {
    pub min_pending_items: u32,
    pub updated_at: String,
}

impl From<ThresholdSettings> for ThresholdSettingsDto {
    fn from(settings: ThresholdSettings) -> Self {
        Self {
            min_pending_items: settings.min_pending_items,
            updated_at: settings.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThresholdSummaryDto {
    pub min_pending_items: u32,
    pub current_distinct_items: u32,
    pub remaining_until_threshold: u32,
}

impl From<ThresholdSummary> for ThresholdSummaryDto {
    fn from(summary: ThresholdSummary) -> Self {
        Self {
            min_pending_items: summary.min_pending_items,
            current_distinct_items: summary.current_distinct_items,
            remaining_until_threshold: summary.remaining_until_threshold,
        }
    }
}

// ============================================================================
// NOTIFICATION DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationDto {
    pub id: String,
    pub kind: String,
    pub message: String,
    pub metadata: Option<serde_json::Value>,
    pub created_at: String,
}

impl From<Notification> for NotificationDto {
    fn from(notification: Notification) -> Self {
        Self {
            id: notification.id.to_string(),
            kind: notification.kind.to_string(),
            message: notification.message,
            metadata: notification.metadata,
            created_at: notification.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// FULFILLMENT DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentReceiptDto {
    pub fulfillment_id: String,
    pub fulfilled_count: u32,
    pub trigger: String,
}

impl From<FulfillmentReceipt> for FulfillmentReceiptDto {
    fn from(receipt: FulfillmentReceipt) -> Self {
        Self {
            fulfillment_id: receipt.fulfillment_id.to_string(),
            fulfilled_count: receipt.fulfilled_count,
            trigger: receipt.trigger.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfilledRequestDto {
    pub id: String,
    pub item_id: String,
    pub item_name: String,
    pub item_category: String,
    pub requester_email: String,
    pub created_at: String,
}

impl From<FulfilledRequestRow> for FulfilledRequestDto {
    fn from(row: FulfilledRequestRow) -> Self {
        Self {
            id: row.id.to_string(),
            item_id: row.item_id.to_string(),
            item_name: row.item_name,
            item_category: row.item_category,
            requester_email: row.requester_email,
            created_at: row.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FulfillmentDto {
    pub id: String,
    pub trigger: String,
    pub fulfilled_at: Option<String>,
    pub created_at: String,
    pub requests: Vec<FulfilledRequestDto>,
}

impl From<FulfillmentWithRequests> for FulfillmentDto {
    fn from(entry: FulfillmentWithRequests) -> Self {
        Self {
            id: entry.fulfillment.id.to_string(),
            trigger: entry.fulfillment.trigger.to_string(),
            fulfilled_at: entry.fulfillment.fulfilled_at.map(|dt| dt.to_rfc3339()),
            created_at: entry.fulfillment.created_at.to_rfc3339(),
            requests: entry.requests.into_iter().map(FulfilledRequestDto::from).collect(),
        }
    }
}

// ============================================================================
// DASHBOARD DTO
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDto {
    pub items: Vec<ItemDto>,
    pub current_list: Vec<ActiveRequestDto>,
    pub threshold: ThresholdSummaryDto,
    pub notifications: Vec<NotificationDto>,
    pub past_fulfillments: Vec<FulfillmentDto>,
}

impl From<DashboardData> for DashboardDto {
    fn from(data: DashboardData) -> Self {
        Self {
            items: data.items.into_iter().map(ItemDto::from).collect(),
            current_list: data
                .current_list
                .into_iter()
                .map(ActiveRequestDto::from)
                .collect(),
            threshold: ThresholdSummaryDto::from(data.threshold),
            notifications: data
                .notifications
                .into_iter()
                .map(NotificationDto::from)
                .collect(),
            past_fulfillments: data
                .past_fulfillments
                .into_iter()
                .map(FulfillmentDto::from)
                .collect(),
        }
    }
}
