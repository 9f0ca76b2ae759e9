// src/services/mod.rs
//
// Services Module - Orchestration Layer

pub mod catalog_service;
pub mod dashboard_service;
pub mod fulfillment_service;
pub mod notification_service;
pub mod request_service;
pub mod settings_service;
pub mod user_service;

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod catalog_service_tests;
#[cfg(test)]
mod request_service_tests;

// Re-export all services and their types
pub use catalog_service::{CatalogService, UpsertItemRequest};

pub use dashboard_service::{DashboardData, DashboardService, ThresholdSummary};

pub use fulfillment_service::{FulfillmentReceipt, FulfillmentService, FulfillmentWithRequests};

pub use notification_service::NotificationService;

pub use request_service::{AddRequestOutcome, RequestService};

pub use settings_service::SettingsService;

pub use user_service::{DirectoryConfig, UserService};

use crate::domain::Identity;
use crate::error::{AppError, AppResult};

/// Gate for orderer-only actions.
pub(crate) fn require_orderer(identity: &Identity) -> AppResult<()> {
    if !identity.is_orderer() {
        return Err(AppError::ForbiddenRole);
    }
    Ok(())
}
