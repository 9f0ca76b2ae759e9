// src/services/dashboard_service.rs
//
// Read-model composition for the UI: everything one page load needs.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Identity, Item, Notification};
use crate::error::AppResult;
use crate::repositories::{ActiveRequestRow, ItemRepository, RequestRepository, SettingsRepository};
use crate::services::{FulfillmentService, FulfillmentWithRequests, NotificationService};

#[derive(Debug, Clone)]
pub struct ThresholdSummary {
    pub min_pending_items: u32,
    pub current_distinct_items: u32,
    pub remaining_until_threshold: u32,
}

pub struct DashboardData {
    pub items: Vec<Item>,
    pub current_list: Vec<ActiveRequestRow>,
    pub threshold: ThresholdSummary,
    /// Unread feed; empty for colleagues.
    pub notifications: Vec<Notification>,
    /// Order history with nested requests; empty for colleagues.
    pub past_fulfillments: Vec<FulfillmentWithRequests>,
}

pub struct DashboardService {
    item_repo: Arc<dyn ItemRepository>,
    request_repo: Arc<dyn RequestRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    notifications: Arc<NotificationService>,
    fulfillments: Arc<FulfillmentService>,
}

impl DashboardService {
    pub fn new(
        item_repo: Arc<dyn ItemRepository>,
        request_repo: Arc<dyn RequestRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        notifications: Arc<NotificationService>,
        fulfillments: Arc<FulfillmentService>,
    ) -> Self {
        Self {
            item_repo,
            request_repo,
            settings_repo,
            notifications,
            fulfillments,
        }
    }

    pub fn get_dashboard(&self, identity: &Identity) -> AppResult<DashboardData> {
        let items = self.item_repo.list_all()?;
        let current_list = self.request_repo.list_active()?;
        let settings = self.settings_repo.get_or_init()?;

        // Distinct over the list we already fetched; no second query.
        let current_distinct_items = current_list
            .iter()
            .map(|row| row.request.item_id)
            .collect::<HashSet<_>>()
            .len() as u32;

        let threshold = ThresholdSummary {
            min_pending_items: settings.min_pending_items,
            current_distinct_items,
            remaining_until_threshold: settings
                .min_pending_items
                .saturating_sub(current_distinct_items),
        };

        let notifications = if identity.is_orderer() {
            self.notifications.unread_for(identity.id)?
        } else {
            Vec::new()
        };

        let past_fulfillments = if identity.is_orderer() {
            self.fulfillments.history()?
        } else {
            Vec::new()
        };

        Ok(DashboardData {
            items,
            current_list,
            threshold,
            notifications,
            past_fulfillments,
        })
    }
}
