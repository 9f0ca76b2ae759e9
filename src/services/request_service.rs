// src/services/request_service.rs
//
// The request ledger: the one place requests enter and leave the current
// list. The trigger engine is consulted exactly once per newly created
// request; idempotent re-adds never fire it.

use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{
    trigger_for_addition, FulfillmentTrigger, Identity, NotificationKind, Request,
};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, RequestAdded, RequestCancelled};
use crate::repositories::{
    ActiveRequestRow, InsertOutcome, ItemRepository, RequestRepository, SettingsRepository,
};
use crate::services::NotificationService;

/// Outcome of an add, returned to the caller so UI layers can react without
/// re-querying.
#[derive(Debug, Clone)]
pub struct AddRequestOutcome {
    pub already_on_list: bool,
    pub trigger: Option<FulfillmentTrigger>,
    pub current_distinct_items: u32,
}

pub struct RequestService {
    request_repo: Arc<dyn RequestRepository>,
    item_repo: Arc<dyn ItemRepository>,
    settings_repo: Arc<dyn SettingsRepository>,
    notifications: Arc<NotificationService>,
    event_bus: Arc<EventBus>,
}

impl RequestService {
    pub fn new(
        request_repo: Arc<dyn RequestRepository>,
        item_repo: Arc<dyn ItemRepository>,
        settings_repo: Arc<dyn SettingsRepository>,
        notifications: Arc<NotificationService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            request_repo,
            item_repo,
            settings_repo,
            notifications,
            event_bus,
        }
    }

    /// Put an item on the current list.
    ///
    /// The insert is attempted unconditionally; losing the uniqueness race
    /// lands in the same `already_on_list` path as an ordinary duplicate add.
    pub fn add_request(&self, identity: &Identity, item_id: Uuid) -> AppResult<AddRequestOutcome> {
        let item = self
            .item_repo
            .get_by_id(item_id)?
            .ok_or_else(|| AppError::NotFound("Item not found.".to_string()))?;

        let request = Request::new(item.id, identity.id);

        match self.request_repo.insert_active(&request)? {
            InsertOutcome::AlreadyActive(_) => {
                log::debug!("item {} is already on the current list", item.id);
                Ok(AddRequestOutcome {
                    already_on_list: true,
                    trigger: None,
                    current_distinct_items: self.request_repo.count_distinct_active_items()?,
                })
            }
            InsertOutcome::Created(request) => {
                let settings = self.settings_repo.get_or_init()?;
                let current_distinct_items = self.request_repo.count_distinct_active_items()?;

                let trigger = trigger_for_addition(
                    item.is_evergreen,
                    current_distinct_items,
                    settings.min_pending_items,
                );

                match trigger {
                    Some(FulfillmentTrigger::Immediate) => {
                        self.notifications.notify_orderers(
                            NotificationKind::Immediate,
                            "Staple added - order now".to_string(),
                            Some(json!({
                                "itemId": item.id,
                                "itemName": item.name,
                                "requesterId": identity.id,
                            })),
                        )?;
                    }
                    Some(FulfillmentTrigger::Threshold) => {
                        self.notifications.notify_orderers(
                            NotificationKind::Threshold,
                            format!(
                                "List reached {} items - place order",
                                settings.min_pending_items
                            ),
                            Some(json!({
                                "currentDistinctItems": current_distinct_items,
                                "minPendingItems": settings.min_pending_items,
                            })),
                        )?;
                    }
                    None => {}
                }

                self.event_bus.emit(RequestAdded::new(
                    request.id,
                    item.id,
                    identity.id,
                    trigger.map(|t| t.to_string()),
                    current_distinct_items,
                ));

                Ok(AddRequestOutcome {
                    already_on_list: false,
                    trigger,
                    current_distinct_items,
                })
            }
        }
    }

    /// Take a request off the list. Open to any authenticated user; only
    /// active requests can be cancelled.
    pub fn cancel_request(&self, _identity: &Identity, request_id: Uuid) -> AppResult<()> {
        self.request_repo.delete_active(request_id)?;

        self.event_bus.emit(RequestCancelled::new(request_id));

        Ok(())
    }

    /// The current list, most recent first.
    pub fn active_list(&self) -> AppResult<Vec<ActiveRequestRow>> {
        self.request_repo.list_active()
    }
}
