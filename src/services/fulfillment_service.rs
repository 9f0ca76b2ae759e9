// src/services/fulfillment_service.rs
//
// Closing out the current list into a historical order record.

use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Fulfillment, FulfillmentTrigger, Identity};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ListFulfilled};
use crate::repositories::{FulfilledRequestRow, FulfillmentRepository};
use crate::services::require_orderer;

/// Fulfillments shown in dashboard history.
const HISTORY_LIMIT: u32 = 20;

/// What the orderer gets back from closing out the list.
#[derive(Debug, Clone)]
pub struct FulfillmentReceipt {
    pub fulfillment_id: Uuid,
    pub fulfilled_count: u32,
    pub trigger: FulfillmentTrigger,
}

/// One past order with the requests it closed.
#[derive(Debug, Clone)]
pub struct FulfillmentWithRequests {
    pub fulfillment: Fulfillment,
    pub requests: Vec<FulfilledRequestRow>,
}

pub struct FulfillmentService {
    fulfillment_repo: Arc<dyn FulfillmentRepository>,
    event_bus: Arc<EventBus>,
}

impl FulfillmentService {
    pub fn new(fulfillment_repo: Arc<dyn FulfillmentRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            fulfillment_repo,
            event_bus,
        }
    }

    /// Atomically close out every active request. Orderer-only; an empty
    /// list is rejected before anything is written.
    pub fn fulfill_current_list(&self, identity: &Identity) -> AppResult<FulfillmentReceipt> {
        require_orderer(identity)?;

        let close_out = self
            .fulfillment_repo
            .close_out_active()?
            .ok_or(AppError::EmptyList)?;

        log::info!(
            "fulfilled {} request(s) as {} ({})",
            close_out.fulfilled_count,
            close_out.fulfillment.id,
            close_out.fulfillment.trigger
        );

        self.event_bus.emit(ListFulfilled::new(
            close_out.fulfillment.id,
            close_out.fulfillment.trigger.to_string(),
            close_out.fulfilled_count,
        ));

        Ok(FulfillmentReceipt {
            fulfillment_id: close_out.fulfillment.id,
            fulfilled_count: close_out.fulfilled_count,
            trigger: close_out.fulfillment.trigger,
        })
    }

    /// Recent fulfillments, newest first, each with its closed requests.
    pub fn history(&self) -> AppResult<Vec<FulfillmentWithRequests>> {
        let recent = self.fulfillment_repo.list_recent_fulfilled(HISTORY_LIMIT)?;
        if recent.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = recent.iter().map(|f| f.id).collect();
        let rows = self.fulfillment_repo.list_requests_for(&ids)?;

        let mut grouped: HashMap<Uuid, Vec<FulfilledRequestRow>> = HashMap::new();
        for row in rows {
            grouped.entry(row.fulfillment_id).or_default().push(row);
        }

        Ok(recent
            .into_iter()
            .map(|fulfillment| {
                let requests = grouped.remove(&fulfillment.id).unwrap_or_default();
                FulfillmentWithRequests {
                    fulfillment,
                    requests,
                }
            })
            .collect())
    }
}
