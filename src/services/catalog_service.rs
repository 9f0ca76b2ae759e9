// src/services/catalog_service.rs
//
// Orderer-gated catalog maintenance.

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{validate_item, Identity, Item};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, ItemCreated, ItemDeleted, ItemUpdated};
use crate::repositories::ItemRepository;
use crate::services::require_orderer;

/// Category used when find-or-create is called without one.
const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone)]
pub struct UpsertItemRequest {
    /// `None` creates; `Some` edits that item.
    pub id: Option<Uuid>,
    pub name: String,
    pub category: String,
    pub is_evergreen: bool,
}

pub struct CatalogService {
    item_repo: Arc<dyn ItemRepository>,
    event_bus: Arc<EventBus>,
}

impl CatalogService {
    pub fn new(item_repo: Arc<dyn ItemRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            item_repo,
            event_bus,
        }
    }

    /// Create or edit a catalog item. A duplicate `(name, category)` surfaces
    /// as `AppError::Conflict`.
    pub fn upsert_item(&self, identity: &Identity, request: UpsertItemRequest) -> AppResult<Item> {
        require_orderer(identity)?;

        match request.id {
            Some(item_id) => {
                let mut item = self
                    .item_repo
                    .get_by_id(item_id)?
                    .ok_or_else(|| AppError::NotFound("Item not found.".to_string()))?;

                item.update(&request.name, &request.category, request.is_evergreen);
                validate_item(&item)?;
                self.item_repo.update(&item)?;

                self.event_bus.emit(ItemUpdated::new(item.id));
                Ok(item)
            }
            None => {
                let item = Item::new(&request.name, &request.category, request.is_evergreen);
                validate_item(&item)?;
                self.item_repo.insert(&item)?;

                self.event_bus.emit(ItemCreated::new(
                    item.id,
                    item.name.clone(),
                    item.category.clone(),
                    item.is_evergreen,
                ));
                Ok(item)
            }
        }
    }

    pub fn delete_item(&self, identity: &Identity, item_id: Uuid) -> AppResult<()> {
        require_orderer(identity)?;

        self.item_repo.delete(item_id)?;

        self.event_bus.emit(ItemDeleted::new(item_id));
        Ok(())
    }

    /// Case-insensitive lookup on `(name, category)`, creating a
    /// non-evergreen item on a miss. The category defaults to "General".
    pub fn find_or_create_item(
        &self,
        identity: &Identity,
        name: &str,
        category: Option<&str>,
    ) -> AppResult<Item> {
        require_orderer(identity)?;

        let category = category
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);

        let candidate = Item::new(name, category, false);
        validate_item(&candidate)?;

        if let Some(existing) = self
            .item_repo
            .find_by_name_category(&candidate.name, &candidate.category)?
        {
            return Ok(existing);
        }

        match self.item_repo.insert(&candidate) {
            Ok(()) => {
                self.event_bus.emit(ItemCreated::new(
                    candidate.id,
                    candidate.name.clone(),
                    candidate.category.clone(),
                    candidate.is_evergreen,
                ));
                Ok(candidate)
            }
            Err(AppError::Conflict(_)) => {
                // Lost the lookup/insert race; the winner is authoritative.
                self.item_repo
                    .find_by_name_category(&candidate.name, &candidate.category)?
                    .ok_or_else(|| {
                        AppError::Other("Item vanished after conflicting insert".to_string())
                    })
            }
            Err(e) => Err(e),
        }
    }
}
