// src/services/settings_service.rs
//
// The fulfillment-settings singleton.

use std::sync::Arc;

use crate::domain::{validate_min_pending_items, Identity, ThresholdSettings};
use crate::error::AppResult;
use crate::events::{EventBus, ThresholdUpdated};
use crate::repositories::SettingsRepository;
use crate::services::require_orderer;

pub struct SettingsService {
    settings_repo: Arc<dyn SettingsRepository>,
    event_bus: Arc<EventBus>,
}

impl SettingsService {
    pub fn new(settings_repo: Arc<dyn SettingsRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            settings_repo,
            event_bus,
        }
    }

    /// Orderer-only. The value must be an integer >= 1.
    pub fn update_threshold(&self, identity: &Identity, value: i64) -> AppResult<ThresholdSettings> {
        require_orderer(identity)?;

        let min_pending_items = validate_min_pending_items(value)?;

        let settings = ThresholdSettings::new(min_pending_items);
        self.settings_repo.upsert(&settings)?;

        log::info!("fulfillment threshold set to {}", min_pending_items);

        self.event_bus.emit(ThresholdUpdated::new(min_pending_items));

        Ok(settings)
    }

    /// Current settings, lazily created with the default threshold.
    pub fn current(&self) -> AppResult<ThresholdSettings> {
        self.settings_repo.get_or_init()
    }
}
