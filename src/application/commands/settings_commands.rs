// src/application/commands/settings_commands.rs

use crate::application::dto::{ThresholdSettingsDto, UpdateThresholdDto};
use crate::application::state::AppState;
use crate::domain::Identity;
use crate::error::AppResult;

/// Change the distinct-item threshold (orderer only)
pub fn update_threshold(
    state: &AppState,
    identity: &Identity,
    dto: UpdateThresholdDto,
) -> AppResult<ThresholdSettingsDto> {
    let settings = state
        .settings
        .update_threshold(identity, dto.min_pending_items)?;

    Ok(ThresholdSettingsDto::from(settings))
}
