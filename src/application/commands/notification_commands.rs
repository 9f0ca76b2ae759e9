// src/application/commands/notification_commands.rs

use uuid::Uuid;

use crate::application::state::AppState;
use crate::domain::Identity;
use crate::error::AppResult;

/// Dismiss one of the caller's notifications
pub fn mark_notification_read(
    state: &AppState,
    identity: &Identity,
    notification_id: &str,
) -> AppResult<()> {
    let id = Uuid::parse_str(notification_id)?;

    state.notifications.mark_read(identity, id)
}
