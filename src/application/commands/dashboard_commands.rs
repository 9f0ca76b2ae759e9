// src/application/commands/dashboard_commands.rs

use crate::application::dto::DashboardDto;
use crate::application::state::AppState;
use crate::domain::Identity;
use crate::error::AppResult;

/// Everything one page load needs. Notification feed and order history are
/// filled in for orderers only.
pub fn get_dashboard(state: &AppState, identity: &Identity) -> AppResult<DashboardDto> {
    let data = state.dashboard.get_dashboard(identity)?;

    Ok(DashboardDto::from(data))
}
