// src/application/commands/request_commands.rs

use uuid::Uuid;

use crate::application::dto::AddRequestResultDto;
use crate::application::state::AppState;
use crate::domain::Identity;
use crate::error::AppResult;

/// Put an item on the current list. Idempotent: re-adding reports
/// `already_on_list` instead of failing.
pub fn add_request(
    state: &AppState,
    identity: &Identity,
    item_id: &str,
) -> AppResult<AddRequestResultDto> {
    let id = Uuid::parse_str(item_id)?;

    let outcome = state.requests.add_request(identity, id)?;

    Ok(AddRequestResultDto::from(outcome))
}

/// Take an active request off the list (any authenticated user)
pub fn cancel_request(state: &AppState, identity: &Identity, request_id: &str) -> AppResult<()> {
    let id = Uuid::parse_str(request_id)?;

    state.requests.cancel_request(identity, id)
}
