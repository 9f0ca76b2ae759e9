// src/application/commands/fulfillment_commands.rs

use crate::application::dto::FulfillmentReceiptDto;
use crate::application::state::AppState;
use crate::domain::Identity;
use crate::error::AppResult;

/// Close out the whole current list into one order record (orderer only)
pub fn fulfill_current_list(
    state: &AppState,
    identity: &Identity,
) -> AppResult<FulfillmentReceiptDto> {
    let receipt = state.fulfillments.fulfill_current_list(identity)?;

    Ok(FulfillmentReceiptDto::from(receipt))
}
