// src/application/commands/catalog_commands.rs

use uuid::Uuid;

use crate::application::dto::{FindOrCreateItemDto, ItemDto, UpsertItemDto};
use crate::application::state::AppState;
use crate::domain::Identity;
use crate::error::AppResult;
use crate::services::UpsertItemRequest;

/// Create or edit a catalog item (orderer only)
pub fn upsert_item(
    state: &AppState,
    identity: &Identity,
    dto: UpsertItemDto,
) -> AppResult<ItemDto> {
    let id = dto.id.as_deref().map(Uuid::parse_str).transpose()?;

    let item = state.catalog.upsert_item(
        identity,
        UpsertItemRequest {
            id,
            name: dto.name,
            category: dto.category,
            is_evergreen: dto.is_evergreen,
        },
    )?;

    Ok(ItemDto::from(item))
}

/// Remove a catalog item (orderer only)
pub fn delete_item(state: &AppState, identity: &Identity, item_id: &str) -> AppResult<()> {
    let id = Uuid::parse_str(item_id)?;

    state.catalog.delete_item(identity, id)
}

/// Look an item up by name/category, creating it on a miss (orderer only)
pub fn find_or_create_item(
    state: &AppState,
    identity: &Identity,
    dto: FindOrCreateItemDto,
) -> AppResult<ItemDto> {
    let item = state
        .catalog
        .find_or_create_item(identity, &dto.name, dto.category.as_deref())?;

    Ok(ItemDto::from(item))
}
