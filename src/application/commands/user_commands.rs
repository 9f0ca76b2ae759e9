// src/application/commands/user_commands.rs

use crate::application::dto::{RegisterUserDto, UserDto};
use crate::application::state::AppState;
use crate::error::AppResult;

/// Provisioning hook for the auth collaborator: called once an email has
/// been verified, before a session is issued.
pub fn register_user(state: &AppState, dto: RegisterUserDto) -> AppResult<UserDto> {
    let user = state.users.get_or_create_user(&dto.email)?;

    Ok(UserDto::from(user))
}
