// src/services/test_support.rs
//
// Shared harness for pool-backed service tests: a real SQLite database in a
// temp directory, wired through AppState so tests exercise the same stack
// the embedding application gets.

use tempfile::TempDir;

use crate::application::state::{AppConfig, AppState};
use crate::domain::{Identity, Item};
use crate::services::UpsertItemRequest;

pub fn test_state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = AppConfig {
        database_path: Some(dir.path().join("restock-test.db")),
        orderer_emails: Vec::new(),
    };
    let state = AppState::initialize(config).expect("app state");
    (dir, state)
}

/// The first user bootstraps as orderer, the second as colleague.
pub fn seed_identities(state: &AppState) -> (Identity, Identity) {
    let orderer = state
        .users
        .get_or_create_user("orderer@office.test")
        .expect("orderer")
        .identity();
    let colleague = state
        .users
        .get_or_create_user("colleague@office.test")
        .expect("colleague")
        .identity();
    (orderer, colleague)
}

pub fn seed_item(state: &AppState, orderer: &Identity, name: &str, is_evergreen: bool) -> Item {
    state
        .catalog
        .upsert_item(
            orderer,
            UpsertItemRequest {
                id: None,
                name: name.to_string(),
                category: "Kitchen".to_string(),
                is_evergreen,
            },
        )
        .expect("item")
}
