// src/services/catalog_service_tests.rs
//
// CATALOG, SETTINGS, DIRECTORY AND NOTIFICATION SCOPING TESTS

use crate::domain::UserRole;
use crate::error::AppError;
use crate::services::test_support::{seed_identities, seed_item, test_state};
use crate::services::UpsertItemRequest;
use crate::application::state::{AppConfig, AppState};
use uuid::Uuid;

#[test]
fn test_catalog_mutations_are_orderer_only() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    let item = seed_item(&state, &orderer, "Tea", false);

    let upsert = state.catalog.upsert_item(
        &colleague,
        UpsertItemRequest {
            id: None,
            name: "Sugar".to_string(),
            category: "Kitchen".to_string(),
            is_evergreen: false,
        },
    );
    assert!(matches!(upsert.unwrap_err(), AppError::ForbiddenRole));

    let delete = state.catalog.delete_item(&colleague, item.id);
    assert!(matches!(delete.unwrap_err(), AppError::ForbiddenRole));

    let find = state
        .catalog
        .find_or_create_item(&colleague, "Sugar", None);
    assert!(matches!(find.unwrap_err(), AppError::ForbiddenRole));

    let threshold = state.settings.update_threshold(&colleague, 3);
    assert!(matches!(threshold.unwrap_err(), AppError::ForbiddenRole));
}

#[test]
fn test_upsert_trims_and_rejects_empty_fields() {
    let (_dir, state) = test_state();
    let (orderer, _) = seed_identities(&state);

    let item = state
        .catalog
        .upsert_item(
            &orderer,
            UpsertItemRequest {
                id: None,
                name: "  Milk  ".to_string(),
                category: " Kitchen ".to_string(),
                is_evergreen: false,
            },
        )
        .unwrap();
    assert_eq!(item.name, "Milk");
    assert_eq!(item.category, "Kitchen");

    let empty_name = state.catalog.upsert_item(
        &orderer,
        UpsertItemRequest {
            id: None,
            name: "   ".to_string(),
            category: "Kitchen".to_string(),
            is_evergreen: false,
        },
    );
    let err = empty_name.unwrap_err();
    assert_eq!(err.kind(), "invalid-input");
    assert!(matches!(err, AppError::Domain(_)));

    let empty_category = state.catalog.upsert_item(
        &orderer,
        UpsertItemRequest {
            id: None,
            name: "Milk".to_string(),
            category: "  ".to_string(),
            is_evergreen: false,
        },
    );
    assert!(matches!(empty_category.unwrap_err(), AppError::Domain(_)));
}

#[test]
fn test_duplicate_name_category_is_a_conflict() {
    let (_dir, state) = test_state();
    let (orderer, _) = seed_identities(&state);
    seed_item(&state, &orderer, "Tea", false);

    let duplicate = state.catalog.upsert_item(
        &orderer,
        UpsertItemRequest {
            id: None,
            name: "Tea".to_string(),
            category: "Kitchen".to_string(),
            is_evergreen: true,
        },
    );
    let err = duplicate.unwrap_err();
    assert_eq!(err.http_status(), 409);
    assert!(matches!(err, AppError::Conflict(_)));

    // Same name in a different category is fine
    state
        .catalog
        .upsert_item(
            &orderer,
            UpsertItemRequest {
                id: None,
                name: "Tea".to_string(),
                category: "Office".to_string(),
                is_evergreen: false,
            },
        )
        .unwrap();
}

#[test]
fn test_upsert_with_id_edits_the_item() {
    let (_dir, state) = test_state();
    let (orderer, _) = seed_identities(&state);
    let item = seed_item(&state, &orderer, "Tea", false);

    let edited = state
        .catalog
        .upsert_item(
            &orderer,
            UpsertItemRequest {
                id: Some(item.id),
                name: "Green tea".to_string(),
                category: "Kitchen".to_string(),
                is_evergreen: true,
            },
        )
        .unwrap();
    assert_eq!(edited.id, item.id);
    assert_eq!(edited.name, "Green tea");
    assert!(edited.is_evergreen);

    let missing = state.catalog.upsert_item(
        &orderer,
        UpsertItemRequest {
            id: Some(Uuid::new_v4()),
            name: "Ghost".to_string(),
            category: "Kitchen".to_string(),
            is_evergreen: false,
        },
    );
    assert!(matches!(missing.unwrap_err(), AppError::NotFound(_)));
}

#[test]
fn test_delete_item() {
    let (_dir, state) = test_state();
    let (orderer, _) = seed_identities(&state);
    let item = seed_item(&state, &orderer, "Tea", false);

    state.catalog.delete_item(&orderer, item.id).unwrap();

    let dashboard = state.dashboard.get_dashboard(&orderer).unwrap();
    assert!(dashboard.items.is_empty());

    let again = state.catalog.delete_item(&orderer, item.id);
    assert!(matches!(again.unwrap_err(), AppError::NotFound(_)));
}

#[test]
fn test_find_or_create_is_case_insensitive() {
    let (_dir, state) = test_state();
    let (orderer, _) = seed_identities(&state);
    let item = seed_item(&state, &orderer, "Coffee beans", true);

    let found = state
        .catalog
        .find_or_create_item(&orderer, "coffee BEANS", Some("kitchen"))
        .unwrap();
    assert_eq!(found.id, item.id);
    // The stored spelling wins
    assert_eq!(found.name, "Coffee beans");
    assert!(found.is_evergreen);
}

#[test]
fn test_find_or_create_defaults_category_and_creates_plain_items() {
    let (_dir, state) = test_state();
    let (orderer, _) = seed_identities(&state);

    let created = state
        .catalog
        .find_or_create_item(&orderer, "Stapler", None)
        .unwrap();
    assert_eq!(created.category, "General");
    assert!(!created.is_evergreen);

    // Blank category falls back to the default too
    let same = state
        .catalog
        .find_or_create_item(&orderer, "stapler", Some("  "))
        .unwrap();
    assert_eq!(same.id, created.id);
}

#[test]
fn test_threshold_settings_lazy_default_and_validation() {
    let (_dir, state) = test_state();
    let (orderer, _) = seed_identities(&state);

    // Lazily created with the default on first read
    let settings = state.settings.current().unwrap();
    assert_eq!(settings.min_pending_items, 5);

    let zero = state.settings.update_threshold(&orderer, 0);
    assert!(matches!(zero.unwrap_err(), AppError::Domain(_)));
    let negative = state.settings.update_threshold(&orderer, -2);
    assert!(matches!(negative.unwrap_err(), AppError::Domain(_)));

    let updated = state.settings.update_threshold(&orderer, 3).unwrap();
    assert_eq!(updated.min_pending_items, 3);
    assert_eq!(state.settings.current().unwrap().min_pending_items, 3);
}

#[test]
fn test_mark_notification_read_is_scoped_to_the_owner() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);

    let staple = seed_item(&state, &orderer, "Coffee beans", true);
    state.requests.add_request(&colleague, staple.id).unwrap();

    let feed = state.notifications.unread_for(orderer.id).unwrap();
    assert_eq!(feed.len(), 1);
    let notification_id = feed[0].id;

    // Someone else's notification is invisible to the caller
    let foreign = state.notifications.mark_read(&colleague, notification_id);
    assert!(matches!(foreign.unwrap_err(), AppError::NotFound(_)));

    state
        .notifications
        .mark_read(&orderer, notification_id)
        .unwrap();
    assert!(state.notifications.unread_for(orderer.id).unwrap().is_empty());

    // Unknown id
    let missing = state.notifications.mark_read(&orderer, Uuid::new_v4());
    assert!(matches!(missing.unwrap_err(), AppError::NotFound(_)));
}

#[test]
fn test_directory_bootstrap_and_allowlist_roles() {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::initialize(AppConfig {
        database_path: Some(dir.path().join("restock-test.db")),
        orderer_emails: vec!["Boss@Office.Test".to_string()],
    })
    .unwrap();

    // First user bootstraps as orderer even off the allowlist
    let first = state.users.get_or_create_user("ana@office.test").unwrap();
    assert_eq!(first.role, UserRole::Orderer);

    // Later users are colleagues...
    let second = state.users.get_or_create_user("ben@office.test").unwrap();
    assert_eq!(second.role, UserRole::Colleague);

    // ...unless allowlisted (emails compare normalized)
    let boss = state.users.get_or_create_user("boss@office.test").unwrap();
    assert_eq!(boss.role, UserRole::Orderer);

    // Lookup is idempotent and case-insensitive
    let same = state.users.get_or_create_user(" ANA@office.test ").unwrap();
    assert_eq!(same.id, first.id);

    let empty = state.users.get_or_create_user("   ");
    assert!(matches!(empty.unwrap_err(), AppError::InvalidInput(_)));
}

#[test]
fn test_require_user() {
    let (_dir, state) = test_state();
    let (orderer, _) = seed_identities(&state);

    let user = state.users.require_user(orderer.id).unwrap();
    assert_eq!(user.id, orderer.id);

    let missing = state.users.require_user(Uuid::new_v4());
    assert!(matches!(missing.unwrap_err(), AppError::NotFound(_)));
}
