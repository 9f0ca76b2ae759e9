// src/services/request_service_tests.rs
//
// REQUEST LEDGER TESTS
//
// PURPOSE:
// - Prove adds are idempotent: one active request per item, always
// - Prove the trigger engine fires exactly at the configured edge
// - Prove staples notify immediately, regardless of list size

use crate::domain::FulfillmentTrigger;
use crate::error::AppError;
use crate::services::test_support::{seed_identities, seed_item, test_state};
use uuid::Uuid;

#[test]
fn test_double_add_is_idempotent() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    let item = seed_item(&state, &orderer, "Coffee beans", false);

    let first = state.requests.add_request(&colleague, item.id).unwrap();
    assert!(!first.already_on_list);

    let second = state.requests.add_request(&colleague, item.id).unwrap();
    assert!(second.already_on_list);
    assert_eq!(second.trigger, None);

    // Another user re-adding the same item is idempotent too
    let third = state.requests.add_request(&orderer, item.id).unwrap();
    assert!(third.already_on_list);

    let list = state.requests.active_list().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].request.item_id, item.id);
}

#[test]
fn test_add_unknown_item_is_rejected() {
    let (_dir, state) = test_state();
    let (_, colleague) = seed_identities(&state);

    let err = state
        .requests
        .add_request(&colleague, Uuid::new_v4())
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_threshold_fires_exactly_at_the_edge() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    state.settings.update_threshold(&orderer, 3).unwrap();

    let first = seed_item(&state, &orderer, "Tea", false);
    let second = seed_item(&state, &orderer, "Sugar", false);
    let third = seed_item(&state, &orderer, "Oat milk", false);
    let fourth = seed_item(&state, &orderer, "Biscuits", false);

    let outcome = state.requests.add_request(&colleague, first.id).unwrap();
    assert_eq!(outcome.trigger, None);
    assert_eq!(outcome.current_distinct_items, 1);

    let outcome = state.requests.add_request(&colleague, second.id).unwrap();
    assert_eq!(outcome.trigger, None);
    assert_eq!(outcome.current_distinct_items, 2);

    let outcome = state.requests.add_request(&colleague, third.id).unwrap();
    assert_eq!(outcome.trigger, Some(FulfillmentTrigger::Threshold));
    assert_eq!(outcome.current_distinct_items, 3);

    // Past the edge: quiet again
    let outcome = state.requests.add_request(&colleague, fourth.id).unwrap();
    assert_eq!(outcome.trigger, None);
    assert_eq!(outcome.current_distinct_items, 4);
}

#[test]
fn test_idempotent_re_add_never_consults_the_trigger_engine() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    state.settings.update_threshold(&orderer, 2).unwrap();

    let first = seed_item(&state, &orderer, "Tea", false);
    let second = seed_item(&state, &orderer, "Sugar", false);

    state.requests.add_request(&colleague, first.id).unwrap();

    // The re-add must not move the count to the edge
    let re_add = state.requests.add_request(&colleague, first.id).unwrap();
    assert!(re_add.already_on_list);
    assert_eq!(re_add.trigger, None);
    assert_eq!(re_add.current_distinct_items, 1);

    let outcome = state.requests.add_request(&colleague, second.id).unwrap();
    assert_eq!(outcome.trigger, Some(FulfillmentTrigger::Threshold));
}

#[test]
fn test_evergreen_always_immediate() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    state.settings.update_threshold(&orderer, 3).unwrap();

    let staple = seed_item(&state, &orderer, "Coffee beans", true);
    let other = seed_item(&state, &orderer, "Tea", false);

    let outcome = state.requests.add_request(&colleague, staple.id).unwrap();
    assert_eq!(outcome.trigger, Some(FulfillmentTrigger::Immediate));

    // Still immediate after cancellation and re-add with a longer list
    state.requests.add_request(&colleague, other.id).unwrap();
    let list = state.requests.active_list().unwrap();
    let staple_request = list
        .iter()
        .find(|row| row.request.item_id == staple.id)
        .unwrap();
    state
        .requests
        .cancel_request(&colleague, staple_request.request.id)
        .unwrap();

    let outcome = state.requests.add_request(&colleague, staple.id).unwrap();
    assert_eq!(outcome.trigger, Some(FulfillmentTrigger::Immediate));
}

#[test]
fn test_mixed_staple_scenario_trigger_sequence() {
    // threshold=5, items A(evergreen), B..E plain, added in order.
    // A fires immediately but still counts toward the distinct total,
    // so the threshold fires on E.
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    state.settings.update_threshold(&orderer, 5).unwrap();

    let names = ["A", "B", "C", "D", "E"];
    let mut triggers = Vec::new();
    for (index, name) in names.iter().enumerate() {
        let item = seed_item(&state, &orderer, name, index == 0);
        let outcome = state.requests.add_request(&colleague, item.id).unwrap();
        triggers.push(outcome.trigger);
    }

    assert_eq!(
        triggers,
        vec![
            Some(FulfillmentTrigger::Immediate),
            None,
            None,
            None,
            Some(FulfillmentTrigger::Threshold),
        ]
    );
}

#[test]
fn test_triggers_write_notifications_for_orderers_only() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);

    let staple = seed_item(&state, &orderer, "Coffee beans", true);
    state.requests.add_request(&colleague, staple.id).unwrap();

    let orderer_feed = state.notifications.unread_for(orderer.id).unwrap();
    assert_eq!(orderer_feed.len(), 1);
    assert_eq!(orderer_feed[0].message, "Staple added - order now");
    let metadata = orderer_feed[0].metadata.as_ref().unwrap();
    assert_eq!(
        metadata.get("itemId").and_then(|v| v.as_str()),
        Some(staple.id.to_string().as_str())
    );

    let colleague_feed = state.notifications.unread_for(colleague.id).unwrap();
    assert!(colleague_feed.is_empty());
}

#[test]
fn test_threshold_notification_carries_counts() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    state.settings.update_threshold(&orderer, 2).unwrap();

    let first = seed_item(&state, &orderer, "Tea", false);
    let second = seed_item(&state, &orderer, "Sugar", false);
    state.requests.add_request(&colleague, first.id).unwrap();
    state.requests.add_request(&colleague, second.id).unwrap();

    let feed = state.notifications.unread_for(orderer.id).unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].message, "List reached 2 items - place order");
    let metadata = feed[0].metadata.as_ref().unwrap();
    assert_eq!(metadata.get("currentDistinctItems").and_then(|v| v.as_u64()), Some(2));
    assert_eq!(metadata.get("minPendingItems").and_then(|v| v.as_u64()), Some(2));
}

#[test]
fn test_cancel_request() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    let item = seed_item(&state, &orderer, "Tea", false);

    state.requests.add_request(&colleague, item.id).unwrap();
    let list = state.requests.active_list().unwrap();
    let request_id = list[0].request.id;

    state.requests.cancel_request(&colleague, request_id).unwrap();
    assert!(state.requests.active_list().unwrap().is_empty());

    // Cancelling again: the request is no longer active
    let err = state
        .requests
        .cancel_request(&colleague, request_id)
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn test_cancel_frees_the_active_slot() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    let item = seed_item(&state, &orderer, "Tea", false);

    state.requests.add_request(&colleague, item.id).unwrap();
    let request_id = state.requests.active_list().unwrap()[0].request.id;
    state.requests.cancel_request(&colleague, request_id).unwrap();

    let re_added = state.requests.add_request(&colleague, item.id).unwrap();
    assert!(!re_added.already_on_list);
}

#[test]
fn test_active_list_is_most_recent_first_with_joined_fields() {
    let (_dir, state) = test_state();
    let (orderer, colleague) = seed_identities(&state);
    let first = seed_item(&state, &orderer, "Tea", false);
    let second = seed_item(&state, &orderer, "Sugar", false);

    state.requests.add_request(&colleague, first.id).unwrap();
    state.requests.add_request(&orderer, second.id).unwrap();

    let list = state.requests.active_list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0].item_name, "Sugar");
    assert_eq!(list[0].requester_email, "orderer@office.test");
    assert_eq!(list[1].item_name, "Tea");
    assert_eq!(list[1].requester_email, "colleague@office.test");
    assert_eq!(list[1].item_category, "Kitchen");
    assert!(!list[1].item_is_evergreen);
}
