// src/domain/fulfillment/policy.rs
//
// Pure trigger decisions. Two independent notions of "trigger" live here:
// the per-addition decision (drives notifications) and the summary recorded
// on a fulfillment. They are computed separately and may diverge.

use super::entity::FulfillmentTrigger;

/// Decide whether adding a request fires a notification.
///
/// Precedence:
/// 1. staples (evergreen items) fire `Immediate` regardless of list size;
/// 2. otherwise `Threshold` fires exactly when the distinct-active-item count
///    equals the configured minimum — an edge trigger, so adds past the
///    threshold stay quiet;
/// 3. otherwise nothing fires.
pub fn trigger_for_addition(
    item_is_evergreen: bool,
    distinct_active_items: u32,
    min_pending_items: u32,
) -> Option<FulfillmentTrigger> {
    if item_is_evergreen {
        return Some(FulfillmentTrigger::Immediate);
    }
    if distinct_active_items == min_pending_items {
        return Some(FulfillmentTrigger::Threshold);
    }
    None
}

/// Classify a fulfillment over the batch it closes: any staple in the
/// snapshot makes the whole order `Immediate`.
pub fn summary_trigger(any_evergreen: bool) -> FulfillmentTrigger {
    if any_evergreen {
        FulfillmentTrigger::Immediate
    } else {
        FulfillmentTrigger::Threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evergreen_wins_regardless_of_count() {
        assert_eq!(
            trigger_for_addition(true, 1, 5),
            Some(FulfillmentTrigger::Immediate)
        );
        assert_eq!(
            trigger_for_addition(true, 5, 5),
            Some(FulfillmentTrigger::Immediate)
        );
        assert_eq!(
            trigger_for_addition(true, 9, 5),
            Some(FulfillmentTrigger::Immediate)
        );
    }

    #[test]
    fn test_threshold_fires_on_equality_only() {
        assert_eq!(trigger_for_addition(false, 1, 3), None);
        assert_eq!(trigger_for_addition(false, 2, 3), None);
        assert_eq!(
            trigger_for_addition(false, 3, 3),
            Some(FulfillmentTrigger::Threshold)
        );
        // past the edge: quiet again
        assert_eq!(trigger_for_addition(false, 4, 3), None);
    }

    #[test]
    fn test_summary_trigger() {
        assert_eq!(summary_trigger(true), FulfillmentTrigger::Immediate);
        assert_eq!(summary_trigger(false), FulfillmentTrigger::Threshold);
    }
}
