use crate::domain::{DomainError, DomainResult};

/// The threshold must be a finite integer >= 1. Callers hand in the raw
/// wire value; the validated store representation is u32.
pub fn validate_min_pending_items(value: i64) -> DomainResult<u32> {
    if value < 1 {
        return Err(DomainError::InvariantViolation(
            "Threshold must be at least 1.".to_string(),
        ));
    }
    u32::try_from(value).map_err(|_| {
        DomainError::InvariantViolation("Threshold must be at least 1.".to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_threshold() {
        assert_eq!(validate_min_pending_items(1).unwrap(), 1);
        assert_eq!(validate_min_pending_items(5).unwrap(), 5);
    }

    #[test]
    fn test_zero_and_negative_fail() {
        assert!(validate_min_pending_items(0).is_err());
        assert!(validate_min_pending_items(-3).is_err());
    }

    #[test]
    fn test_overflowing_threshold_fails() {
        assert!(validate_min_pending_items(i64::from(u32::MAX) + 1).is_err());
    }
}
