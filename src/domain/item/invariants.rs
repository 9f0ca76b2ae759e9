use super::entity::Item;
use crate::domain::{DomainError, DomainResult};

/// Validates all Item invariants
pub fn validate_item(item: &Item) -> DomainResult<()> {
    if item.name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Item name is required.".to_string(),
        ));
    }
    if item.category.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Category is required.".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold true for the Item domain:
///
/// 1. Identity (UUID) is immutable
/// 2. Name and category are non-empty after trimming
/// 3. (name, category) is unique across the catalog (store-enforced)
/// 4. The evergreen flag may change at any time

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_item() {
        let item = Item::new("Coffee beans", "Kitchen", true);
        assert!(validate_item(&item).is_ok());
    }

    #[test]
    fn test_construction_trims() {
        let item = Item::new("  Milk ", " Kitchen  ", false);
        assert_eq!(item.name, "Milk");
        assert_eq!(item.category, "Kitchen");
    }

    #[test]
    fn test_empty_name_fails() {
        let item = Item::new("   ", "Kitchen", false);
        assert!(validate_item(&item).is_err());
    }

    #[test]
    fn test_empty_category_fails() {
        let item = Item::new("Milk", "  ", false);
        assert!(validate_item(&item).is_err());
    }
}
