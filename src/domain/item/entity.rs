use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A purchasable catalog entry colleagues can put on the shared list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Display name, trimmed; unique together with `category`
    pub name: String,

    /// Grouping used on the dashboard; unique together with `name`
    pub category: String,

    /// Staples are reordered as soon as anyone requests them
    pub is_evergreen: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Item {
    /// Create a new Item. Name and category are trimmed on construction;
    /// emptiness is rejected by `validate_item`.
    pub fn new(name: &str, category: &str, is_evergreen: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            category: category.trim().to_string(),
            is_evergreen,
            created_at: Utc::now(),
        }
    }

    /// Replace the mutable fields, keeping the identity.
    pub fn update(&mut self, name: &str, category: &str, is_evergreen: bool) {
        self.name = name.trim().to_string();
        self.category = category.trim().to_string();
        self.is_evergreen = is_evergreen;
    }
}
