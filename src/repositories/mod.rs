// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic (one exception: fulfillment close-out runs its summary
//   policy inside the transaction so the snapshot and the record agree)
// - NO invariant enforcement beyond what the schema carries
// - NO event emission
// - NO cross-repository calls
// - Explicit SQL only

pub mod fulfillment_repository;
pub mod item_repository;
pub mod notification_repository;
pub mod request_repository;
pub mod settings_repository;
pub mod user_repository;

pub use fulfillment_repository::{
    FulfilledRequestRow, FulfillmentCloseOut, FulfillmentRepository, SqliteFulfillmentRepository,
};
pub use item_repository::{ItemRepository, SqliteItemRepository};
pub use notification_repository::{NotificationRepository, SqliteNotificationRepository};
pub use request_repository::{
    ActiveRequestRow, InsertOutcome, RequestRepository, SqliteRequestRepository,
};
pub use settings_repository::{SettingsRepository, SqliteSettingsRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};

#[cfg(test)]
pub use fulfillment_repository::MockFulfillmentRepository;
#[cfg(test)]
pub use item_repository::MockItemRepository;
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
#[cfg(test)]
pub use request_repository::MockRequestRepository;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;

/// SQLite reports every constraint failure with the same top-level code;
/// the extended code tells a unique-index hit apart from e.g. an FK failure.
pub(crate) fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}
