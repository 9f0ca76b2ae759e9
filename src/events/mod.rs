// src/events/mod.rs
//
// Internal Event System - Public API
//
// Events here are observability: services announce facts after persisting
// them. No correctness path runs through handlers; every operation returns
// its full outcome to the caller synchronously.

pub mod bus;
pub mod types;

pub use bus::EventBus;
pub use types::DomainEvent;

pub use types::{
    ItemCreated, ItemDeleted, ItemUpdated, ListFulfilled, RequestAdded, RequestCancelled,
    ThresholdUpdated, UserProvisioned,
};

/// Initialize a new event bus
pub fn create_event_bus() -> EventBus {
    EventBus::new()
}
