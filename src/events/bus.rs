// src/events/bus.rs
//
// Synchronous in-process event bus.
//
// DESIGN:
// - Handlers execute immediately, in subscription order, on the caller's
//   thread; emit returns once every handler ran.
// - Type-safe subscription through generics; type erasure only at the edge.
// - Every emission is logged through the `log` facade.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::RwLock;

use crate::events::types::DomainEvent;

/// Type-erased event handler function
type EventHandler = Box<dyn Fn(&dyn Any) + Send + Sync>;

pub struct EventBus {
    /// Map from event TypeId to list of handlers
    handlers: RwLock<HashMap<TypeId, Vec<EventHandler>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Subscribe to a specific event type.
    ///
    /// Handlers run in subscription order.
    ///
    /// Example:
    /// ```ignore
    /// bus.subscribe::<RequestAdded>(|event| {
    ///     println!("request added for item {}", event.item_id);
    /// });
    /// ```
    pub fn subscribe<E, F>(&self, handler: F)
    where
        E: DomainEvent + 'static,
        F: Fn(&E) + Send + Sync + 'static,
    {
        let wrapped: EventHandler = Box::new(move |event_any: &dyn Any| {
            if let Some(event) = event_any.downcast_ref::<E>() {
                handler(event);
            } else {
                log::error!(
                    "failed to downcast event in handler for {}",
                    std::any::type_name::<E>()
                );
            }
        });

        let mut handlers = self.handlers.write().unwrap();
        handlers.entry(TypeId::of::<E>()).or_default().push(wrapped);
    }

    /// Emit an event to all handlers registered for its type.
    pub fn emit<E>(&self, event: E)
    where
        E: DomainEvent + 'static,
    {
        let handlers = self.handlers.read().unwrap();
        let event_handlers = handlers.get(&TypeId::of::<E>());
        let handler_count = event_handlers.map(|h| h.len()).unwrap_or(0);

        log::debug!(
            "event {} ({}) at {} -> {} handler(s)",
            event.event_type(),
            event.event_id(),
            event.occurred_at().to_rfc3339(),
            handler_count
        );

        if let Some(event_handlers) = event_handlers {
            for handler in event_handlers {
                handler(&event);
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
