// src/lib.rs
// Restock - shared office shopping list coordination core
//
// Architecture:
// - Domain-centric: business rules live in domain entities and policy
// - Repository layer: dumb SQLite data mappers behind traits
// - Services: orchestration, validation, event emission
// - Application layer: DTO/command boundary for the request-handling
//   collaborator (routing, sessions and UI live outside this crate)
// - Consistency: the backing store's constraints are the concurrency control

// ============================================================================
// MODULES
// ============================================================================

pub mod application;
pub mod db;
pub mod domain;
pub mod error;
pub mod events;
pub mod repositories;
pub mod services;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    normalize_email,
    summary_trigger,
    trigger_for_addition,
    validate_item,
    validate_min_pending_items,
    // Fulfillment
    Fulfillment,
    FulfillmentStatus,
    FulfillmentTrigger,
    // Identity
    Identity,
    // Catalog
    Item,
    // Notification
    Notification,
    NotificationKind,
    // Request ledger
    Request,
    RequestStatus,
    // Settings
    ThresholdSettings,
    // Users
    User,
    UserRole,
    DEFAULT_MIN_PENDING_ITEMS,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus,
    DomainEvent,
    EventBus,
    ItemCreated,
    ItemDeleted,
    ItemUpdated,
    ListFulfilled,
    RequestAdded,
    RequestCancelled,
    ThresholdUpdated,
    UserProvisioned,
};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, default_database_path, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    ActiveRequestRow,
    FulfilledRequestRow,
    FulfillmentCloseOut,
    FulfillmentRepository,
    InsertOutcome,
    ItemRepository,
    NotificationRepository,
    RequestRepository,
    SettingsRepository,
    SqliteFulfillmentRepository,
    SqliteItemRepository,
    SqliteNotificationRepository,
    SqliteRequestRepository,
    SqliteSettingsRepository,
    SqliteUserRepository,
    UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AddRequestOutcome,
    // Catalog
    CatalogService,
    // Dashboard
    DashboardData,
    DashboardService,
    DirectoryConfig,
    FulfillmentReceipt,
    // Fulfillment engine
    FulfillmentService,
    FulfillmentWithRequests,
    // Trigger engine persistence
    NotificationService,
    // Request ledger
    RequestService,
    // Threshold settings
    SettingsService,
    ThresholdSummary,
    UpsertItemRequest,
    // User directory
    UserService,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppConfig, AppState};

// Re-export application submodules
pub use application::commands;
pub use application::dto;
