// src/application/state.rs

use std::path::PathBuf;
use std::sync::Arc;

use crate::db::{create_connection_pool, default_database_path, get_connection, initialize_database};
use crate::error::AppResult;
use crate::events::EventBus;
use crate::repositories::{
    FulfillmentRepository, ItemRepository, NotificationRepository, RequestRepository,
    SettingsRepository, SqliteFulfillmentRepository, SqliteItemRepository,
    SqliteNotificationRepository, SqliteRequestRepository, SqliteSettingsRepository,
    SqliteUserRepository, UserRepository,
};
use crate::services::{
    CatalogService, DashboardService, DirectoryConfig, FulfillmentService, NotificationService,
    RequestService, SettingsService, UserService,
};

/// Configuration supplied by the embedding application.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Database file location; the platform data directory when unset.
    pub database_path: Option<PathBuf>,
    /// Emails that always provision as orderers.
    pub orderer_emails: Vec<String>,
}

/// Application state shared with the request-handling layer.
/// All fields are Arc-wrapped for thread-safe sharing across calls.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub users: Arc<UserService>,
    pub catalog: Arc<CatalogService>,
    pub requests: Arc<RequestService>,
    pub notifications: Arc<NotificationService>,
    pub fulfillments: Arc<FulfillmentService>,
    pub settings: Arc<SettingsService>,
    pub dashboard: Arc<DashboardService>,
}

impl AppState {
    /// Wire pool -> repositories -> services, applying migrations idempotently.
    pub fn initialize(config: AppConfig) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());
        let db_path = match config.database_path {
            Some(path) => path,
            None => default_database_path()?,
        };
        let pool = Arc::new(create_connection_pool(&db_path)?);

        // Initialize schema (idempotent)
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        // 2. REPOSITORIES
        let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepository::new(pool.clone()));
        let item_repo: Arc<dyn ItemRepository> = Arc::new(SqliteItemRepository::new(pool.clone()));
        let request_repo: Arc<dyn RequestRepository> =
            Arc::new(SqliteRequestRepository::new(pool.clone()));
        let fulfillment_repo: Arc<dyn FulfillmentRepository> =
            Arc::new(SqliteFulfillmentRepository::new(pool.clone()));
        let notification_repo: Arc<dyn NotificationRepository> =
            Arc::new(SqliteNotificationRepository::new(pool.clone()));
        let settings_repo: Arc<dyn SettingsRepository> =
            Arc::new(SqliteSettingsRepository::new(pool.clone()));

        // 3. SERVICES
        let users = Arc::new(UserService::new(
            user_repo.clone(),
            DirectoryConfig {
                orderer_emails: config.orderer_emails,
            },
            event_bus.clone(),
        ));
        let notifications = Arc::new(NotificationService::new(
            notification_repo.clone(),
            user_repo.clone(),
        ));
        let catalog = Arc::new(CatalogService::new(item_repo.clone(), event_bus.clone()));
        let requests = Arc::new(RequestService::new(
            request_repo.clone(),
            item_repo.clone(),
            settings_repo.clone(),
            notifications.clone(),
            event_bus.clone(),
        ));
        let fulfillments = Arc::new(FulfillmentService::new(
            fulfillment_repo.clone(),
            event_bus.clone(),
        ));
        let settings = Arc::new(SettingsService::new(
            settings_repo.clone(),
            event_bus.clone(),
        ));
        let dashboard = Arc::new(DashboardService::new(
            item_repo.clone(),
            request_repo.clone(),
            settings_repo.clone(),
            notifications.clone(),
            fulfillments.clone(),
        ));

        Ok(AppState {
            event_bus,
            users,
            catalog,
            requests,
            notifications,
            fulfillments,
            settings,
            dashboard,
        })
    }
}
