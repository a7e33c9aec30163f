//! Application state - Dependency injection container.
//!
//! Provides centralized access to all application services and infrastructure.

use std::sync::Arc;

use crate::infra::Database;
use crate::services::{
    AuthService, RatingService, ServiceContainer, Services, StatsService, StoreService,
    UserService,
};

/// Application state containing all services (DI container).
///
/// Use `from_config()` for recommended initialization with full
/// ServiceContainer and UnitOfWork support.
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth_service: Arc<dyn AuthService>,
    /// User service
    pub user_service: Arc<dyn UserService>,
    /// Store service
    pub store_service: Arc<dyn StoreService>,
    /// Rating service
    pub rating_service: Arc<dyn RatingService>,
    /// Statistics service
    pub stats_service: Arc<dyn StatsService>,
    /// Database connection
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from database connection and config.
    ///
    /// This is the recommended way to create AppState as it uses
    /// the ServiceContainer for centralized service management.
    pub fn from_config(database: Arc<Database>, config: crate::config::Config) -> Self {
        let container = Services::from_connection(database.get_connection(), config);

        Self {
            auth_service: container.auth(),
            user_service: container.users(),
            store_service: container.stores(),
            rating_service: container.ratings(),
            stats_service: container.stats(),
            database,
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        store_service: Arc<dyn StoreService>,
        rating_service: Arc<dyn RatingService>,
        stats_service: Arc<dyn StatsService>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            store_service,
            rating_service,
            stats_service,
            database,
        }
    }
}
