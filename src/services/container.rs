//! Service Container - Centralized service access.
//!
//! SOLID (SRP): Manages service lifecycle and access.
//! SOLID (DIP): Depends on service traits, not implementations.

use std::sync::Arc;

use super::{AuthService, RatingService, StatsService, StoreService, UserService};
use crate::config::Config;
use crate::infra::Persistence;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
///
/// Provides centralized access to all application services.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get authentication service
    fn auth(&self) -> Arc<dyn AuthService>;

    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get store service
    fn stores(&self) -> Arc<dyn StoreService>;

    /// Get rating service
    fn ratings(&self) -> Arc<dyn RatingService>;

    /// Get statistics service
    fn stats(&self) -> Arc<dyn StatsService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    store_service: Arc<dyn StoreService>,
    rating_service: Arc<dyn RatingService>,
    stats_service: Arc<dyn StatsService>,
}

impl Services {
    /// Create a new service container with all services initialized
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        user_service: Arc<dyn UserService>,
        store_service: Arc<dyn StoreService>,
        rating_service: Arc<dyn RatingService>,
        stats_service: Arc<dyn StatsService>,
    ) -> Self {
        Self {
            auth_service,
            user_service,
            store_service,
            rating_service,
            stats_service,
        }
    }

    /// Create service container from database connection and config
    pub fn from_connection(db: sea_orm::DatabaseConnection, config: Config) -> Self {
        use super::{Authenticator, RatingDesk, StatsDesk, StoreManager, UserManager};

        let uow = Arc::new(Persistence::new(db));
        let auth_service = Arc::new(Authenticator::new(uow.clone(), config));
        let user_service = Arc::new(UserManager::new(uow.clone()));
        let store_service = Arc::new(StoreManager::new(uow.clone()));
        let rating_service = Arc::new(RatingDesk::new(uow.clone()));
        let stats_service = Arc::new(StatsDesk::new(uow));

        Self {
            auth_service,
            user_service,
            store_service,
            rating_service,
            stats_service,
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn stores(&self) -> Arc<dyn StoreService> {
        self.store_service.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingService> {
        self.rating_service.clone()
    }

    fn stats(&self) -> Arc<dyn StatsService> {
        self.stats_service.clone()
    }
}
