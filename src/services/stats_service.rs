//! Platform statistics for the admin dashboard.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::errors::AppResult;
use crate::infra::UnitOfWork;

/// Platform-wide entity counts
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_users: u64,
    pub total_stores: u64,
    pub total_ratings: u64,
}

/// Statistics service trait for dependency injection.
#[async_trait]
pub trait StatsService: Send + Sync {
    /// Count users, stores and ratings
    async fn platform_stats(&self) -> AppResult<PlatformStats>;
}

/// Concrete implementation of StatsService using Unit of Work.
pub struct StatsDesk<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StatsDesk<U> {
    /// Create new stats service instance with Unit of Work
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> StatsService for StatsDesk<U> {
    async fn platform_stats(&self) -> AppResult<PlatformStats> {
        let users = self.uow.users();
        let stores = self.uow.stores();
        let ratings = self.uow.ratings();

        let (total_users, total_stores, total_ratings) =
            tokio::try_join!(users.count(), stores.count(), ratings.count())?;

        Ok(PlatformStats {
            total_users,
            total_stores,
            total_ratings,
        })
    }
}
