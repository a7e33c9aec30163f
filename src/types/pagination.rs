//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// Pagination query parameters, 1-indexed.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Calculate offset for database query: `(page - 1) * limit`
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1) * self.limit()
    }

    /// Get limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.limit.clamp(1, MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationMeta {
    /// `total_pages = ceil(total / limit)`
    pub fn new(params: &PaginationParams, total: u64) -> Self {
        let limit = params.limit();
        Self {
            page: params.page,
            limit,
            total,
            total_pages: total.div_ceil(limit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: u64, limit: u64) -> PaginationParams {
        PaginationParams { page, limit }
    }

    #[test]
    fn offset_is_one_indexed() {
        assert_eq!(params(1, 10).offset(), 0);
        assert_eq!(params(3, 10).offset(), 20);
    }

    #[test]
    fn limit_is_capped() {
        assert_eq!(params(1, 10_000).limit(), MAX_PAGE_SIZE);
        assert_eq!(params(1, 0).limit(), 1);
    }

    #[test]
    fn total_pages_is_ceiling() {
        assert_eq!(PaginationMeta::new(&params(1, 10), 0).total_pages, 0);
        assert_eq!(PaginationMeta::new(&params(1, 10), 10).total_pages, 1);
        assert_eq!(PaginationMeta::new(&params(1, 10), 11).total_pages, 2);
        assert_eq!(PaginationMeta::new(&params(1, 3), 7).total_pages, 3);
    }
}
