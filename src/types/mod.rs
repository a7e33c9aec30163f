//! Shared types used across the API layer.

mod pagination;
mod query;
mod response;

pub use pagination::{PaginationMeta, PaginationParams};
pub use query::{SortOrder, StoreListQuery, StoreSortField, UserListQuery, UserSortField};
pub use response::MessageResponse;
