//! Typed filter and sort parameters for list endpoints.
//!
//! Recognized fields are enumerated per resource; an unrecognized
//! `sortBy` value fails deserialization and surfaces as a 400
//! instead of being silently ignored.

use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use super::pagination::PaginationParams;
use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
use crate::domain::UserRole;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sortable columns of the user directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum UserSortField {
    #[default]
    Name,
    Email,
    Address,
    Role,
    CreatedAt,
}

/// Sortable columns of the store directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum StoreSortField {
    #[default]
    Name,
    Email,
    Address,
    CreatedAt,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_SIZE
}

/// Admin user-listing parameters.
///
/// `search` matches name OR email OR address by substring; the
/// dedicated fields narrow independently (AND-combined). All
/// substring matches are case-insensitive.
// Note: page/limit are inlined rather than `#[serde(flatten)]`ed
// because serde_urlencoded cannot flatten numeric fields.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct UserListQuery {
    pub search: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub role: Option<UserRole>,
    #[serde(default)]
    pub sort_by: UserSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl UserListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            search: None,
            name: None,
            email: None,
            address: None,
            role: None,
            sort_by: UserSortField::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Store-listing parameters; same contract scoped to name/address.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct StoreListQuery {
    pub search: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub sort_by: StoreSortField,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

impl StoreListQuery {
    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            limit: self.limit,
        }
    }
}

impl Default for StoreListQuery {
    fn default() -> Self {
        Self {
            search: None,
            name: None,
            address: None,
            sort_by: StoreSortField::default(),
            sort_order: SortOrder::default(),
            page: DEFAULT_PAGE_NUMBER,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_uses_camel_case() {
        let q: UserListQuery =
            serde_json::from_str(r#"{"sortBy":"createdAt","sortOrder":"desc"}"#).unwrap();
        assert_eq!(q.sort_by, UserSortField::CreatedAt);
        assert_eq!(q.sort_order, SortOrder::Desc);
    }

    #[test]
    fn unrecognized_sort_field_is_rejected() {
        let result = serde_json::from_str::<StoreListQuery>(r#"{"sortBy":"passwordHash"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn defaults_apply_when_absent() {
        let q: StoreListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.sort_by, StoreSortField::Name);
        assert_eq!(q.sort_order, SortOrder::Asc);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 10);
    }
}
