//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod rating_repository;
mod store_repository;
mod user_repository;

pub use rating_repository::{RatingRepository, RatingStore};
pub use store_repository::{StoreDirectory, StoreRepository};
pub use user_repository::{UserDirectory, UserRepository};

pub(crate) use store_repository::{map_store_insert_err, new_store_model};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use rating_repository::MockRatingRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use store_repository::MockStoreRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
