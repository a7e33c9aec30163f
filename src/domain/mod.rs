//! Domain layer - Core business entities and logic
//!
//! This module contains the core domain models that represent
//! business concepts independent of infrastructure concerns.

pub mod password;
pub mod rating;
pub mod store;
pub mod user;

pub use password::Password;
pub use rating::{
    average_rating, RatedStore, RaterInfo, Rating, RatingWithRater, RatingWithStore,
};
pub use store::{OwnerSummary, Store, StoreDetail, StoreSummary};
pub use user::{AuthUser, OwnedStoreSummary, User, UserResponse, UserRole, UserWithStore};
