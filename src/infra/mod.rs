//! Infrastructure layer - External systems integration
//!
//! Database connections, repositories and the Unit of Work for
//! transaction management.

pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{
    RatingRepository, RatingStore, StoreDirectory, StoreRepository, UserDirectory, UserRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockRatingRepository, MockStoreRepository, MockUserRepository};
