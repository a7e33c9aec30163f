//! HTTP request handlers.

pub mod auth_handler;
pub mod dashboard_handler;
pub mod rating_handler;
pub mod store_handler;
pub mod user_handler;

pub use auth_handler::{auth_protected_routes, auth_routes};
pub use dashboard_handler::dashboard_routes;
pub use rating_handler::rating_routes;
pub use store_handler::store_routes;
pub use user_handler::user_routes;
