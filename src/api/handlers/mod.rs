//! HTTP request handlers.

pub mod auth_handler;
pub mod catalog_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use catalog_handler::{catalog_routes, degree_routes, test_routes};
pub use user_handler::user_routes;
