//! HTTP request handlers for API endpoints.

pub mod health;
pub mod link_info;

pub use health::health_handler;
pub use link_info::link_info_handler;
