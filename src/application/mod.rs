//! Application layer services.
//!
//! Services orchestrate repository calls and business rules and expose a
//! small API to HTTP handlers.
//!
//! - [`services::link_info_service::LinkInfoService`] - Link info pipeline
//! - [`services::auth_service::AuthService`] - API token authentication
//! - [`transform`] - Public link representation

pub mod services;
pub mod transform;
