//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, LinkInfoService};

/// State shared by every request handler and middleware.
#[derive(Clone)]
pub struct AppState {
    pub link_info_service: Arc<LinkInfoService>,
    pub auth_service: Arc<AuthService>,
    /// Used by the health check only.
    pub db: Option<Arc<sqlx::PgPool>>,
}

impl AppState {
    pub fn new(
        link_info_service: Arc<LinkInfoService>,
        auth_service: Arc<AuthService>,
        db: Option<Arc<sqlx::PgPool>>,
    ) -> Self {
        Self {
            link_info_service,
            auth_service,
            db,
        }
    }
}
