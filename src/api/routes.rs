//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`], applied in [`crate::routes::app_router`].

use crate::api::handlers::link_info_handler;
use crate::api::middleware::scope;
use crate::state::AppState;
use axum::{Router, middleware, routing::get};

/// All API routes.
///
/// # Endpoints
///
/// - `GET /links/info` - Retrieve a link with its tags (scope `links.read`)
pub fn protected_routes() -> Router<AppState> {
    Router::new().route(
        "/links/info",
        get(link_info_handler).route_layer(middleware::from_fn(scope::require_links_read)),
    )
}
