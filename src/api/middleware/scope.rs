//! Token scope enforcement.

use axum::{extract::Request, middleware::Next, response::Response};
use serde_json::json;

use crate::domain::entities::WorkspaceContext;
use crate::error::AppError;

/// Scope required to read links.
pub const LINKS_READ: &str = "links.read";

/// Rejects requests whose token lacks [`LINKS_READ`].
///
/// Must run after [`super::auth::layer`].
///
/// # Errors
///
/// - `401 Unauthorized` if no workspace context is attached to the request
/// - `403 Forbidden` if the token was not granted the scope
pub async fn require_links_read(req: Request, next: Next) -> Result<Response, AppError> {
    ensure_scope(&req, LINKS_READ)?;
    Ok(next.run(req).await)
}

fn ensure_scope(req: &Request, scope: &str) -> Result<(), AppError> {
    let ctx = req
        .extensions()
        .get::<WorkspaceContext>()
        .ok_or_else(|| AppError::unauthorized("Unauthorized", json!({})))?;

    if !ctx.has_scope(scope) {
        return Err(AppError::forbidden(
            "The provided API key does not have the required permissions for this endpoint.",
            json!({ "required_scope": scope }),
        ));
    }

    Ok(())
}
