//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Resolves the Bearer token to a [`crate::domain::entities::WorkspaceContext`]
/// and stores it in the request extensions for handlers and scope checks.
///
/// Missing or malformed `Authorization` headers and unknown or revoked
/// tokens are rejected with `401 Unauthorized` and `WWW-Authenticate: Bearer`.
///
/// ```rust,ignore
/// let api = protected_routes()
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let ctx = st.auth_service.authenticate(&token).await?;
    tracing::debug!(workspace_id = %ctx.workspace.id, user_id = %ctx.user_id, "Authenticated");

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
