//! Handler for the link info endpoint.

use axum::{
    Extension, Json,
    extract::{Query, State},
};

use crate::api::dto::link_info::LinkInfoQuery;
use crate::application::transform::PublicLink;
use crate::domain::entities::WorkspaceContext;
use crate::error::AppError;
use crate::state::AppState;

/// Retrieves a link of the caller's workspace with its tags.
///
/// # Endpoint
///
/// `GET /api/links/info`
///
/// # Query Parameters
///
/// - `domain` + `key` - Routing attributes of the short link
/// - `linkId` - Link id (`ext_`-prefixed values address the external id)
/// - `externalId` - Id assigned by the caller's own system
///
/// At least one must be present.
///
/// # Response
///
/// ```json
/// {
///   "id": "clx0abc",
///   "domain": "x.co",
///   "key": "promo",
///   "url": "https://example.com",
///   "shortLink": "https://x.co/promo",
///   "workspaceId": "ws_clw9",
///   "tagId": "t1",
///   "tags": [{ "tag": { "id": "t1", "name": "Marketing", "color": "blue" } }],
///   ...
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if no identifier is supplied
/// - 403 Forbidden if the link is in a folder the caller can't read
/// - 404 Not Found if no link matches in the workspace
/// - 409 Conflict if the identifiers match more than one link
pub async fn link_info_handler(
    State(state): State<AppState>,
    Extension(ctx): Extension<WorkspaceContext>,
    Query(query): Query<LinkInfoQuery>,
) -> Result<Json<PublicLink>, AppError> {
    let lookup = query.into_lookup()?;

    let link = state
        .link_info_service
        .get_link_info(&ctx, &lookup)
        .await?;

    Ok(Json(link))
}
