//! Conversion of a link with its tags into the public API shape.

use chrono::{DateTime, Utc};
use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::domain::entities::{LinkWithTags, TagEntry};
use crate::error::AppError;

/// Prefix applied to workspace ids in public payloads.
const WORKSPACE_ID_PREFIX: &str = "ws_";

/// Switches for [`LinkTransformer::transform`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformOptions {
    /// Emit `key` exactly as stored instead of percent-decoding it.
    pub skip_decode_key: bool,
}

/// Link as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicLink {
    pub id: String,
    pub domain: String,
    pub key: String,
    pub url: String,
    pub short_link: String,
    pub external_id: Option<String>,
    pub folder_id: Option<String>,
    pub workspace_id: String,
    pub archived: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
    /// Id of the first tag, kept for clients that predate multi-tag links.
    pub tag_id: Option<String>,
    pub tags: Vec<TagEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Produces the public representation of a link.
#[cfg_attr(test, mockall::automock)]
pub trait LinkTransformer: Send + Sync {
    /// # Errors
    ///
    /// Implementation-defined; callers propagate them unchanged.
    fn transform(
        &self,
        link: LinkWithTags,
        options: TransformOptions,
    ) -> Result<PublicLink, AppError>;
}

/// Default transformer used by the HTTP API.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicLinkTransformer;

impl PublicLinkTransformer {
    pub fn new() -> Self {
        Self
    }
}

impl LinkTransformer for PublicLinkTransformer {
    fn transform(
        &self,
        link: LinkWithTags,
        options: TransformOptions,
    ) -> Result<PublicLink, AppError> {
        let LinkWithTags { link, tags } = link;

        let short_link = link.short_link();
        let key = if options.skip_decode_key {
            link.key
        } else {
            decode_key(&link.key)
        };

        Ok(PublicLink {
            short_link,
            key,
            tag_id: tags.first().map(|entry| entry.tag.id.clone()),
            workspace_id: format!("{WORKSPACE_ID_PREFIX}{}", link.workspace_id),
            id: link.id,
            domain: link.domain,
            url: link.url,
            external_id: link.external_id,
            folder_id: link.folder_id,
            archived: link.archived,
            expires_at: link.expires_at,
            clicks: link.clicks,
            tags,
            created_at: link.created_at,
            updated_at: link.updated_at,
        })
    }
}

/// Percent-decodes a stored key; keys that don't decode to UTF-8 are kept as is.
fn decode_key(key: &str) -> String {
    percent_decode_str(key)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| key.to_string())
}
