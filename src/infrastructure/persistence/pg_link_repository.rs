//! PostgreSQL implementation of link resolution.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::lookup::LinkLookup;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Link ids carrying this prefix address a link by its external id.
const EXTERNAL_ID_PREFIX: &str = "ext_";

/// PostgreSQL repository resolving link identifiers.
///
/// Every supplied selector narrows the match: a request with both `linkId`
/// and `domain` + `key` only resolves if one link satisfies all of them.
/// No selector takes precedence over another. A `domain` without a `key`
/// (or the reverse) matches nothing.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    id: String,
    domain: String,
    key: String,
    url: String,
    external_id: Option<String>,
    folder_id: Option<String>,
    workspace_id: String,
    archived: bool,
    expires_at: Option<DateTime<Utc>>,
    clicks: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link {
            id: r.id,
            domain: r.domain,
            key: r.key,
            url: r.url,
            external_id: r.external_id,
            folder_id: r.folder_id,
            workspace_id: r.workspace_id,
            archived: r.archived,
            expires_at: r.expires_at,
            clicks: r.clicks,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Splits a `linkId` into an internal id or an `ext_`-prefixed external id.
fn split_link_id(link_id: Option<&str>) -> (Option<&str>, Option<&str>) {
    match link_id {
        Some(id) => match id.strip_prefix(EXTERNAL_ID_PREFIX) {
            Some(external) => (None, Some(external)),
            None => (Some(id), None),
        },
        None => (None, None),
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn resolve(&self, lookup: &LinkLookup, workspace_id: &str) -> Result<Link, AppError> {
        let (domain, key) = match lookup.domain_key() {
            Some((Some(domain), Some(key))) => (Some(domain), Some(key)),
            Some((domain, key)) => {
                return Err(AppError::not_found(
                    "Link not found.",
                    json!({
                        "domain": domain,
                        "key": key,
                        "reason": "domain and key must be provided together",
                    }),
                ));
            }
            None => (None, None),
        };
        let (link_id, prefixed_external_id) = split_link_id(lookup.link_id());

        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, domain, key, url, external_id, folder_id, workspace_id,
                   archived, expires_at, clicks, created_at, updated_at
            FROM links
            WHERE workspace_id = $1
              AND ($2::text IS NULL OR id = $2)
              AND ($3::text IS NULL OR external_id = $3)
              AND ($4::text IS NULL OR external_id = $4)
              AND ($5::text IS NULL OR domain = $5)
              AND ($6::text IS NULL OR key = $6)
            LIMIT 2
            "#,
        )
        .bind(workspace_id)
        .bind(link_id)
        .bind(lookup.external_id())
        .bind(prefixed_external_id)
        .bind(domain)
        .bind(key)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut rows = rows.into_iter();
        match (rows.next(), rows.next()) {
            (Some(row), None) => Ok(row.into()),
            (None, _) => Err(AppError::not_found(
                "Link not found.",
                json!({
                    "domain": domain,
                    "key": key,
                    "link_id": lookup.link_id(),
                    "external_id": lookup.external_id(),
                }),
            )),
            (Some(_), Some(_)) => Err(AppError::ambiguous_match(
                "More than one link matches the given identifiers. Provide a domain and a key, a linkId or an externalId.",
                json!({ "domain": domain, "key": key }),
            )),
        }
    }
}
