//! Link entity representing a shortened URL owned by a workspace.

use chrono::{DateTime, Utc};

use super::tag::TagEntry;

/// A short link as stored by the persistence layer.
///
/// Every link belongs to exactly one workspace and may be filed under a folder.
/// `key` is kept exactly as stored; any decoding happens at presentation time.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub id: String,
    pub domain: String,
    pub key: String,
    pub url: String,
    pub external_id: Option<String>,
    pub folder_id: Option<String>,
    pub workspace_id: String,
    pub archived: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub clicks: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Full short URL served for this link.
    pub fn short_link(&self) -> String {
        format!("https://{}/{}", self.domain.trim_end_matches('/'), self.key)
    }
}

/// A resolved link with its tags attached, ready for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkWithTags {
    pub link: Link,
    pub tags: Vec<TagEntry>,
}

#[cfg(test)]
pub(crate) fn sample_link(id: &str) -> Link {
    let now = Utc::now();
    Link {
        id: id.to_string(),
        domain: "x.co".to_string(),
        key: "promo".to_string(),
        url: "https://example.com/landing".to_string(),
        external_id: None,
        folder_id: None,
        workspace_id: "ws1".to_string(),
        archived: false,
        expires_at: None,
        clicks: 0,
        created_at: now,
        updated_at: now,
    }
}
