//! Tag entity and its link association wrapper.

use serde::{Deserialize, Serialize};

/// A label attached to links through `link_tags` associations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: String,
    pub name: String,
    pub color: String,
}

/// A tag as it appears on a link: `{ "tag": { ... } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagEntry {
    pub tag: Tag,
}

impl From<Tag> for TagEntry {
    fn from(tag: Tag) -> Self {
        Self { tag }
    }
}
