//! Repository trait for tags attached to links.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists every tag associated with `link_id`, in no particular order.
    ///
    /// Returns an empty vector when the link has no tags.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_link(&self, link_id: &str) -> Result<Vec<Tag>, AppError>;
}
