//! Repository trait for folder authorization.

use crate::domain::entities::{AccessDecision, FolderPermission, Workspace};
use crate::error::AppError;
use async_trait::async_trait;

/// Decides whether a user holds a permission on a folder.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgFolderAccessRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FolderAccessRepository: Send + Sync {
    /// Checks `permission` for `user_id` on `folder_id` within `workspace`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the folder does not exist in the workspace.
    /// Returns [`AppError::Internal`] on database errors.
    async fn check_folder_access(
        &self,
        workspace: &Workspace,
        user_id: &str,
        folder_id: &str,
        permission: FolderPermission,
    ) -> Result<AccessDecision, AppError>;
}
