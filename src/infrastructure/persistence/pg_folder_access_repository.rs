//! PostgreSQL implementation of folder authorization.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::entities::{
    AccessDecision, FolderAccessLevel, FolderPermission, FolderUserRole, Workspace,
};
use crate::domain::repositories::FolderAccessRepository;
use crate::error::AppError;

/// PostgreSQL repository deciding folder permissions.
///
/// Reads the folder's workspace-wide access level and the user's explicit
/// folder role, then applies [`AccessDecision::evaluate`].
pub struct PgFolderAccessRepository {
    pool: Arc<PgPool>,
}

impl PgFolderAccessRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn parse_column<T: FromStr<Err = String>>(value: Option<String>) -> Result<Option<T>, AppError> {
    value
        .map(|v| v.parse::<T>())
        .transpose()
        .map_err(|reason| {
            AppError::internal("Corrupt folder permission data", json!({ "reason": reason }))
        })
}

#[async_trait]
impl FolderAccessRepository for PgFolderAccessRepository {
    async fn check_folder_access(
        &self,
        workspace: &Workspace,
        user_id: &str,
        folder_id: &str,
        permission: FolderPermission,
    ) -> Result<AccessDecision, AppError> {
        let row: Option<(Option<String>, Option<String>)> = sqlx::query_as(
            r#"
            SELECT f.access_level, fu.role
            FROM folders f
            LEFT JOIN folder_users fu ON fu.folder_id = f.id AND fu.user_id = $3
            WHERE f.id = $1 AND f.workspace_id = $2
            "#,
        )
        .bind(folder_id)
        .bind(&workspace.id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some((access_level, role)) = row else {
            return Err(AppError::not_found(
                "Folder not found.",
                json!({ "folder_id": folder_id }),
            ));
        };

        let access_level = parse_column::<FolderAccessLevel>(access_level)?;
        let role = parse_column::<FolderUserRole>(role)?;

        Ok(AccessDecision::evaluate(role, access_level, permission))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_column() {
        assert_eq!(
            parse_column::<FolderUserRole>(Some("editor".to_string())).unwrap(),
            Some(FolderUserRole::Editor)
        );
        assert_eq!(parse_column::<FolderAccessLevel>(None).unwrap(), None);
        assert!(matches!(
            parse_column::<FolderUserRole>(Some("root".to_string())),
            Err(AppError::Internal { .. })
        ));
    }
}
