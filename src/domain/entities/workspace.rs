//! Workspace and the authenticated request context.

/// Tenant boundary under which links, folders and tokens are scoped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// Who is performing a request and with which grants.
///
/// Produced by authentication and trusted by everything downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceContext {
    pub workspace: Workspace,
    pub user_id: String,
    pub scopes: Vec<String>,
}

impl WorkspaceContext {
    /// Returns true if the token behind this context was granted `scope`.
    pub fn has_scope(&self, scope: &str) -> bool {
        self.scopes.iter().any(|s| s == scope)
    }
}

#[cfg(test)]
pub(crate) fn sample_context() -> WorkspaceContext {
    WorkspaceContext {
        workspace: Workspace {
            id: "ws1".to_string(),
            name: "Acme".to_string(),
            slug: "acme".to_string(),
        },
        user_id: "user1".to_string(),
        scopes: vec!["links.read".to_string()],
    }
}
