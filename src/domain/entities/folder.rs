//! Folder permission rules and the folder access gate state.

use std::fmt;
use std::str::FromStr;

/// Permission that can be required on a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FolderPermission {
    /// Read the folder and metadata of the links filed under it.
    FoldersRead,
    FoldersWrite,
    FoldersUsersWrite,
    FoldersLinksWrite,
}

impl FolderPermission {
    pub fn as_str(&self) -> &'static str {
        match self {
            FolderPermission::FoldersRead => "folders.read",
            FolderPermission::FoldersWrite => "folders.write",
            FolderPermission::FoldersUsersWrite => "folders.users.write",
            FolderPermission::FoldersLinksWrite => "folders.links.write",
        }
    }
}

impl fmt::Display for FolderPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a user holds on a specific folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderUserRole {
    Owner,
    Editor,
    Viewer,
}

impl FolderUserRole {
    /// Permissions granted by this role.
    pub fn permissions(&self) -> &'static [FolderPermission] {
        use FolderPermission::*;

        match self {
            FolderUserRole::Owner => &[
                FoldersRead,
                FoldersWrite,
                FoldersUsersWrite,
                FoldersLinksWrite,
            ],
            FolderUserRole::Editor => &[FoldersRead, FoldersLinksWrite],
            FolderUserRole::Viewer => &[FoldersRead],
        }
    }

    pub fn grants(&self, permission: FolderPermission) -> bool {
        self.permissions().contains(&permission)
    }
}

impl FromStr for FolderUserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "owner" => Ok(FolderUserRole::Owner),
            "editor" => Ok(FolderUserRole::Editor),
            "viewer" => Ok(FolderUserRole::Viewer),
            other => Err(format!("unknown folder role '{other}'")),
        }
    }
}

/// Workspace-wide access level configured on a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderAccessLevel {
    Read,
    Write,
}

impl FolderAccessLevel {
    /// Role implied for workspace members without an explicit folder role.
    pub fn implied_role(&self) -> FolderUserRole {
        match self {
            FolderAccessLevel::Write => FolderUserRole::Editor,
            FolderAccessLevel::Read => FolderUserRole::Viewer,
        }
    }
}

impl FromStr for FolderAccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "read" => Ok(FolderAccessLevel::Read),
            "write" => Ok(FolderAccessLevel::Write),
            other => Err(format!("unknown folder access level '{other}'")),
        }
    }
}

/// Outcome of a folder authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Deny,
}

impl AccessDecision {
    /// Applies the folder rules: an explicit user role wins over the
    /// folder's workspace-wide access level; neither means no access.
    pub fn evaluate(
        role: Option<FolderUserRole>,
        access_level: Option<FolderAccessLevel>,
        required: FolderPermission,
    ) -> Self {
        let effective = role.or_else(|| access_level.map(|level| level.implied_role()));

        match effective {
            Some(role) if role.grants(required) => AccessDecision::Allow,
            _ => AccessDecision::Deny,
        }
    }
}

/// State of the folder access gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderAccess {
    Unchecked,
    /// The link has no folder; the authorizer was never consulted.
    Skipped,
    Allowed,
    Denied,
}

impl FolderAccess {
    /// Transition taken when the link carries no folder.
    pub fn skip(self) -> Self {
        match self {
            FolderAccess::Unchecked => FolderAccess::Skipped,
            settled => settled,
        }
    }

    /// Transition taken once the authorizer has answered.
    pub fn decide(self, decision: AccessDecision) -> Self {
        match (self, decision) {
            (FolderAccess::Unchecked, AccessDecision::Allow) => FolderAccess::Allowed,
            (FolderAccess::Unchecked, AccessDecision::Deny) => FolderAccess::Denied,
            (settled, _) => settled,
        }
    }

    /// Returns true if the pipeline may continue past the gate.
    pub fn permits(&self) -> bool {
        matches!(self, FolderAccess::Skipped | FolderAccess::Allowed)
    }
}
