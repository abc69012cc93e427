//! Core domain entities.
//!
//! Entities are plain data structures; the rules that decide folder access
//! live next to the types they operate on in [`folder`].
//!
//! # Entity Types
//!
//! - [`Link`] - A short link owned by a workspace
//! - [`Tag`] - A label associated with links
//! - [`Workspace`] / [`WorkspaceContext`] - Tenant and the authenticated caller
//! - [`FolderAccess`] - State of the folder authorization gate

pub mod folder;
pub mod link;
pub mod tag;
pub mod workspace;

pub use folder::{
    AccessDecision, FolderAccess, FolderAccessLevel, FolderPermission, FolderUserRole,
};
pub use link::{Link, LinkWithTags};
pub use tag::{Tag, TagEntry};
pub use workspace::{Workspace, WorkspaceContext};
