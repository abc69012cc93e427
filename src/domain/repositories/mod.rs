//! Repository trait definitions for the domain layer.
//!
//! These traits are the seams between the link-info pipeline and the
//! capabilities it consumes: link resolution, folder authorization, tag
//! listing and token lookup. Concrete implementations live in
//! `crate::infrastructure::persistence`; mocks are generated via `mockall`.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Resolve identifiers to a single link
//! - [`FolderAccessRepository`] - Folder permission decisions
//! - [`TagRepository`] - Tags associated with a link
//! - [`TokenRepository`] - API token authentication

pub mod folder_access_repository;
pub mod link_repository;
pub mod tag_repository;
pub mod token_repository;

pub use folder_access_repository::FolderAccessRepository;
pub use link_repository::LinkRepository;
pub use tag_repository::TagRepository;
pub use token_repository::{ApiToken, NewApiToken, TokenRepository};

#[cfg(test)]
pub use folder_access_repository::MockFolderAccessRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
