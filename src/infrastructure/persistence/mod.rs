//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link resolution
//! - [`PgFolderAccessRepository`] - Folder permission decisions
//! - [`PgTagRepository`] - Tags associated with a link
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_folder_access_repository;
pub mod pg_link_repository;
pub mod pg_tag_repository;
pub mod pg_token_repository;

pub use pg_folder_access_repository::PgFolderAccessRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_tag_repository::PgTagRepository;
pub use pg_token_repository::PgTokenRepository;
