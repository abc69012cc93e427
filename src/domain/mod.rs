//! Domain layer containing business entities and contracts.
//!
//! Nothing here depends on infrastructure or presentation layers.
//!
//! # Architecture
//!
//! - [`entities`] - Links, tags, workspaces and folder permission rules
//! - [`lookup`] - Validated link identifiers
//! - [`repositories`] - Contracts of the collaborators the pipeline consumes
//!
//! The pipeline itself lives in [`crate::application::services::LinkInfoService`].

pub mod entities;
pub mod lookup;
pub mod repositories;
