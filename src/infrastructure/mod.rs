//! Infrastructure layer for external integrations.
//!
//! Implements the repository contracts defined by the domain layer on top of
//! PostgreSQL.
//!
//! # Modules
//!
//! - [`persistence`] - PostgreSQL repository implementations

pub mod persistence;
