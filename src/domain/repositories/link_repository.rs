//! Repository trait for link resolution.

use crate::domain::entities::Link;
use crate::domain::lookup::LinkLookup;
use crate::error::AppError;
use async_trait::async_trait;

/// Resolves caller-supplied identifiers to a single link.
///
/// Precedence between selectors, when more than one is supplied, belongs to
/// the implementation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds the unique link matching `lookup` inside `workspace_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches.
    /// Returns [`AppError::AmbiguousMatch`] if more than one link matches.
    /// Returns [`AppError::Internal`] on database errors.
    async fn resolve(&self, lookup: &LinkLookup, workspace_id: &str) -> Result<Link, AppError>;
}
