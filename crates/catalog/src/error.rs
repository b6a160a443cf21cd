//! Catalog error model.

use thiserror::Error;

use crate::store::StoreError;

/// Result type used across the catalog service.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures surfaced by catalog operations.
///
/// `NotFound` and `SomeNotFound` are deterministic client-side
/// failures; `Storage` wraps whatever the storage adapter reported,
/// unmodified.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No visible product with this id (absent or soft-deleted).
    #[error("Product with id #{0} not found.")]
    NotFound(i64),

    /// Bulk validation matched fewer rows than distinct requested ids.
    /// Deliberately does not say which ids were missing.
    #[error("Some products were not found")]
    SomeNotFound,

    /// Storage failure, propagated as-is.
    #[error(transparent)]
    Storage(#[from] StoreError),
}
