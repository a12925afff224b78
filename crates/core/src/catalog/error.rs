//! Catalog error types.

use thiserror::Error;

/// Errors raised while resolving a currency code to its descriptor.
///
/// The two kinds are deliberately distinct: `NotConfigured` means no backend
/// was consulted at all, `NotFound` means a backend was consulted and does
/// not know the code.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    /// No repository backend registered and the built-in fallback is
    /// disabled or unavailable.
    #[error("No currency repository registered")]
    NotConfigured,

    /// The backend was consulted but does not know this code.
    #[error("Currency {0} not found")]
    NotFound(String),
}
