//! Error types raised while building the insert catalog.

use thiserror::Error;

/// Errors raised when registering insert descriptors.
///
/// Catalog problems are configuration errors: they surface when the catalog
/// is assembled, never while a layout is being computed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CatalogError {
    #[error("insert descriptor has an empty name")]
    EmptyName,

    #[error("insert `{0}` is already registered")]
    Duplicate(String),

    #[error("invalid insert `{name}`: {reason}")]
    InvalidDescriptor { name: String, reason: String },
}

impl CatalogError {
    /// Create a new `InvalidDescriptor` error for the named insert.
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
