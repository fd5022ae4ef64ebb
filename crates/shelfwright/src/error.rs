//! Error types for Shelfwright operations.
//!
//! This module provides the main error type [`ShelfwrightError`]. Placement
//! failures are not errors: a candidate that cannot be placed simply scores
//! zero, and a shelf with no viable placement is a valid (empty) layout.

use std::{io, ops::Range};

use thiserror::Error;

use shelfwright_core::error::CatalogError;

/// The main error type for Shelfwright operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the design source and the byte span of the
/// offending TOML, so callers can point at the exact location.
#[derive(Debug, Error)]
pub enum ShelfwrightError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl ShelfwrightError {
    /// Create a new `Parse` error from a TOML error and the source it came from.
    pub fn new_parse_error(err: toml::de::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            message: err.message().to_string(),
            span: err.span(),
            src: src.into(),
        }
    }
}

impl From<crate::export::Error> for ShelfwrightError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
