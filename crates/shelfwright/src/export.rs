//! Export functionality for Shelfwright layouts.
//!
//! This module turns a laid-out [`Shelf`](crate::shelf::Shelf) into an output
//! format. It is the final stage of the pipeline.
//!
//! # Pipeline Position
//!
//! ```text
//! Design (unit + drags)
//!     ↓ partition
//! Columns
//!     ↓ fill
//! Committed placements
//!     ↓ export (this module)
//! Output
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: front elevation via [`svg::ElevationRenderer`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], covering style resolution failures and
//! I/O errors. [`Error`] converts into [`ShelfwrightError::Export`] at the crate
//! boundary.
//!
//! [`ShelfwrightError::Export`]: crate::ShelfwrightError::Export

/// SVG export backend.
pub mod svg;

/// Errors that can occur during export.
#[derive(Debug)]
pub enum Error {
    /// A rendering or conversion failure described by `message`.
    Render(String),
    /// An I/O error encountered while writing output.
    Io(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Io(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
