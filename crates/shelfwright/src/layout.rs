//! Layout engine for shelf columns and their inserts.
//!
//! This module turns a target span into columns and fills every column with
//! inserts from a [`Catalog`](shelfwright_core::catalog::Catalog).
//!
//! # Pipeline Position
//!
//! ```text
//! target length
//!     ↓ partition
//! column widths
//!     ↓ column
//! empty slot grids
//!     ↓ fill (scorer per candidate)
//! committed placements
//!     ↓ render
//! Output
//! ```
//!
//! # Submodules
//!
//! - [`partition`] - Splits a span into preferred column widths
//! - [`column`] - Per-column slot grid and occupancy
//! - [`scorer`] - Placement suitability scores and fill preferences
//! - [`fill`] - The greedy fill loop

pub mod column;
pub mod fill;
pub mod partition;
pub mod scorer;

pub use column::{Column, Placement};
pub use fill::{Candidate, FillLoop, FillReport, FillState};
pub use partition::{Partition, Partitioner};
pub use scorer::Preferences;
