//! Geometric primitives for shelf layout and rendering.
//!
//! This module provides the small set of geometric types used throughout
//! Shelfwright for positioning columns, inserts and modifier handles.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in shelf space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular box defined by minimum and maximum coordinates
//! - [`ColumnGeometry`] - Placement and dimensions of a single column
//!
//! # Coordinate System
//!
//! Layout coordinates are shelf-local and follow the physical unit:
//!
//! ```text
//!    +Y (height)
//!     ▲
//!     │
//!     │
//!   (0,0) ────────► +X (along the wall)
//! ```
//!
//! - **Origin**: The left edge of the shelf, at floor level
//! - **X-axis**: Increases rightward along the wall
//! - **Y-axis**: Increases upward
//!
//! Exporters that target screen coordinates flip the Y axis themselves.

/// A 2D point in shelf coordinate space.
///
/// # Examples
///
/// ```
/// # use shelfwright_core::geometry::Point;
/// let handle = Point::new(-3.0, -30.0);
///
/// assert_eq!(handle.x(), -3.0);
/// assert_eq!(handle.y(), -30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }
}

/// A rectangular box with minimum and maximum coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from its minimum corner and a size
    pub fn new_from_min(min: Point, size: Size) -> Self {
        Self {
            min_x: min.x,
            min_y: min.y,
            max_x: min.x + size.width,
            max_y: min.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Moves the bounds by the specified offset.
    pub fn translate(&self, offset: Point) -> Self {
        Self {
            min_x: self.min_x + offset.x,
            min_y: self.min_y + offset.y,
            max_x: self.max_x + offset.x,
            max_y: self.max_y + offset.y,
        }
    }
}

/// Placement and dimensions of a single shelf column.
///
/// This is the read-only geometry handed to column construction, to scoring
/// overrides and to renderers. `start_x` is measured from the shelf's left
/// edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnGeometry {
    index: usize,
    start_x: f32,
    width: f32,
    depth: f32,
    height: f32,
}

impl ColumnGeometry {
    pub fn new(index: usize, start_x: f32, width: f32, depth: f32, height: f32) -> Self {
        Self {
            index,
            start_x,
            width,
            depth,
            height,
        }
    }

    /// Position of the column within its shelf, left to right
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    /// X coordinate of the column's right edge
    pub fn end_x(&self) -> f32 {
        self.start_x + self.width
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}
