//! Declarative insert descriptors.
//!
//! An insert is a functional component placed into a column: a drawer, a
//! pull-out desk, a shelf. Every insert type is described by an
//! [`InsertDescriptor`], a plain parameter set that tells the layout engine
//! where the insert would like to sit, how strongly it cares, and how many
//! vertical slots it consumes once committed.
//!
//! Descriptors are assembled with consuming `with_*` methods and become
//! read-only once registered in a [`Catalog`](crate::catalog::Catalog).

use std::{fmt, str::FromStr};

use crate::{error::CatalogError, geometry::ColumnGeometry};

/// Attachment side of an insert inside its column.
///
/// A `Center` insert spans the full column width, so it conflicts with
/// `Left` and `Right` inserts over the same slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Center,
}

impl Side {
    /// All sides, in candidate enumeration order.
    pub const ALL: [Side; 3] = [Side::Center, Side::Left, Side::Right];

    /// Dense index usable for per-side lookup tables.
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
            Side::Center => 2,
        }
    }

    /// Returns true if claims on `self` and `other` compete for the same space.
    pub fn conflicts_with(self, other: Side) -> bool {
        self == other || self == Side::Center || other == Side::Center
    }
}

impl FromStr for Side {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "center" => Ok(Self::Center),
            _ => Err("Unsupported side"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Center => "center",
        };
        write!(f, "{name}")
    }
}

/// The column edge an insert measures its distance from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Reference {
    #[default]
    Bottom,
    Top,
}

/// Number of grid slots an insert claims around its anchor slot.
///
/// The anchor slot itself is always claimed, so a footprint of
/// `above = 2, below = 1` claims four slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SlotFootprint {
    above: u32,
    below: u32,
}

impl SlotFootprint {
    pub fn new(above: u32, below: u32) -> Self {
        Self { above, below }
    }

    pub fn above(self) -> u32 {
        self.above
    }

    pub fn below(self) -> u32 {
        self.below
    }

    /// Total number of slots claimed, anchor included
    pub fn span(self) -> u32 {
        self.above + self.below + 1
    }
}

/// Type-specific adjustment of the standard placement score.
///
/// Receives the standard score, the candidate column and the anchor slot;
/// returns the score to use instead. Returning `0.0` rejects the candidate.
pub type ScoreOverride = fn(base: f32, column: &ColumnGeometry, anchor: u32) -> f32;

/// Immutable parameter set of one insert type.
///
/// Distances are measured in slot units from the descriptor's [`Reference`].
///
/// # Examples
///
/// ```
/// use shelfwright_core::insert::{InsertDescriptor, Reference, Side, SlotFootprint};
///
/// let bin = InsertDescriptor::new("Bin")
///     .with_reference(Reference::Bottom)
///     .with_ideal_distance(2.0)
///     .with_vertical_weight(3.0)
///     .with_footprint(Side::Center, SlotFootprint::new(1, 0))
///     .with_priority(4.0);
///
/// assert_eq!(bin.name(), "Bin");
/// assert_eq!(bin.footprint(Side::Center), Some(SlotFootprint::new(1, 0)));
/// assert_eq!(bin.footprint(Side::Left), None);
/// ```
#[derive(Debug, Clone)]
pub struct InsertDescriptor {
    name: String,
    reference: Reference,
    ideal_distance: f32,
    min_distance: f32,
    vertical_weight: f32,
    footprints: [Option<SlotFootprint>; 3],
    priority: f32,
    one_per_column: bool,
    fill_per_column: bool,
    interactive: bool,
    min_column_width: Option<f32>,
    score_override: Option<ScoreOverride>,
}

impl InsertDescriptor {
    /// Create a descriptor with neutral defaults: bottom reference, zero
    /// distances, unit weight and priority, and no side footprints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reference: Reference::Bottom,
            ideal_distance: 0.0,
            min_distance: 0.0,
            vertical_weight: 1.0,
            footprints: [None; 3],
            priority: 1.0,
            one_per_column: false,
            fill_per_column: false,
            interactive: false,
            min_column_width: None,
            score_override: None,
        }
    }

    pub fn with_reference(mut self, reference: Reference) -> Self {
        self.reference = reference;
        self
    }

    pub fn with_ideal_distance(mut self, distance: f32) -> Self {
        self.ideal_distance = distance;
        self
    }

    pub fn with_min_distance(mut self, distance: f32) -> Self {
        self.min_distance = distance;
        self
    }

    pub fn with_vertical_weight(mut self, weight: f32) -> Self {
        self.vertical_weight = weight;
        self
    }

    /// Allow attachment on `side` with the given footprint
    pub fn with_footprint(mut self, side: Side, footprint: SlotFootprint) -> Self {
        self.footprints[side.index()] = Some(footprint);
        self
    }

    /// Allow attachment on every side with the same footprint
    pub fn with_footprint_all_sides(mut self, footprint: SlotFootprint) -> Self {
        self.footprints = [Some(footprint); 3];
        self
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_one_per_column(mut self, one_per_column: bool) -> Self {
        self.one_per_column = one_per_column;
        self
    }

    pub fn with_fill_per_column(mut self, fill_per_column: bool) -> Self {
        self.fill_per_column = fill_per_column;
        self
    }

    /// Mark the insert as user-manipulable (e.g. a sliding face)
    pub fn with_interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    pub fn with_min_column_width(mut self, width: f32) -> Self {
        self.min_column_width = Some(width);
        self
    }

    pub fn with_score_override(mut self, score_override: ScoreOverride) -> Self {
        self.score_override = Some(score_override);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> Reference {
        self.reference
    }

    pub fn ideal_distance(&self) -> f32 {
        self.ideal_distance
    }

    pub fn min_distance(&self) -> f32 {
        self.min_distance
    }

    pub fn vertical_weight(&self) -> f32 {
        self.vertical_weight
    }

    /// Footprint on `side`, or `None` if the insert cannot attach there
    pub fn footprint(&self, side: Side) -> Option<SlotFootprint> {
        self.footprints[side.index()]
    }

    pub fn priority(&self) -> f32 {
        self.priority
    }

    pub fn one_per_column(&self) -> bool {
        self.one_per_column
    }

    pub fn fill_per_column(&self) -> bool {
        self.fill_per_column
    }

    pub fn interactive(&self) -> bool {
        self.interactive
    }

    pub fn min_column_width(&self) -> Option<f32> {
        self.min_column_width
    }

    pub fn score_override(&self) -> Option<ScoreOverride> {
        self.score_override
    }

    /// Check the descriptor for values the layout engine cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for an empty name, negative or non-finite
    /// distances, an ideal distance below the minimum, a non-positive weight
    /// or priority, a descriptor without any side footprint, or a
    /// non-positive minimum column width.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let invalid = |reason: &str| Err(CatalogError::invalid(&self.name, reason));

        if !self.ideal_distance.is_finite() || self.ideal_distance < 0.0 {
            return invalid("ideal distance must be a finite, non-negative slot count");
        }
        if !self.min_distance.is_finite() || self.min_distance < 0.0 {
            return invalid("minimum distance must be a finite, non-negative slot count");
        }
        if self.ideal_distance < self.min_distance {
            return invalid("ideal distance is below the minimum distance");
        }
        if !self.vertical_weight.is_finite() || self.vertical_weight <= 0.0 {
            return invalid("vertical weight must be positive");
        }
        if !self.priority.is_finite() || self.priority <= 0.0 {
            return invalid("priority must be positive");
        }
        if self.footprints.iter().all(Option::is_none) {
            return invalid("no side footprint declared");
        }
        if self
            .min_column_width
            .is_some_and(|width| !width.is_finite() || width <= 0.0)
        {
            return invalid("minimum column width must be positive");
        }

        Ok(())
    }
}
