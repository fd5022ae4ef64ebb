//! Shelves and the storage unit that contains them.
//!
//! A [`Shelf`] is one run of columns inside a [`Unit`]. It owns its columns
//! exclusively, rebuilds them from the span partitioner whenever its span
//! changes, and runs the fill loop over them.
//!
//! Shelf geometry is expressed in shelf-local coordinates: the first column
//! starts at `x = 0` and the floor is at `y = 0`. The shelf itself sits at
//! [`Shelf::start_x`] inside the unit.

use log::{debug, info};
use serde::Deserialize;

use shelfwright_core::{
    catalog::Catalog,
    geometry::{Bounds, ColumnGeometry, Point, Size},
};

use crate::{
    config::ShelfConfig,
    error::ShelfwrightError,
    layout::{Column, FillLoop, FillReport, Partitioner, Placement, Preferences},
    modifier::ModifierKind,
    render::Renderer,
};

/// The storage carcass a shelf is built into.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Unit {
    length: f32,
    height: f32,
    depth: f32,
    #[serde(default)]
    wall_thickness: f32,
}

impl Unit {
    pub fn new(length: f32, height: f32, depth: f32, wall_thickness: f32) -> Self {
        Self {
            length,
            height,
            depth,
            wall_thickness,
        }
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn wall_thickness(&self) -> f32 {
        self.wall_thickness
    }

    /// Checks that the unit has room for a shelf between its walls.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfwrightError::Config`] for non-positive dimensions or
    /// walls that leave no inner length.
    pub fn validate(&self) -> Result<(), ShelfwrightError> {
        for (field, value) in [
            ("length", self.length),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ShelfwrightError::Config(format!(
                    "unit.{field} must be positive, got {value}"
                )));
            }
        }
        if !self.wall_thickness.is_finite() || self.wall_thickness < 0.0 {
            return Err(ShelfwrightError::Config(format!(
                "unit.wall_thickness must not be negative, got {}",
                self.wall_thickness
            )));
        }
        if self.length <= 2.0 * self.wall_thickness {
            return Err(ShelfwrightError::Config(
                "unit walls leave no room for a shelf".to_string(),
            ));
        }
        Ok(())
    }
}

/// A vertical separator between two columns (or at either end of the shelf).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalPartition {
    x: f32,
    height: f32,
}

impl VerticalPartition {
    /// Center line of the separator, shelf-local
    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

/// One run of columns filled with inserts.
#[derive(Debug, Clone)]
pub struct Shelf {
    unit: Unit,
    start_x: f32,
    target_length: f32,
    height: f32,
    depth: f32,
    partition_thickness: f32,
    vertical_step: f32,
    modifier_offset: f32,
    cross_support_height: f32,
    cross_support_elevation: f32,
    partitioner: Partitioner,
    columns: Vec<Column>,
    partitions: Vec<VerticalPartition>,
}

impl Shelf {
    /// Create a shelf inside `unit` with empty columns.
    ///
    /// Start position, target length and height are derived from the unit
    /// through the configured fractions.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfwrightError::Config`] if the unit or the configuration is
    /// invalid.
    pub fn new(unit: Unit, config: &ShelfConfig) -> Result<Self, ShelfwrightError> {
        unit.validate()?;
        config.validate()?;
        let partitioner = Partitioner::new(
            config.width_step(),
            config.column_widths(),
            config.match_exact_width(),
        )?;

        // The shelf stays between the walls with room for at least one step.
        let half_partition = config.partition_thickness() / 2.0;
        let lowest_x = unit.wall_thickness() + half_partition;
        let highest_x = unit.length() - unit.wall_thickness() - half_partition;
        let width_step = partitioner.step();
        if highest_x - lowest_x < width_step {
            return Err(ShelfwrightError::Config(format!(
                "unit of length {} leaves no room for a {width_step} wide column",
                unit.length()
            )));
        }
        let start_x = (unit.length() * config.start_fraction())
            .max(lowest_x)
            .min(highest_x - width_step);
        let target_length = (unit.length() * config.length_fraction())
            .min(highest_x - start_x)
            .max(width_step);

        let mut shelf = Self {
            unit,
            start_x,
            target_length,
            height: unit.height() * config.height_fraction(),
            depth: config.depth(),
            partition_thickness: config.partition_thickness(),
            vertical_step: config.vertical_step(),
            modifier_offset: config.modifier_offset(),
            cross_support_height: config.cross_support_height(),
            cross_support_elevation: config.cross_support_elevation(),
            partitioner,
            columns: Vec::new(),
            partitions: Vec::new(),
        };
        shelf.set_columns();

        debug!(
            start_x = shelf.start_x,
            target_length = shelf.target_length,
            height = shelf.height;
            "Created shelf"
        );
        Ok(shelf)
    }

    pub fn unit(&self) -> &Unit {
        &self.unit
    }

    /// Left edge of the shelf inside the unit
    pub fn start_x(&self) -> f32 {
        self.start_x
    }

    /// Requested span; the columns cover it up to the partitioner's rounding
    pub fn target_length(&self) -> f32 {
        self.target_length
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn partition_thickness(&self) -> f32 {
        self.partition_thickness
    }

    pub fn vertical_step(&self) -> f32 {
        self.vertical_step
    }

    /// Minimum column width
    pub fn width_step(&self) -> f32 {
        self.partitioner.step()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn partitions(&self) -> &[VerticalPartition] {
        &self.partitions
    }

    /// Every committed placement, column by column
    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.columns.iter().flat_map(Column::placements)
    }

    pub(crate) fn set_start_x(&mut self, start_x: f32) {
        self.start_x = start_x;
    }

    pub(crate) fn set_target_length(&mut self, target_length: f32) {
        self.target_length = target_length;
    }

    /// Right edge of the last column, shelf-local; zero without columns.
    pub fn last_x(&self) -> f32 {
        self.columns.last().map_or(0.0, Column::end_x)
    }

    /// Height of the tallest column
    pub fn max_height(&self) -> f32 {
        self.columns
            .iter()
            .map(Column::height)
            .fold(0.0, f32::max)
    }

    /// Discard all columns and placements and rebuild them for the current
    /// target length.
    ///
    /// Columns are contiguous from `x = 0`. Separators sit at every column
    /// start, as tall as the taller neighbour, plus one at the last column's
    /// end.
    pub fn set_columns(&mut self) {
        let partition = self.partitioner.partition(self.target_length);

        let mut x = 0.0;
        self.columns = partition
            .widths()
            .enumerate()
            .map(|(index, width)| {
                let geometry = ColumnGeometry::new(index, x, width, self.depth, self.height);
                x += width;
                Column::new(geometry, self.vertical_step)
            })
            .collect();

        self.partitions = self
            .columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let height = match idx.checked_sub(1) {
                    Some(prev) => column.height().max(self.columns[prev].height()),
                    None => column.height(),
                };
                VerticalPartition {
                    x: column.start_x(),
                    height,
                }
            })
            .collect();
        if let Some(last) = self.columns.last() {
            self.partitions.push(VerticalPartition {
                x: last.end_x(),
                height: last.height(),
            });
        }

        debug!(
            columns = self.columns.len(),
            step = partition.step(),
            chunks:? = partition.chunks();
            "Columns rebuilt"
        );
    }

    /// Run the full pipeline: rebuild the columns, then fill them.
    ///
    /// All prior placements are discarded; the renderer receives one request
    /// per new commit.
    pub fn relayout<R>(
        &mut self,
        catalog: &Catalog,
        preferences: &Preferences,
        renderer: &mut R,
    ) -> FillReport
    where
        R: Renderer + ?Sized,
    {
        self.set_columns();
        renderer.discard_all();
        let report = FillLoop::new(catalog, preferences).run(&mut self.columns, renderer);

        info!(
            start_x = self.start_x,
            target_length = self.target_length,
            columns = self.columns.len(),
            commits = report.commits();
            "Shelf laid out"
        );
        report
    }

    /// Horizontal cross support spanning all columns, shelf-local.
    pub fn cross_support(&self) -> Bounds {
        Bounds::new_from_min(
            Point::new(
                -self.partition_thickness / 2.0,
                self.cross_support_elevation - self.cross_support_height / 2.0,
            ),
            Size::new(
                self.last_x() + self.partition_thickness,
                self.cross_support_height,
            ),
        )
    }

    /// Resting positions of the resize handles, shelf-local.
    ///
    /// The y coordinate is the handle's depth offset in front of the shelf.
    pub fn modifier_anchors(&self) -> [(ModifierKind, Point); 3] {
        let y = -self.depth;
        [
            (ModifierKind::LeftEdge, Point::new(-self.modifier_offset, y)),
            (
                ModifierKind::RightEdge,
                Point::new(self.last_x() + self.modifier_offset, y),
            ),
            (ModifierKind::Move, Point::new(self.last_x() / 2.0, y)),
        ]
    }
}
