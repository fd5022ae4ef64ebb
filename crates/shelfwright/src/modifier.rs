//! Resize and move handles.
//!
//! A [`Modifier`] turns the two phases of a drag gesture into shelf updates.
//! [`ModifierEvent::Clicked`] snapshots the shelf's position and span; every
//! following [`ModifierEvent::Moved`] recomputes them from that snapshot plus
//! the pointer offset, clamped to the unit's walls. Edge handles then run a
//! full relayout; the move handle only repositions the shelf.

use std::{fmt, str::FromStr};

use log::{debug, trace};

use shelfwright_core::catalog::Catalog;

use crate::{
    error::ShelfwrightError,
    layout::{FillReport, Preferences},
    render::Renderer,
    shelf::Shelf,
};

/// Which handle is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKind {
    /// Moves the left edge; the right edge stays put.
    LeftEdge,
    /// Moves the right edge; the left edge stays put.
    RightEdge,
    /// Translates the whole shelf without changing its span.
    Move,
}

impl FromStr for ModifierKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::LeftEdge),
            "right" => Ok(Self::RightEdge),
            "move" => Ok(Self::Move),
            _ => Err("Unsupported handle"),
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModifierKind::LeftEdge => "left",
            ModifierKind::RightEdge => "right",
            ModifierKind::Move => "move",
        };
        write!(f, "{name}")
    }
}

/// One phase of a drag gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ModifierEvent {
    Clicked,
    /// Pointer offset along the handle axis since the click
    Moved { offset_distance: f32 },
}

/// What a handled event did to the shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierOutcome {
    /// Columns were rebuilt and refilled
    Relayout(FillReport),
    /// The shelf was repositioned without a relayout
    Moved,
    /// Nothing changed
    Ignored,
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    start_x: f32,
    target_length: f32,
}

/// A drag handle attached to a shelf.
#[derive(Debug, Clone)]
pub struct Modifier {
    kind: ModifierKind,
    snapshot: Option<Snapshot>,
}

impl Modifier {
    pub fn new(kind: ModifierKind) -> Self {
        Self {
            kind,
            snapshot: None,
        }
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    /// Handle one gesture phase.
    ///
    /// A `Moved` event before any `Clicked` is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfwrightError::Layout`] if the offset is not finite.
    pub fn on_event<R>(
        &mut self,
        shelf: &mut Shelf,
        event: ModifierEvent,
        catalog: &Catalog,
        preferences: &Preferences,
        renderer: &mut R,
    ) -> Result<ModifierOutcome, ShelfwrightError>
    where
        R: Renderer + ?Sized,
    {
        let offset = match event {
            ModifierEvent::Clicked => {
                self.snapshot = Some(Snapshot {
                    start_x: shelf.start_x(),
                    target_length: shelf.target_length(),
                });
                trace!(handle:% = self.kind; "Handle grabbed");
                return Ok(ModifierOutcome::Ignored);
            }
            ModifierEvent::Moved { offset_distance } => offset_distance,
        };

        if !offset.is_finite() {
            return Err(ShelfwrightError::Layout(format!(
                "{} handle moved by a non-finite offset",
                self.kind
            )));
        }
        let Some(snapshot) = self.snapshot else {
            debug!(handle:% = self.kind; "Handle moved before it was grabbed");
            return Ok(ModifierOutcome::Ignored);
        };

        let unit = *shelf.unit();
        let half_partition = shelf.partition_thickness() / 2.0;
        let lowest_x = unit.wall_thickness() + half_partition;

        match self.kind {
            ModifierKind::LeftEdge => {
                // Keep the right edge fixed and at least one step of span.
                let start_x = (snapshot.start_x + offset)
                    .max(lowest_x)
                    .min(snapshot.start_x + snapshot.target_length - shelf.width_step());
                shelf.set_start_x(start_x);
                shelf.set_target_length(snapshot.target_length + snapshot.start_x - start_x);
            }
            ModifierKind::RightEdge => {
                let room = unit.length() - unit.wall_thickness() - shelf.start_x() - half_partition;
                let target_length = (snapshot.target_length + offset)
                    .min(room)
                    .max(shelf.width_step());
                shelf.set_target_length(target_length);
            }
            ModifierKind::Move => {
                let highest_x =
                    unit.length() - snapshot.target_length - unit.wall_thickness() - half_partition;
                let start_x = (snapshot.start_x + offset).min(highest_x).max(lowest_x);
                shelf.set_start_x(start_x);

                debug!(start_x; "Shelf moved");
                return Ok(ModifierOutcome::Moved);
            }
        }

        debug!(
            handle:% = self.kind,
            offset,
            start_x = shelf.start_x(),
            target_length = shelf.target_length();
            "Shelf resized"
        );
        let report = shelf.relayout(catalog, preferences, renderer);
        Ok(ModifierOutcome::Relayout(report))
    }
}
