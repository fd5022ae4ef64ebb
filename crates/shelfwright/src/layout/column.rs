//! Column slot model.
//!
//! A [`Column`] divides its height into a grid of equally sized slots and
//! tracks, per attachment side, which slots committed inserts have claimed.
//! Slot 0 is the bottom slot.

use std::{collections::BTreeSet, ops::RangeInclusive};

use log::debug;

use shelfwright_core::{
    catalog::InsertId,
    geometry::ColumnGeometry,
    insert::{Reference, Side, SlotFootprint},
};

use crate::render::RenderHandle;

/// A committed insert: which type went where.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    insert: InsertId,
    column: usize,
    anchor: u32,
    side: Side,
    slots: RangeInclusive<u32>,
    handle: RenderHandle,
}

impl Placement {
    pub fn new(
        insert: InsertId,
        column: usize,
        anchor: u32,
        side: Side,
        slots: RangeInclusive<u32>,
        handle: RenderHandle,
    ) -> Self {
        Self {
            insert,
            column,
            anchor,
            side,
            slots,
            handle,
        }
    }

    pub fn insert(&self) -> InsertId {
        self.insert
    }

    /// Index of the owning column
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn anchor(&self) -> u32 {
        self.anchor
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Claimed slots, inclusive
    pub fn slots(&self) -> RangeInclusive<u32> {
        self.slots.clone()
    }

    /// Handle returned by the renderer; opaque to the engine
    pub fn handle(&self) -> RenderHandle {
        self.handle
    }
}

/// A vertical section of a shelf with its own slot grid.
#[derive(Debug, Clone)]
pub struct Column {
    geometry: ColumnGeometry,
    vertical_step: f32,
    slot_count: u32,
    claimed: [BTreeSet<u32>; 3],
    placements: Vec<Placement>,
}

impl Column {
    /// Create an empty column; the slot count is `floor(height / vertical_step)`.
    ///
    /// `vertical_step` must be positive.
    pub fn new(geometry: ColumnGeometry, vertical_step: f32) -> Self {
        debug_assert!(vertical_step > 0.0, "vertical step must be positive");
        let slot_count = (geometry.height() / vertical_step).floor().max(0.0) as u32;

        Self {
            geometry,
            vertical_step,
            slot_count,
            claimed: Default::default(),
            placements: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &ColumnGeometry {
        &self.geometry
    }

    pub fn index(&self) -> usize {
        self.geometry.index()
    }

    pub fn start_x(&self) -> f32 {
        self.geometry.start_x()
    }

    pub fn end_x(&self) -> f32 {
        self.geometry.end_x()
    }

    pub fn width(&self) -> f32 {
        self.geometry.width()
    }

    pub fn height(&self) -> f32 {
        self.geometry.height()
    }

    pub fn vertical_step(&self) -> f32 {
        self.vertical_step
    }

    pub fn slot_count(&self) -> u32 {
        self.slot_count
    }

    /// Slot capacity summed over the two physical lanes.
    ///
    /// Left and right inserts may share a slot while a center insert takes
    /// both lanes, so one fill pass commits at most this many placements.
    pub fn lane_slots(&self) -> u32 {
        2 * self.slot_count
    }

    /// Distance of `anchor` from the given column edge, in slots.
    ///
    /// The bottom slot is at distance 0 from the bottom; the top slot is at
    /// distance 0 from the top.
    pub fn distance_from(&self, reference: Reference, anchor: u32) -> u32 {
        match reference {
            Reference::Bottom => anchor,
            Reference::Top => self.slot_count.saturating_sub(1).saturating_sub(anchor),
        }
    }

    /// Slots an insert anchored at `anchor` would claim, or `None` if the
    /// footprint leaves the grid.
    pub fn claim_range(
        &self,
        anchor: u32,
        footprint: SlotFootprint,
    ) -> Option<RangeInclusive<u32>> {
        let low = anchor.checked_sub(footprint.below())?;
        let high = anchor.checked_add(footprint.above())?;
        (high < self.slot_count).then_some(low..=high)
    }

    /// Returns true if no conflicting claim overlaps `slots` on `side`.
    pub fn is_free(&self, side: Side, slots: &RangeInclusive<u32>) -> bool {
        Side::ALL
            .iter()
            .filter(|other| side.conflicts_with(**other))
            .all(|other| {
                self.claimed[other.index()]
                    .range(slots.clone())
                    .next()
                    .is_none()
            })
    }

    /// Slots claimed by inserts attached on `side`
    pub fn claimed(&self, side: Side) -> &BTreeSet<u32> {
        &self.claimed[side.index()]
    }

    /// Number of slots an insert could still claim on `side`
    pub fn free_slots(&self, side: Side) -> u32 {
        (0..self.slot_count)
            .filter(|&slot| self.is_free(side, &(slot..=slot)))
            .count() as u32
    }

    /// Number of committed inserts of the given type
    pub fn count_of(&self, insert: InsertId) -> usize {
        self.placements
            .iter()
            .filter(|placement| placement.insert == insert)
            .count()
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Record a committed placement and claim its slots.
    ///
    /// The caller is responsible for checking [`Column::is_free`] first.
    pub fn commit(&mut self, placement: Placement) {
        self.claim(placement.side, &placement.slots);
        self.placements.push(placement);
    }

    /// Mark `slots` as taken on `side`.
    pub fn claim(&mut self, side: Side, slots: &RangeInclusive<u32>) {
        debug_assert!(self.is_free(side, slots), "claiming taken slots");
        self.claimed[side.index()].extend(slots.clone());
    }

    /// Finalize the column once the fill loop is done with it.
    ///
    /// Orders committed placements bottom-up.
    pub fn update(&mut self) {
        self.placements
            .sort_by_key(|placement| (*placement.slots.start(), placement.side.index()));

        let used: usize = self.claimed.iter().map(BTreeSet::len).sum();
        debug!(
            column = self.index(),
            placements = self.placements.len(),
            slots = self.slot_count,
            claimed = used;
            "Column updated"
        );
    }
}
