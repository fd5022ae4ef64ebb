//! Placement scoring.
//!
//! [`score`] rates how well one insert type fits one anchor slot on one side of
//! one column. It is a pure read of the descriptor and the column's current
//! occupancy; a score of zero means the candidate cannot be placed.
//!
//! The standard score is
//!
//! ```text
//! deviation = |distance - ideal|
//! quality   = 1 / (1 + vertical_weight * deviation)
//! score     = priority * quality * preference
//! ```
//!
//! Inserts that fill their column gain a quarter of their score for every
//! instance already committed there. A descriptor's score override, if any,
//! receives the standard score last.

use log::trace;

use shelfwright_core::{
    catalog::{Catalog, InsertId},
    insert::{InsertDescriptor, Side},
};

use super::column::Column;

/// Score bonus per instance already committed, for fill-per-column inserts.
const FILL_BONUS: f32 = 0.25;

/// Per-insert fill preference weights, indexed by [`InsertId`].
///
/// Each weight is a multiplier in `[0, 1]` applied to the standard score; zero
/// disables the insert type.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    weights: Vec<f32>,
}

impl Preferences {
    /// Weight used for inserts without a configured preference
    pub const DEFAULT: f32 = 0.5;

    /// Give every insert in `catalog` the same weight
    pub fn uniform(catalog: &Catalog, weight: f32) -> Self {
        Self {
            weights: vec![weight; catalog.len()],
        }
    }

    /// Set the weight of one insert type, clamped to `[0, 1]`.
    pub fn set(&mut self, insert: InsertId, weight: f32) {
        let idx = insert.index();
        if idx >= self.weights.len() {
            self.weights.resize(idx + 1, Self::DEFAULT);
        }
        self.weights[idx] = if weight.is_nan() {
            0.0
        } else {
            weight.clamp(0.0, 1.0)
        };
    }

    /// Weight of one insert type; unknown ids get [`Preferences::DEFAULT`].
    pub fn get(&self, insert: InsertId) -> f32 {
        self.weights
            .get(insert.index())
            .copied()
            .unwrap_or(Self::DEFAULT)
    }
}

/// Score placing `descriptor` at `anchor` on `side` of `column`.
///
/// Returns `0.0` when the footprint leaves the grid, overlaps a conflicting
/// claim, sits closer to the reference edge than the minimum distance, would
/// be a second instance of a one-per-column insert, lands in a column narrower
/// than the insert's minimum width, or when the preference is zero. Otherwise
/// the result is positive and finite.
pub fn score(
    descriptor: &InsertDescriptor,
    insert: InsertId,
    column: &Column,
    anchor: u32,
    side: Side,
    preference: f32,
) -> f32 {
    if preference.is_nan() || preference <= 0.0 {
        return 0.0;
    }
    let Some(footprint) = descriptor.footprint(side) else {
        return 0.0;
    };
    if descriptor
        .min_column_width()
        .is_some_and(|width| column.width() < width)
    {
        return 0.0;
    }
    let Some(slots) = column.claim_range(anchor, footprint) else {
        return 0.0;
    };
    if !column.is_free(side, &slots) {
        return 0.0;
    }

    let distance = column.distance_from(descriptor.reference(), anchor) as f32;
    if distance < descriptor.min_distance() {
        return 0.0;
    }

    let existing = column.count_of(insert);
    if descriptor.one_per_column() && existing > 0 {
        return 0.0;
    }

    let deviation = (distance - descriptor.ideal_distance()).abs();
    let quality = 1.0 / (1.0 + descriptor.vertical_weight() * deviation);
    let mut base = descriptor.priority() * quality * preference.min(1.0);
    if descriptor.fill_per_column() {
        base *= 1.0 + FILL_BONUS * existing as f32;
    }

    let value = match descriptor.score_override() {
        Some(score_override) => score_override(base, column.geometry(), anchor),
        None => base,
    };

    trace!(
        insert = descriptor.name(),
        column = column.index(),
        anchor,
        side:%,
        deviation,
        value;
        "Scored candidate"
    );

    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use shelfwright_core::{
        geometry::ColumnGeometry,
        insert::{Reference, SlotFootprint},
    };

    use super::*;
    use crate::{layout::Placement, render::RenderHandle};

    fn column(width: f32, height: f32) -> Column {
        Column::new(ColumnGeometry::new(0, 0.0, width, 30.0, height), 4.0)
    }

    fn single(descriptor: InsertDescriptor) -> (Catalog, InsertId) {
        let mut catalog = Catalog::new();
        let id = catalog.register(descriptor).unwrap();
        (catalog, id)
    }

    fn bin() -> InsertDescriptor {
        InsertDescriptor::new("Bin")
            .with_ideal_distance(3.0)
            .with_min_distance(1.0)
            .with_vertical_weight(2.0)
            .with_priority(4.0)
            .with_footprint(Side::Center, SlotFootprint::default())
    }

    fn score_at(catalog: &Catalog, id: InsertId, column: &Column, anchor: u32, side: Side) -> f32 {
        score(catalog.get(id).unwrap(), id, column, anchor, side, 1.0)
    }

    #[test]
    fn test_ideal_slot_scores_priority_times_preference() {
        let (catalog, id) = single(bin());
        let column = column(20.0, 32.0);

        assert_approx_eq!(f32, score_at(&catalog, id, &column, 3, Side::Center), 4.0);
        assert_approx_eq!(
            f32,
            score(catalog.get(id).unwrap(), id, &column, 3, Side::Center, 0.5),
            2.0
        );
    }

    #[test]
    fn test_score_decreases_with_deviation() {
        let (catalog, id) = single(bin());
        let column = column(20.0, 32.0);

        let scores: Vec<f32> = (3..8)
            .map(|anchor| score_at(&catalog, id, &column, anchor, Side::Center))
            .collect();
        assert!(scores.windows(2).all(|pair| pair[0] > pair[1]));
        assert!(scores.iter().all(|&s| s > 0.0));
    }

    #[test]
    fn test_heavier_weight_penalizes_more() {
        let column = column(20.0, 32.0);
        let (light, light_id) = single(bin().with_vertical_weight(1.0));
        let (heavy, heavy_id) = single(bin().with_vertical_weight(5.0));

        let light_score = score_at(&light, light_id, &column, 5, Side::Center);
        let heavy_score = score_at(&heavy, heavy_id, &column, 5, Side::Center);
        assert!(light_score > heavy_score);
    }

    #[test]
    fn test_higher_priority_outranks() {
        let column = column(20.0, 32.0);
        let (low, low_id) = single(bin().with_priority(2.0));
        let (high, high_id) = single(bin().with_priority(6.0));

        assert!(
            score_at(&high, high_id, &column, 4, Side::Center)
                > score_at(&low, low_id, &column, 4, Side::Center)
        );
    }

    #[test]
    fn test_min_distance_is_a_hard_floor() {
        let (catalog, id) = single(bin());
        let column = column(20.0, 32.0);

        assert_eq!(score_at(&catalog, id, &column, 0, Side::Center), 0.0);
        assert!(score_at(&catalog, id, &column, 1, Side::Center) > 0.0);
    }

    #[test]
    fn test_top_reference_measures_from_top() {
        let (catalog, id) = single(bin().with_reference(Reference::Top));
        let column = column(20.0, 32.0);

        // 8 slots: anchor 4 is three slots below the top slot
        assert_approx_eq!(f32, score_at(&catalog, id, &column, 4, Side::Center), 4.0);
        assert_eq!(score_at(&catalog, id, &column, 7, Side::Center), 0.0);
    }

    #[test]
    fn test_undeclared_side_scores_zero() {
        let (catalog, id) = single(bin());
        let column = column(20.0, 32.0);
        assert_eq!(score_at(&catalog, id, &column, 3, Side::Left), 0.0);
    }

    #[test]
    fn test_out_of_grid_scores_zero() {
        let (catalog, id) =
            single(bin().with_footprint(Side::Center, SlotFootprint::new(2, 0)));
        let column = column(20.0, 32.0);

        assert!(score_at(&catalog, id, &column, 5, Side::Center) > 0.0);
        assert_eq!(score_at(&catalog, id, &column, 6, Side::Center), 0.0);
    }

    #[test]
    fn test_claimed_slot_scores_zero() {
        let (catalog, id) = single(bin());
        let mut column = column(20.0, 32.0);
        column.commit(Placement::new(id, 0, 3, Side::Center, 3..=3, RenderHandle::new(0)));

        assert_eq!(score_at(&catalog, id, &column, 3, Side::Center), 0.0);
        assert!(score_at(&catalog, id, &column, 4, Side::Center) > 0.0);
    }

    #[test]
    fn test_one_per_column() {
        let (catalog, id) = single(bin().with_one_per_column(true));
        let mut column = column(20.0, 32.0);
        assert!(score_at(&catalog, id, &column, 5, Side::Center) > 0.0);

        column.commit(Placement::new(id, 0, 3, Side::Center, 3..=3, RenderHandle::new(0)));
        assert_eq!(score_at(&catalog, id, &column, 5, Side::Center), 0.0);
    }

    #[test]
    fn test_fill_per_column_rewards_repetition() {
        let (catalog, id) = single(bin().with_fill_per_column(true));
        let mut column = column(20.0, 32.0);
        let before = score_at(&catalog, id, &column, 5, Side::Center);

        column.commit(Placement::new(id, 0, 3, Side::Center, 3..=3, RenderHandle::new(0)));
        let after = score_at(&catalog, id, &column, 5, Side::Center);

        assert_approx_eq!(f32, after, before * 1.25);
    }

    #[test]
    fn test_min_column_width() {
        let (catalog, id) = single(bin().with_min_column_width(30.0));

        assert_eq!(score_at(&catalog, id, &column(20.0, 32.0), 3, Side::Center), 0.0);
        assert!(score_at(&catalog, id, &column(30.0, 32.0), 3, Side::Center) > 0.0);
    }

    #[test]
    fn test_zero_preference_disables() {
        let (catalog, id) = single(bin());
        let column = column(20.0, 32.0);
        assert_eq!(score(catalog.get(id).unwrap(), id, &column, 3, Side::Center, 0.0), 0.0);
    }

    #[test]
    fn test_override_receives_standard_score() {
        fn halve(base: f32, _column: &ColumnGeometry, _anchor: u32) -> f32 {
            base / 2.0
        }
        fn negative(_base: f32, _column: &ColumnGeometry, _anchor: u32) -> f32 {
            -1.0
        }

        let column = column(20.0, 32.0);
        let (halved, halved_id) = single(bin().with_score_override(halve));
        let (clamped, clamped_id) = single(bin().with_score_override(negative));

        assert_approx_eq!(f32, score_at(&halved, halved_id, &column, 3, Side::Center), 2.0);
        assert_eq!(score_at(&clamped, clamped_id, &column, 3, Side::Center), 0.0);
    }

    #[test]
    fn test_preferences_default_and_clamp() {
        let catalog = Catalog::builtin();
        let drawer = catalog.id_of("Drawer").unwrap();
        let desk = catalog.id_of("PullDesk").unwrap();
        let mut preferences = Preferences::uniform(&catalog, Preferences::DEFAULT);

        preferences.set(drawer, 1.5);
        preferences.set(desk, f32::NAN);

        assert_approx_eq!(f32, preferences.get(drawer), 1.0);
        assert_eq!(preferences.get(desk), 0.0);
        assert_approx_eq!(
            f32,
            preferences.get(catalog.id_of("FixedShelf").unwrap()),
            Preferences::DEFAULT
        );
    }
}
