//! Property tests for the greedy fill loop over random catalogs and columns.

use proptest::prelude::*;

use shelfwright::{
    catalog::Catalog,
    geometry::ColumnGeometry,
    insert::{InsertDescriptor, Reference, Side, SlotFootprint},
    layout::{Column, FillLoop, Preferences, scorer},
    render::RecordingRenderer,
};

#[derive(Debug, Clone)]
struct InsertParams {
    top: bool,
    min_distance: u32,
    extra_distance: u32,
    weight: f32,
    priority: f32,
    footprints: [Option<(u32, u32)>; 3],
    one_per_column: bool,
    fill_per_column: bool,
}

fn footprint_strategy() -> impl Strategy<Value = Option<(u32, u32)>> {
    prop::option::of((0u32..4, 0u32..3))
}

fn insert_strategy() -> impl Strategy<Value = InsertParams> {
    (
        any::<bool>(),
        0u32..4,
        0u32..6,
        0.1f32..10.0,
        0.1f32..10.0,
        footprint_strategy(),
        footprint_strategy(),
        (0u32..4, 0u32..3),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(top, min_distance, extra_distance, weight, priority, left, right, center, one, fill)| {
                InsertParams {
                    top,
                    min_distance,
                    extra_distance,
                    weight,
                    priority,
                    footprints: [left, right, Some(center)],
                    one_per_column: one,
                    fill_per_column: fill,
                }
            },
        )
}

fn build_catalog(params: &[InsertParams]) -> Catalog {
    let descriptors = params.iter().enumerate().map(|(idx, p)| {
        let mut descriptor = InsertDescriptor::new(format!("Insert{idx}"))
            .with_reference(if p.top { Reference::Top } else { Reference::Bottom })
            .with_min_distance(p.min_distance as f32)
            .with_ideal_distance((p.min_distance + p.extra_distance) as f32)
            .with_vertical_weight(p.weight)
            .with_priority(p.priority)
            .with_one_per_column(p.one_per_column)
            .with_fill_per_column(p.fill_per_column);
        for (side, footprint) in [Side::Left, Side::Right, Side::Center]
            .into_iter()
            .zip(p.footprints)
        {
            if let Some((above, below)) = footprint {
                descriptor = descriptor.with_footprint(side, SlotFootprint::new(above, below));
            }
        }
        descriptor
    });
    Catalog::from_descriptors(descriptors).unwrap()
}

fn build_columns(heights: &[f32]) -> Vec<Column> {
    heights
        .iter()
        .enumerate()
        .map(|(idx, &height)| {
            Column::new(
                ColumnGeometry::new(idx, idx as f32 * 20.0, 20.0, 30.0, height),
                4.0,
            )
        })
        .collect()
}

fn fill(params: &[InsertParams], heights: &[f32]) -> (Catalog, Vec<Column>, usize, usize) {
    let catalog = build_catalog(params);
    let preferences = Preferences::uniform(&catalog, 1.0);
    let mut columns = build_columns(heights);
    let mut renderer = RecordingRenderer::new();
    let report = FillLoop::new(&catalog, &preferences).run(&mut columns, &mut renderer);
    assert_eq!(renderer.records().len(), report.commits());
    (catalog, columns, report.commits(), report.iterations())
}

/// The loop terminates within the lane capacity of its columns. Each slot
/// holds at most one insert per side lane, and a center insert takes both
/// lanes (see `Column::lane_slots`).
fn check_terminates(params: &[InsertParams], heights: &[f32]) -> Result<(), TestCaseError> {
    let (_, columns, commits, iterations) = fill(params, heights);
    let lane_slots: u32 = columns.iter().map(Column::lane_slots).sum();

    prop_assert!(commits <= lane_slots as usize);
    prop_assert_eq!(iterations, commits + 1);
    Ok(())
}

/// After termination no candidate anywhere scores above zero.
fn check_greedy_fixpoint(params: &[InsertParams], heights: &[f32]) -> Result<(), TestCaseError> {
    let (catalog, columns, _, _) = fill(params, heights);

    for (id, descriptor) in catalog.iter() {
        for column in &columns {
            for anchor in 0..column.slot_count() {
                for side in Side::ALL {
                    let score = scorer::score(descriptor, id, column, anchor, side, 1.0);
                    prop_assert_eq!(score, 0.0);
                }
            }
        }
    }
    Ok(())
}

/// Claimed ranges never overlap on conflicting sides of one column.
fn check_disjoint_claims(params: &[InsertParams], heights: &[f32]) -> Result<(), TestCaseError> {
    let (_, columns, _, _) = fill(params, heights);

    for column in &columns {
        let placements = column.placements();
        for (i, a) in placements.iter().enumerate() {
            prop_assert!(*a.slots().end() < column.slot_count());
            for b in &placements[i + 1..] {
                if a.side().conflicts_with(b.side()) {
                    let overlap = a.slots().start().max(b.slots().start())
                        <= a.slots().end().min(b.slots().end());
                    prop_assert!(!overlap, "{:?} overlaps {:?}", a, b);
                }
            }
        }
    }
    Ok(())
}

/// Two runs over identical inputs commit identical placements.
fn check_deterministic(params: &[InsertParams], heights: &[f32]) -> Result<(), TestCaseError> {
    let (_, first, _, _) = fill(params, heights);
    let (_, second, _, _) = fill(params, heights);

    let summary = |columns: &[Column]| {
        columns
            .iter()
            .flat_map(Column::placements)
            .map(|p| (p.insert(), p.column(), p.anchor(), p.side(), p.slots()))
            .collect::<Vec<_>>()
    };
    prop_assert_eq!(summary(&first), summary(&second));
    Ok(())
}

proptest! {
    #[test]
    fn terminates(
        params in prop::collection::vec(insert_strategy(), 1..4),
        heights in prop::collection::vec(0.0f32..80.0, 0..4),
    ) {
        check_terminates(&params, &heights)?;
    }

    #[test]
    fn greedy_fixpoint(
        params in prop::collection::vec(insert_strategy(), 1..4),
        heights in prop::collection::vec(0.0f32..80.0, 0..4),
    ) {
        check_greedy_fixpoint(&params, &heights)?;
    }

    #[test]
    fn disjoint_claims(
        params in prop::collection::vec(insert_strategy(), 1..4),
        heights in prop::collection::vec(0.0f32..80.0, 0..4),
    ) {
        check_disjoint_claims(&params, &heights)?;
    }

    #[test]
    fn deterministic(
        params in prop::collection::vec(insert_strategy(), 1..4),
        heights in prop::collection::vec(0.0f32..80.0, 0..4),
    ) {
        check_deterministic(&params, &heights)?;
    }
}
