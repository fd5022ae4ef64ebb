//! Greedy fill loop.
//!
//! [`FillLoop`] repeatedly scores every (insert, column, anchor, side)
//! candidate, commits the single best one and starts over, until the best
//! score anywhere is zero. Committed placements are never revisited within a
//! pass; a new pass starts from empty columns.
//!
//! Candidates are enumerated in catalog order, then column index, then anchor
//! slot ascending, then side ([`Side::ALL`] order). Only a strictly greater
//! score replaces the current best, so ties go to the first candidate in that
//! order, and in particular to the insert type registered first.
//!
//! Every commit claims at least one free slot in at least one lane, so a pass
//! commits at most [`Column::lane_slots`] placements per column and scans
//! once more than it commits.

use std::ops::RangeInclusive;

use log::{debug, info};

use shelfwright_core::{
    catalog::{Catalog, InsertId},
    insert::{InsertDescriptor, Side},
};

use super::{
    column::{Column, Placement},
    scorer::{self, Preferences},
};
use crate::render::{RenderRequest, Renderer};

/// State of a fill pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillState {
    Running,
    Done,
}

/// The best placement found by one scan.
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    insert: InsertId,
    descriptor: &'a InsertDescriptor,
    column: usize,
    anchor: u32,
    side: Side,
    slots: RangeInclusive<u32>,
    score: f32,
}

impl<'a> Candidate<'a> {
    pub fn insert(&self) -> InsertId {
        self.insert
    }

    pub fn descriptor(&self) -> &'a InsertDescriptor {
        self.descriptor
    }

    /// Position of the column in the scanned slice
    pub fn column(&self) -> usize {
        self.column
    }

    pub fn anchor(&self) -> u32 {
        self.anchor
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn slots(&self) -> RangeInclusive<u32> {
        self.slots.clone()
    }

    pub fn score(&self) -> f32 {
        self.score
    }
}

/// Summary of a finished fill pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FillReport {
    commits: usize,
    iterations: usize,
}

impl FillReport {
    /// Number of committed placements
    pub fn commits(&self) -> usize {
        self.commits
    }

    /// Number of scans, including the final one that found nothing
    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Greedy, single-pass placement of catalog inserts into columns.
#[derive(Debug)]
pub struct FillLoop<'a> {
    catalog: &'a Catalog,
    preferences: &'a Preferences,
    state: FillState,
    report: FillReport,
}

impl<'a> FillLoop<'a> {
    pub fn new(catalog: &'a Catalog, preferences: &'a Preferences) -> Self {
        Self {
            catalog,
            preferences,
            state: FillState::Running,
            report: FillReport::default(),
        }
    }

    pub fn state(&self) -> FillState {
        self.state
    }

    /// Progress so far
    pub fn report(&self) -> FillReport {
        self.report
    }

    /// Scan every candidate and return the best one with a positive score.
    ///
    /// Returns `None` when no placement is viable anywhere, including when
    /// `columns` is empty.
    pub fn best_candidate(&self, columns: &[Column]) -> Option<Candidate<'a>> {
        let mut best: Option<Candidate<'a>> = None;

        for (insert, descriptor) in self.catalog.iter() {
            let preference = self.preferences.get(insert);
            if preference <= 0.0 {
                continue;
            }

            for (column_idx, column) in columns.iter().enumerate() {
                for anchor in 0..column.slot_count() {
                    for side in Side::ALL {
                        let Some(footprint) = descriptor.footprint(side) else {
                            continue;
                        };
                        let Some(slots) = column.claim_range(anchor, footprint) else {
                            continue;
                        };

                        let score =
                            scorer::score(descriptor, insert, column, anchor, side, preference);
                        let threshold = best.as_ref().map_or(0.0, |b| b.score);
                        if score > threshold {
                            best = Some(Candidate {
                                insert,
                                descriptor,
                                column: column_idx,
                                anchor,
                                side,
                                slots,
                                score,
                            });
                        }
                    }
                }
            }
        }

        best
    }

    /// Run one iteration: commit the best candidate, or finish.
    ///
    /// Each commit calls [`Renderer::render_insert`] exactly once and stores
    /// the returned handle in the placement. Once done, further calls are
    /// no-ops.
    pub fn step<R>(&mut self, columns: &mut [Column], renderer: &mut R) -> FillState
    where
        R: Renderer + ?Sized,
    {
        if self.state == FillState::Done {
            return FillState::Done;
        }
        self.report.iterations += 1;

        let Some(candidate) = self.best_candidate(columns) else {
            self.state = FillState::Done;
            return FillState::Done;
        };

        let column = &mut columns[candidate.column];
        let handle = renderer.render_insert(&RenderRequest::new(
            candidate.descriptor,
            column.geometry(),
            candidate.anchor,
            candidate.side,
            candidate.slots(),
            column.vertical_step(),
        ));

        debug!(
            insert = candidate.descriptor.name(),
            column = column.index(),
            anchor = candidate.anchor,
            side:% = candidate.side,
            score = candidate.score;
            "Committed placement"
        );

        column.commit(Placement::new(
            candidate.insert,
            column.index(),
            candidate.anchor,
            candidate.side,
            candidate.slots,
            handle,
        ));
        self.report.commits += 1;

        FillState::Running
    }

    /// Step until done, then finalize every column.
    ///
    /// Calls [`Column::update`] and [`Renderer::update_column`] once per
    /// column after all commits are final.
    pub fn run<R>(mut self, columns: &mut [Column], renderer: &mut R) -> FillReport
    where
        R: Renderer + ?Sized,
    {
        while self.step(columns, renderer) == FillState::Running {}

        for column in columns.iter_mut() {
            column.update();
            renderer.update_column(column);
        }

        info!(
            columns = columns.len(),
            commits = self.report.commits,
            iterations = self.report.iterations;
            "Fill pass finished"
        );

        self.report
    }
}

#[cfg(test)]
mod tests {
    use shelfwright_core::{geometry::ColumnGeometry, insert::SlotFootprint};

    use super::*;
    use crate::render::RecordingRenderer;

    fn columns(widths: &[f32], height: f32) -> Vec<Column> {
        let mut x = 0.0;
        widths
            .iter()
            .enumerate()
            .map(|(idx, &width)| {
                let column = Column::new(ColumnGeometry::new(idx, x, width, 30.0, height), 4.0);
                x += width;
                column
            })
            .collect()
    }

    fn run_fill(catalog: &Catalog, columns: &mut [Column]) -> (FillReport, RecordingRenderer) {
        let preferences = Preferences::uniform(catalog, 1.0);
        let mut renderer = RecordingRenderer::new();
        let report = FillLoop::new(catalog, &preferences).run(columns, &mut renderer);
        (report, renderer)
    }

    fn placements(columns: &[Column]) -> Vec<(usize, u32, Side, String)> {
        columns
            .iter()
            .flat_map(|column| column.placements())
            .map(|p| (p.column(), p.anchor(), p.side(), p.insert().to_string()))
            .collect()
    }

    #[test]
    fn test_single_insert_one_per_column() {
        let catalog = Catalog::from_descriptors([InsertDescriptor::new("Drawer")
            .with_ideal_distance(0.0)
            .with_footprint(Side::Center, SlotFootprint::new(2, 1))
            .with_one_per_column(true)])
        .unwrap();
        let mut columns = columns(&[20.0], 32.0);
        let (report, renderer) = run_fill(&catalog, &mut columns);

        assert_eq!(report.commits(), 1);
        assert_eq!(report.iterations(), 2);
        let placement = &columns[0].placements()[0];
        assert_eq!(placement.anchor(), 1);
        assert_eq!(placement.slots(), 0..=3);
        assert_eq!(renderer.records().len(), 1);

        let preferences = Preferences::uniform(&catalog, 1.0);
        assert!(FillLoop::new(&catalog, &preferences).best_candidate(&columns).is_none());
    }

    #[test]
    fn test_side_lanes_fill_to_lane_capacity() {
        let catalog = Catalog::from_descriptors([InsertDescriptor::new("Hook")
            .with_footprint(Side::Left, SlotFootprint::default())
            .with_footprint(Side::Right, SlotFootprint::default())])
        .unwrap();
        let mut columns = columns(&[20.0], 32.0);
        let (report, _) = run_fill(&catalog, &mut columns);

        assert_eq!(columns[0].slot_count(), 8);
        assert_eq!(report.commits(), 16);
        assert_eq!(report.commits(), columns[0].lane_slots() as usize);
        assert_eq!(report.iterations(), report.commits() + 1);
    }

    #[test]
    fn test_empty_column_set_is_done_immediately() {
        let catalog = Catalog::builtin();
        let preferences = Preferences::uniform(&catalog, 1.0);
        let mut renderer = RecordingRenderer::new();
        let mut fill = FillLoop::new(&catalog, &preferences);

        assert_eq!(fill.step(&mut [], &mut renderer), FillState::Done);
        assert_eq!(fill.state(), FillState::Done);
        assert_eq!(fill.report().commits(), 0);
        assert!(renderer.records().is_empty());
    }

    #[test]
    fn test_step_after_done_is_noop() {
        let catalog = Catalog::builtin();
        let preferences = Preferences::uniform(&catalog, 1.0);
        let mut renderer = RecordingRenderer::new();
        let mut fill = FillLoop::new(&catalog, &preferences);

        fill.step(&mut [], &mut renderer);
        fill.step(&mut [], &mut renderer);
        assert_eq!(fill.report().iterations(), 1);
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let cubby = |name: &str| {
            InsertDescriptor::new(name)
                .with_footprint(Side::Center, SlotFootprint::default())
                .with_one_per_column(true)
        };
        let catalog = Catalog::from_descriptors([cubby("First"), cubby("Second")]).unwrap();
        let preferences = Preferences::uniform(&catalog, 1.0);
        let columns = columns(&[20.0, 20.0], 16.0);

        let best = FillLoop::new(&catalog, &preferences)
            .best_candidate(&columns)
            .unwrap();
        assert_eq!(best.descriptor().name(), "First");
        assert_eq!(best.column(), 0);
        assert_eq!(best.anchor(), 0);
        assert_eq!(best.side(), Side::Center);
    }

    #[test]
    fn test_center_side_wins_side_ties() {
        let catalog = Catalog::from_descriptors([InsertDescriptor::new("Hook")
            .with_footprint_all_sides(SlotFootprint::default())])
        .unwrap();
        let preferences = Preferences::uniform(&catalog, 1.0);
        let columns = columns(&[20.0], 16.0);

        let best = FillLoop::new(&catalog, &preferences)
            .best_candidate(&columns)
            .unwrap();
        assert_eq!(best.side(), Side::Center);
    }

    #[test]
    fn test_zero_preference_excludes_insert() {
        let catalog = Catalog::builtin();
        let mut preferences = Preferences::uniform(&catalog, 1.0);
        for (id, _) in catalog.iter() {
            preferences.set(id, 0.0);
        }
        let mut columns = columns(&[40.0], 96.0);
        let mut renderer = RecordingRenderer::new();

        let report = FillLoop::new(&catalog, &preferences).run(&mut columns, &mut renderer);
        assert_eq!(report.commits(), 0);
        assert_eq!(renderer.updated_columns(), &[0]);
    }

    #[test]
    fn test_builtin_fill_reaches_greedy_fixpoint() {
        let catalog = Catalog::builtin();
        let mut columns = columns(&[20.0, 40.0], 96.0);
        let (report, renderer) = run_fill(&catalog, &mut columns);

        let total_slots: u32 = columns.iter().map(Column::slot_count).sum();
        assert!(report.commits() > 0);
        assert!(report.commits() <= total_slots as usize);
        assert_eq!(report.iterations(), report.commits() + 1);
        assert_eq!(renderer.records().len(), report.commits());
        assert_eq!(renderer.updated_columns(), &[0, 1]);

        let preferences = Preferences::uniform(&catalog, 1.0);
        let fill = FillLoop::new(&catalog, &preferences);
        assert!(fill.best_candidate(&columns).is_none());
        for (id, descriptor) in catalog.iter() {
            for column in &columns {
                for anchor in 0..column.slot_count() {
                    for side in Side::ALL {
                        let score = scorer::score(descriptor, id, column, anchor, side, 1.0);
                        assert_eq!(score, 0.0, "{} still placeable", descriptor.name());
                    }
                }
            }
        }
    }

    #[test]
    fn test_desk_only_in_wide_columns() {
        let catalog = Catalog::builtin();
        let desk = catalog.id_of("PullDesk").unwrap();
        let mut columns = columns(&[20.0, 40.0], 96.0);
        run_fill(&catalog, &mut columns);

        assert_eq!(columns[0].count_of(desk), 0);
        assert_eq!(columns[1].count_of(desk), 1);
    }

    #[test]
    fn test_fill_is_deterministic() {
        let catalog = Catalog::builtin();
        let mut first = columns(&[20.0, 20.0, 40.0], 96.0);
        let mut second = columns(&[20.0, 20.0, 40.0], 96.0);
        run_fill(&catalog, &mut first);
        run_fill(&catalog, &mut second);

        assert_eq!(placements(&first), placements(&second));
    }
}
