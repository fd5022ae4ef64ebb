//! Rendering collaborator interface.
//!
//! The layout engine does not build geometry itself. Each time the fill loop
//! commits an insert it hands a [`RenderRequest`] to a [`Renderer`], which
//! produces whatever representation it needs and returns an opaque
//! [`RenderHandle`]. The engine stores the handle in the placement and never
//! looks inside it.

use std::ops::RangeInclusive;

use shelfwright_core::{geometry::ColumnGeometry, insert::InsertDescriptor, insert::Side};

use crate::layout::Column;

/// Opaque token identifying a rendered insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderHandle(u64);

impl RenderHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The renderer-defined raw value
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Everything a renderer needs to materialize one committed insert.
#[derive(Debug, Clone)]
pub struct RenderRequest<'a> {
    descriptor: &'a InsertDescriptor,
    column: &'a ColumnGeometry,
    anchor: u32,
    side: Side,
    slots: RangeInclusive<u32>,
    vertical_step: f32,
}

impl<'a> RenderRequest<'a> {
    pub fn new(
        descriptor: &'a InsertDescriptor,
        column: &'a ColumnGeometry,
        anchor: u32,
        side: Side,
        slots: RangeInclusive<u32>,
        vertical_step: f32,
    ) -> Self {
        Self {
            descriptor,
            column,
            anchor,
            side,
            slots,
            vertical_step,
        }
    }

    pub fn descriptor(&self) -> &'a InsertDescriptor {
        self.descriptor
    }

    pub fn column(&self) -> &'a ColumnGeometry {
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

    /// Height of the anchor slot's lower edge above the shelf floor
    pub fn offset(&self) -> f32 {
        self.anchor as f32 * self.vertical_step
    }

    /// Height of the lowest claimed slot's lower edge above the shelf floor
    pub fn bottom(&self) -> f32 {
        *self.slots.start() as f32 * self.vertical_step
    }

    /// Vertical extent of all claimed slots
    pub fn extent(&self) -> f32 {
        (self.slots.end() - self.slots.start() + 1) as f32 * self.vertical_step
    }

    /// Whether the produced object must be registered as clickable
    pub fn interactive(&self) -> bool {
        self.descriptor.interactive()
    }
}

/// Trait implemented by anything that materializes committed inserts.
pub trait Renderer {
    /// Materialize one committed insert. Called exactly once per commit.
    fn render_insert(&mut self, request: &RenderRequest<'_>) -> RenderHandle;

    /// Called once per column per relayout, after all its commits are final.
    fn update_column(&mut self, _column: &Column) {}

    /// Called when the shelf drops every placement ahead of a relayout. No
    /// handle issued before this call is held by the shelf afterwards.
    fn discard_all(&mut self) {}
}

/// Summary of one render request, as kept by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRecord {
    pub insert: String,
    pub column: usize,
    pub anchor: u32,
    pub side: Side,
    pub offset: f32,
    pub extent: f32,
    pub interactive: bool,
}

/// A headless renderer that records requests and hands out sequential handles.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    records: Vec<RenderRecord>,
    updated_columns: Vec<usize>,
    discards: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far, in commit order
    pub fn records(&self) -> &[RenderRecord] {
        &self.records
    }

    /// Indices of columns whose update hook ran, in call order
    pub fn updated_columns(&self) -> &[usize] {
        &self.updated_columns
    }

    /// How often the shelf dropped its placements
    pub fn discards(&self) -> usize {
        self.discards
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.records.clear();
        self.updated_columns.clear();
        self.discards = 0;
    }
}

impl Renderer for RecordingRenderer {
    fn render_insert(&mut self, request: &RenderRequest<'_>) -> RenderHandle {
        let handle = RenderHandle::new(self.records.len() as u64);
        self.records.push(RenderRecord {
            insert: request.descriptor().name().to_string(),
            column: request.column().index(),
            anchor: request.anchor(),
            side: request.side(),
            offset: request.offset(),
            extent: request.extent(),
            interactive: request.interactive(),
        });
        handle
    }

    fn update_column(&mut self, column: &Column) {
        self.updated_columns.push(column.index());
    }

    fn discard_all(&mut self) {
        self.discards += 1;
    }
}
