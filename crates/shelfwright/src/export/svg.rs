//! Front elevation SVG export.
//!
//! [`ElevationRenderer`] is a [`Renderer`]: the fill loop hands it every
//! committed insert and it remembers where to draw it. Once the shelf is laid
//! out, [`ElevationRenderer::render_document`] draws the unit, the shelf
//! partitions and every insert still committed to the shelf. Shapes from
//! before the latest relayout are dropped when the shelf discards them.
//!
//! The document uses unit coordinates with the y axis flipped, so the floor is
//! at the bottom of the image.

use indexmap::IndexMap;
use log::debug;
use svg::{self, node::element as svg_element};

use shelfwright_core::{
    color::Color,
    geometry::{Bounds, Point, Size},
    insert::Side,
};

use super::Error;
use crate::{
    config::StyleConfig,
    render::{RenderHandle, RenderRequest, Renderer},
    shelf::Shelf,
};

/// Blank border around the unit, in unit lengths.
const MARGIN: f32 = 10.0;
const STROKE_WIDTH: f32 = 0.5;

#[derive(Debug, Clone)]
struct InsertShape {
    name: String,
    column: usize,
    column_start: f32,
    column_end: f32,
    anchor: u32,
    side: Side,
    bottom: f32,
    extent: f32,
    interactive: bool,
}

#[derive(Debug, Clone)]
struct Palette {
    background: Option<Color>,
    partition: Color,
    insert: Color,
    interactive: Color,
    outline: Color,
}

/// Collects committed inserts and renders them as a front elevation.
#[derive(Debug, Clone)]
pub struct ElevationRenderer {
    palette: Palette,
    shapes: IndexMap<RenderHandle, InsertShape>,
    next_handle: u64,
}

impl ElevationRenderer {
    /// Create a renderer using the colors of `style`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a configured color cannot be parsed.
    pub fn new(style: &StyleConfig) -> Result<Self, Error> {
        let palette = Palette {
            background: style.background_color().map_err(Error::Render)?,
            partition: style.partition_color().map_err(Error::Render)?,
            insert: style.insert_color().map_err(Error::Render)?,
            interactive: style.interactive_color().map_err(Error::Render)?,
            outline: style.outline_color().map_err(Error::Render)?,
        };

        Ok(Self {
            palette,
            shapes: IndexMap::new(),
            next_handle: 0,
        })
    }

    /// Number of inserts received since the latest relayout
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Forget every received insert
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Render `shelf` inside its unit as an SVG document.
    ///
    /// Only inserts whose handle is still held by one of the shelf's
    /// placements are drawn.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the document cannot be serialized.
    pub fn render_document(&self, shelf: &Shelf) -> Result<String, Error> {
        let unit = shelf.unit();
        let width = unit.length() + 2.0 * MARGIN;
        let height = unit.height() + 2.0 * MARGIN;

        let mut doc = svg::Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = &self.palette.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background),
            );
        }

        let frame = Frame {
            unit_height: unit.height(),
            shelf_x: shelf.start_x(),
        };

        doc = doc.add(self.render_unit(shelf, &frame));
        doc = doc.add(self.render_shelf(shelf, &frame));

        let mut buffer = Vec::new();
        svg::write(&mut buffer, &doc)?;
        let text = String::from_utf8(buffer)
            .map_err(|err| Error::Render(format!("SVG output is not UTF-8: {err}")))?;

        debug!(bytes = text.len(); "Rendered elevation");
        Ok(text)
    }

    fn render_unit(&self, shelf: &Shelf, frame: &Frame) -> svg_element::Group {
        let unit = shelf.unit();
        let wall = unit.wall_thickness();

        let mut group = svg_element::Group::new().set("class", "unit").add(
            self.rect(
                frame.to_svg(Bounds::new_from_min(
                    Point::new(0.0, 0.0),
                    Size::new(unit.length(), unit.height()),
                )),
                None,
            ),
        );

        if wall > 0.0 {
            for x in [0.0, unit.length() - wall] {
                let bounds = Bounds::new_from_min(Point::new(x, 0.0), Size::new(wall, unit.height()));
                group = group.add(
                    self.rect(frame.to_svg(bounds), Some(&self.palette.partition))
                        .set("class", "wall"),
                );
            }
        }

        group
    }

    fn render_shelf(&self, shelf: &Shelf, frame: &Frame) -> svg_element::Group {
        let thickness = shelf.partition_thickness();
        let mut group = svg_element::Group::new()
            .set("class", "shelf")
            .set("data-start-x", shelf.start_x())
            .set("data-length", shelf.target_length());

        group = group.add(
            self.rect(
                frame.shelf_to_svg(shelf.cross_support()),
                Some(&self.palette.partition),
            )
            .set("class", "cross-support"),
        );

        for partition in shelf.partitions() {
            let bounds = Bounds::new_from_min(
                Point::new(partition.x() - thickness / 2.0, 0.0),
                Size::new(thickness, partition.height()),
            );
            group = group.add(
                self.rect(frame.shelf_to_svg(bounds), Some(&self.palette.partition))
                    .set("class", "partition"),
            );
        }

        for placement in shelf.placements() {
            let Some(shape) = self.shapes.get(&placement.handle()) else {
                continue;
            };
            group = group.add(self.render_insert(shape, thickness, frame));
        }

        group
    }

    fn render_insert(
        &self,
        shape: &InsertShape,
        thickness: f32,
        frame: &Frame,
    ) -> svg_element::Rectangle {
        let inner_start = shape.column_start + thickness / 2.0;
        let inner_end = shape.column_end - thickness / 2.0;
        let middle = (inner_start + inner_end) / 2.0;
        let (min_x, max_x) = match shape.side {
            Side::Center => (inner_start, inner_end),
            Side::Left => (inner_start, middle),
            Side::Right => (middle, inner_end),
        };

        let bounds = Bounds::new_from_min(
            Point::new(min_x, shape.bottom),
            Size::new((max_x - min_x).max(0.0), shape.extent),
        );
        let (class, fill) = if shape.interactive {
            ("insert interactive", &self.palette.interactive)
        } else {
            ("insert", &self.palette.insert)
        };

        let mut rect = self
            .rect(frame.shelf_to_svg(bounds), Some(fill))
            .set("class", class)
            .set("data-insert", shape.name.as_str())
            .set("data-column", shape.column.to_string())
            .set("data-anchor", shape.anchor.to_string())
            .set("data-side", shape.side.to_string());
        if shape.interactive {
            rect = rect.set("data-interactive", "true");
        }
        rect
    }

    fn rect(&self, bounds: Bounds, fill: Option<&Color>) -> svg_element::Rectangle {
        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("stroke", &self.palette.outline)
            .set("stroke-width", STROKE_WIDTH);
        match fill {
            Some(color) => rect.set("fill", color),
            None => rect.set("fill", "none"),
        }
    }
}

impl Renderer for ElevationRenderer {
    fn render_insert(&mut self, request: &RenderRequest<'_>) -> RenderHandle {
        let handle = RenderHandle::new(self.next_handle);
        self.next_handle += 1;

        let column = request.column();
        self.shapes.insert(
            handle,
            InsertShape {
                name: request.descriptor().name().to_string(),
                column: column.index(),
                column_start: column.start_x(),
                column_end: column.end_x(),
                anchor: request.anchor(),
                side: request.side(),
                bottom: request.bottom(),
                extent: request.extent(),
                interactive: request.interactive(),
            },
        );
        handle
    }

    fn discard_all(&mut self) {
        debug!(shapes = self.shapes.len(); "Dropping discarded inserts");
        self.clear();
    }
}

/// Maps unit and shelf-local coordinates to document coordinates.
struct Frame {
    unit_height: f32,
    shelf_x: f32,
}

impl Frame {
    /// Unit coordinates (floor at y = 0) to document coordinates
    fn to_svg(&self, bounds: Bounds) -> Bounds {
        Bounds::new_from_min(
            Point::new(
                bounds.min_x() + MARGIN,
                self.unit_height - bounds.max_y() + MARGIN,
            ),
            Size::new(bounds.width(), bounds.height()),
        )
    }

    fn shelf_to_svg(&self, bounds: Bounds) -> Bounds {
        self.to_svg(bounds.translate(Point::new(self.shelf_x, 0.0)))
    }
}
