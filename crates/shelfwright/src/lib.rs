//! Shelfwright - column partitioning and insert placement for storage units.
//!
//! A shelf's span is split into columns of preferred widths, and every column
//! is filled greedily with inserts (drawers, desks, shelves) chosen by a
//! placement score. Resize handles change the span and re-run the pipeline.

pub mod config;
pub mod design;
pub mod export;
pub mod layout;
pub mod modifier;
pub mod render;
pub mod shelf;

mod error;

pub use shelfwright_core::{catalog, color, geometry, insert};

pub use error::ShelfwrightError;

use log::{debug, info};

use catalog::{Catalog, InsertId};
use config::AppConfig;
use design::Design;
use export::svg::ElevationRenderer;
use insert::InsertDescriptor;
use modifier::{Modifier, ModifierEvent};
use render::{RecordingRenderer, Renderer};
use shelf::Shelf;

/// Builder for laying out and rendering Shelfwright designs.
///
/// # Examples
///
/// ```rust
/// use shelfwright::{DesignBuilder, config::AppConfig, design::Design, shelf::Unit};
///
/// let design = Design::new(Unit::new(300.0, 120.0, 60.0, 2.0));
///
/// // With custom config
/// let builder = DesignBuilder::new(AppConfig::default());
///
/// let shelf = builder.layout(&design).expect("Failed to lay out");
/// assert!(shelf.placements().count() > 0);
///
/// let svg = builder.render_svg(&design).expect("Failed to render");
/// assert!(svg.starts_with("<svg"));
///
/// // Or use default config
/// let builder = DesignBuilder::default();
/// ```
pub struct DesignBuilder {
    config: AppConfig,
    catalog: Catalog,
}

impl Default for DesignBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl DesignBuilder {
    /// Create a design builder with the given configuration and the builtin
    /// insert catalog.
    ///
    /// # Arguments
    ///
    /// * `config` - Application configuration including shelf, fill and style settings
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            catalog: Catalog::builtin(),
        }
    }

    /// Replace the insert catalog (builder style).
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Register an additional insert type after the ones already in the
    /// catalog.
    ///
    /// # Errors
    ///
    /// Returns `ShelfwrightError::Catalog` if the descriptor is invalid or its
    /// name is already registered.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shelfwright::{
    ///     DesignBuilder,
    ///     insert::{InsertDescriptor, Side, SlotFootprint},
    /// };
    ///
    /// let mut builder = DesignBuilder::default();
    /// builder
    ///     .register_insert(
    ///         InsertDescriptor::new("ShoeRack")
    ///             .with_footprint(Side::Center, SlotFootprint::new(1, 0)),
    ///     )
    ///     .expect("Failed to register insert");
    /// assert!(builder.catalog().id_of("ShoeRack").is_some());
    /// ```
    pub fn register_insert(
        &mut self,
        descriptor: InsertDescriptor,
    ) -> Result<InsertId, ShelfwrightError> {
        Ok(self.catalog.register(descriptor)?)
    }

    /// Parse a TOML design file.
    ///
    /// # Errors
    ///
    /// Returns `ShelfwrightError::Parse` with the offending span for malformed
    /// TOML, unknown handles or missing unit dimensions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shelfwright::DesignBuilder;
    ///
    /// let source = "[unit]\nlength = 300.0\nheight = 120.0\ndepth = 60.0\n";
    /// let design = DesignBuilder::default()
    ///     .parse(source)
    ///     .expect("Failed to parse design");
    /// assert!(design.drags().is_empty());
    /// ```
    pub fn parse(&self, source: &str) -> Result<Design, ShelfwrightError> {
        info!("Parsing design");
        let design: Design =
            toml::from_str(source).map_err(|err| ShelfwrightError::new_parse_error(err, source))?;

        debug!(drags = design.drags().len(); "Design parsed successfully");
        Ok(design)
    }

    /// Lay out a design without rendering it.
    ///
    /// Creates the shelf, fills it, then replays the design's drags in order.
    ///
    /// # Errors
    ///
    /// Returns `ShelfwrightError` for invalid configuration, an invalid unit,
    /// or a drag with a non-finite offset.
    pub fn layout(&self, design: &Design) -> Result<Shelf, ShelfwrightError> {
        self.build(design, &mut RecordingRenderer::new())
    }

    /// Lay out a design and render its front elevation to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `ShelfwrightError` for layout errors, invalid style colors or
    /// serialization failures.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shelfwright::{DesignBuilder, design::Design, modifier::ModifierKind, shelf::Unit};
    ///
    /// let design = Design::new(Unit::new(300.0, 120.0, 60.0, 2.0))
    ///     .with_drag(ModifierKind::RightEdge, 40.0);
    ///
    /// let svg = DesignBuilder::default()
    ///     .render_svg(&design)
    ///     .expect("Failed to render design");
    /// assert!(svg.contains("data-insert"));
    /// ```
    pub fn render_svg(&self, design: &Design) -> Result<String, ShelfwrightError> {
        let mut renderer = ElevationRenderer::new(self.config.style())?;
        let shelf = self.build(design, &mut renderer)?;

        let svg = renderer.render_document(&shelf)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    fn build<R>(&self, design: &Design, renderer: &mut R) -> Result<Shelf, ShelfwrightError>
    where
        R: Renderer + ?Sized,
    {
        let preferences = self.config.fill().resolve(&self.catalog)?;

        info!(inserts = self.catalog.len(); "Laying out design");
        let mut shelf = Shelf::new(*design.unit(), self.config.shelf())?;
        shelf.relayout(&self.catalog, &preferences, renderer);

        for drag in design.drags() {
            debug!(handle:% = drag.handle(), offset = drag.offset(); "Replaying drag");
            let mut modifier = Modifier::new(drag.handle());
            for event in [
                ModifierEvent::Clicked,
                ModifierEvent::Moved {
                    offset_distance: drag.offset(),
                },
            ] {
                modifier.on_event(&mut shelf, event, &self.catalog, &preferences, renderer)?;
            }
        }

        info!(
            columns = shelf.columns().len(),
            placements = shelf.placements().count();
            "Design laid out"
        );
        Ok(shelf)
    }
}
