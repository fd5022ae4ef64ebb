//! Configuration types for Shelfwright layouts.
//!
//! This module provides configuration structures that control how shelves
//! are sized, filled and styled. All types implement [`serde::Deserialize`]
//! so they can be loaded from TOML or any other serde format, and every field
//! falls back to a default when omitted.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`ShelfConfig`] - Shelf geometry and column partitioning defaults.
//! - [`FillConfig`] - Per-insert fill preferences fed to the placement scorer.
//! - [`StyleConfig`] - Colors used by the SVG elevation export.
//!
//! # Example
//!
//! ```
//! # use shelfwright::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.shelf().vertical_step(), 4.0);
//! assert!(config.style().partition_color().is_ok());
//! ```

use indexmap::IndexMap;
use serde::Deserialize;

use shelfwright_core::{catalog::Catalog, color::Color};

use crate::{error::ShelfwrightError, layout::Preferences};

const DEFAULT_PARTITION_COLOR: &str = "#fff2cc";
const DEFAULT_INSERT_COLOR: &str = "#d9d2c5";
const DEFAULT_INTERACTIVE_COLOR: &str = "#9fc5e8";
const DEFAULT_OUTLINE_COLOR: &str = "#404040";

/// Top-level configuration combining shelf, fill and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Shelf geometry section.
    #[serde(default)]
    shelf: ShelfConfig,

    /// Fill preference section.
    #[serde(default)]
    fill: FillConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(shelf: ShelfConfig, fill: FillConfig, style: StyleConfig) -> Self {
        Self { shelf, fill, style }
    }

    /// Returns the shelf configuration.
    pub fn shelf(&self) -> &ShelfConfig {
        &self.shelf
    }

    /// Returns the fill configuration.
    pub fn fill(&self) -> &FillConfig {
        &self.fill
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Shelf geometry and partitioning defaults.
///
/// Position, length and height are given as fractions of the enclosing unit,
/// so a single configuration adapts to any unit size.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShelfConfig {
    /// Left edge of the shelf as a fraction of the unit length.
    start_fraction: f32,
    /// Initial target length as a fraction of the unit length.
    length_fraction: f32,
    /// Shelf height as a fraction of the unit height.
    height_fraction: f32,
    depth: f32,
    partition_thickness: f32,
    /// Height of one slot of the vertical grid.
    vertical_step: f32,
    /// Minimum column width; every column width is a multiple of it.
    width_step: f32,
    /// Preferred column widths, as multiples of `width_step`.
    column_widths: Vec<u32>,
    /// Stretch the width step so the columns cover the target length exactly.
    match_exact_width: bool,
    /// Distance between the shelf and its resize handles.
    modifier_offset: f32,
    /// Height of the horizontal cross support spanning all columns.
    cross_support_height: f32,
    /// Height of the cross support's center above the shelf floor.
    cross_support_elevation: f32,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            start_fraction: 0.3,
            length_fraction: 0.4,
            height_fraction: 0.8,
            depth: 30.0,
            partition_thickness: 1.5,
            vertical_step: 4.0,
            width_step: 10.0,
            column_widths: vec![2, 4],
            match_exact_width: true,
            modifier_offset: 3.0,
            cross_support_height: 4.0,
            cross_support_elevation: 10.0,
        }
    }
}

impl ShelfConfig {
    pub fn start_fraction(&self) -> f32 {
        self.start_fraction
    }

    pub fn length_fraction(&self) -> f32 {
        self.length_fraction
    }

    pub fn height_fraction(&self) -> f32 {
        self.height_fraction
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

    pub fn width_step(&self) -> f32 {
        self.width_step
    }

    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    pub fn match_exact_width(&self) -> bool {
        self.match_exact_width
    }

    pub fn modifier_offset(&self) -> f32 {
        self.modifier_offset
    }

    pub fn cross_support_height(&self) -> f32 {
        self.cross_support_height
    }

    pub fn cross_support_elevation(&self) -> f32 {
        self.cross_support_elevation
    }

    /// Sets the preferred column widths (builder style).
    pub fn with_column_widths(mut self, widths: Vec<u32>) -> Self {
        self.column_widths = widths;
        self
    }

    /// Sets whether columns must cover the target length exactly (builder style).
    pub fn with_match_exact_width(mut self, match_exact_width: bool) -> Self {
        self.match_exact_width = match_exact_width;
        self
    }

    /// Sets the vertical grid step (builder style).
    pub fn with_vertical_step(mut self, step: f32) -> Self {
        self.vertical_step = step;
        self
    }

    /// Checks that every fraction and dimension is usable.
    ///
    /// Column widths and the width step are checked by the span partitioner.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfwrightError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<(), ShelfwrightError> {
        let fractions = [
            ("start_fraction", self.start_fraction),
            ("length_fraction", self.length_fraction),
            ("height_fraction", self.height_fraction),
        ];
        for (field, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ShelfwrightError::Config(format!(
                    "shelf.{field} must be in (0, 1], got {value}"
                )));
            }
        }

        let dimensions = [
            ("depth", self.depth),
            ("vertical_step", self.vertical_step),
            ("width_step", self.width_step),
        ];
        for (field, value) in dimensions {
            if !value.is_finite() || value <= 0.0 {
                return Err(ShelfwrightError::Config(format!(
                    "shelf.{field} must be positive, got {value}"
                )));
            }
        }

        for (field, value) in [
            ("partition_thickness", self.partition_thickness),
            ("modifier_offset", self.modifier_offset),
            ("cross_support_height", self.cross_support_height),
            ("cross_support_elevation", self.cross_support_elevation),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ShelfwrightError::Config(format!(
                    "shelf.{field} must not be negative, got {value}"
                )));
            }
        }

        Ok(())
    }
}

/// Per-insert fill preferences.
///
/// Each value in `[0, 1]` biases the scorer towards (or away from) an insert
/// type; inserts without an entry use [`Preferences::DEFAULT`]. A preference of
/// zero keeps the insert out of the layout entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FillConfig {
    #[serde(default)]
    preferences: IndexMap<String, f32>,
}

impl FillConfig {
    /// Creates a new [`FillConfig`] from insert names and preference values.
    pub fn new(preferences: IndexMap<String, f32>) -> Self {
        Self { preferences }
    }

    /// Resolves the configured preferences against a catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ShelfwrightError::Config`] for an insert name the catalog
    /// does not know or a value outside `[0, 1]`.
    pub fn resolve(&self, catalog: &Catalog) -> Result<Preferences, ShelfwrightError> {
        let mut preferences = Preferences::uniform(catalog, Preferences::DEFAULT);
        for (name, &value) in &self.preferences {
            let id = catalog.id_of(name).ok_or_else(|| {
                ShelfwrightError::Config(format!("fill preference for unknown insert `{name}`"))
            })?;
            if !(0.0..=1.0).contains(&value) {
                return Err(ShelfwrightError::Config(format!(
                    "fill preference for `{name}` must be in [0, 1], got {value}"
                )));
            }
            preferences.set(id, value);
        }
        Ok(preferences)
    }
}

/// Visual styling configuration for SVG elevations.
///
/// Colors are CSS color strings; unset fields fall back to built-in defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Background [`Color`], transparent when unset.
    #[serde(default)]
    background_color: Option<String>,

    /// Fill [`Color`] of partitions and the unit outline.
    #[serde(default)]
    partition_color: Option<String>,

    /// Fill [`Color`] of static inserts.
    #[serde(default)]
    insert_color: Option<String>,

    /// Fill [`Color`] of inserts the user can manipulate.
    #[serde(default)]
    interactive_color: Option<String>,

    /// Stroke [`Color`] for outlines.
    #[serde(default)]
    outline_color: Option<String>,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(Color::new)
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the partition [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn partition_color(&self) -> Result<Color, String> {
        resolve_color("partition", self.partition_color.as_deref(), DEFAULT_PARTITION_COLOR)
    }

    /// Returns the static insert [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn insert_color(&self) -> Result<Color, String> {
        resolve_color("insert", self.insert_color.as_deref(), DEFAULT_INSERT_COLOR)
    }

    /// Returns the interactive insert [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn interactive_color(&self) -> Result<Color, String> {
        resolve_color(
            "interactive",
            self.interactive_color.as_deref(),
            DEFAULT_INTERACTIVE_COLOR,
        )
    }

    /// Returns the outline [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn outline_color(&self) -> Result<Color, String> {
        resolve_color("outline", self.outline_color.as_deref(), DEFAULT_OUTLINE_COLOR)
    }
}

fn resolve_color(field: &str, configured: Option<&str>, default: &str) -> Result<Color, String> {
    Color::new(configured.unwrap_or(default))
        .map_err(|err| format!("Invalid {field} color in config: {err}"))
}
