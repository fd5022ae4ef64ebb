//! CLI logic for the Shelfwright layout tool.
//!
//! This module contains the core CLI logic: read a design file, lay out the
//! shelf and write its front elevation as SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use shelfwright::{DesignBuilder, ShelfwrightError};

/// Run the Shelfwright CLI application
///
/// This function processes the input design through the Shelfwright pipeline
/// and writes the resulting SVG to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ShelfwrightError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Design parsing errors
/// - Layout errors
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ShelfwrightError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing design"
    );

    // Config is resolved before the design is read
    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    // One builder parses the design and renders it
    let builder = DesignBuilder::new(app_config);
    let design = builder.parse(&source)?;
    let svg = builder.render_svg(&design)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
