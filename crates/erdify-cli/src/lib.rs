//! erdify CLI library
//!
//! This module contains the core CLI logic for the erdify diagram tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, OutputFormat};

use std::fs;

use log::info;

use erdify::{DiagramBuilder, ErdifyError, render::GraphvizRenderer};

/// Run the erdify CLI application
///
/// This function loads the input document, lays it out and writes the
/// requested output format to the output file.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `ErdifyError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Malformed documents
/// - Validation errors when writing JSON
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), ErdifyError> {
    let output_path = args.output_path();
    info!(
        input_path = args.input,
        output_path,
        format:% = args.format;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = DiagramBuilder::new(app_config);
    let session = builder.load(&source)?;
    let output = match args.format {
        OutputFormat::Dot => builder.render_dot(&session)?,
        OutputFormat::Svg => builder.render_svg(&session, &GraphvizRenderer::new())?,
        OutputFormat::Json => builder.save(&session)?,
    };

    fs::write(&output_path, output)?;

    info!(output_file = output_path; "Diagram exported successfully");

    Ok(())
}
