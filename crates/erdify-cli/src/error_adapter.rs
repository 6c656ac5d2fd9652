//! Error adapter for converting ErdifyError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan};

use erdify::{ErdifyError, ValidationError, document::DocumentError, render::RenderError};

/// Adapter for [`ErdifyError`].
///
/// Each error variant maps to a stable diagnostic code, and some variants
/// carry a hint on how to fix the input.
pub struct ErrorAdapter<'a>(pub &'a ErdifyError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ErdifyError::Io(_) => "erdify::io",
            ErdifyError::Document(_) => "erdify::document",
            ErdifyError::Validation(_) => "erdify::validation",
            ErdifyError::Render(_) => "erdify::render",
            ErdifyError::Config(_) => "erdify::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            ErdifyError::Document(DocumentError::Json(err)) if err.line() > 0 => format!(
                "check the JSON document near line {}, column {}",
                err.line(),
                err.column()
            ),
            ErdifyError::Validation(ValidationError::EmptyDiagramName) => {
                "give the diagram a name before saving".to_string()
            }
            ErdifyError::Validation(ValidationError::UnnamedEntity { position }) => {
                format!("entity {position} needs a name")
            }
            ErdifyError::Render(RenderError::Unavailable(_)) => {
                "install Graphviz or use `--format dot`".to_string()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// Wrap an [`ErdifyError`] so it can be rendered by miette.
pub fn to_reportable(err: &ErdifyError) -> ErrorAdapter<'_> {
    ErrorAdapter(err)
}

/// Render an [`ErdifyError`] as a graphical miette report.
///
/// Falls back to the plain error message if the report cannot be written.
pub fn render_report(err: &ErdifyError) -> String {
    let mut writer = String::new();
    match GraphicalReportHandler::new().render_report(&mut writer, &to_reportable(err)) {
        Ok(()) => writer,
        Err(_) => err.to_string(),
    }
}
