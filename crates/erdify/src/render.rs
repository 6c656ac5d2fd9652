//! Rendering of DOT text into SVG.
//!
//! The [`Renderer`] trait is the seam between the editor and whatever draws
//! the diagram. [`GraphvizRenderer`] drives the Graphviz command-line tools
//! through `graphviz-rust`.

use std::{string::FromUtf8Error, sync::OnceLock};

use graphviz_rust::cmd::Format;
use log::{debug, info, warn};
use thiserror::Error;

/// Errors raised by a [`Renderer`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("renderer is unavailable: {0}")]
    Unavailable(String),

    #[error("renderer rejected the diagram: {0}")]
    Rejected(String),

    #[error("renderer output is not valid UTF-8: {0}")]
    Encoding(String),
}

impl From<FromUtf8Error> for RenderError {
    fn from(err: FromUtf8Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Turns DOT text into an SVG document.
pub trait Renderer {
    fn render(&self, dot: &str) -> Result<String, RenderError>;
}

/// Renders through the Graphviz `dot` executable.
///
/// The executable is checked the first time something is rendered, and the
/// outcome of that check is kept for the lifetime of the renderer.
#[derive(Debug, Default)]
pub struct GraphvizRenderer {
    ready: OnceLock<Result<(), String>>,
}

impl GraphvizRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_ready(&self) -> Result<(), RenderError> {
        self.ready
            .get_or_init(|| {
                debug!("Checking for Graphviz");
                match graphviz_rust::exec_dot("digraph check {}".to_string(), vec![Format::Svg.into()]) {
                    Ok(_) => {
                        info!("Graphviz renderer ready");
                        Ok(())
                    }
                    Err(err) => {
                        warn!(error:% = err; "Graphviz is not available");
                        Err(err.to_string())
                    }
                }
            })
            .clone()
            .map_err(RenderError::Unavailable)
    }
}

impl Renderer for GraphvizRenderer {
    fn render(&self, dot: &str) -> Result<String, RenderError> {
        self.ensure_ready()?;
        graphviz_rust::parse(dot).map_err(RenderError::Rejected)?;

        let output = graphviz_rust::exec_dot(dot.to_string(), vec![Format::Svg.into()])
            .map_err(|err| RenderError::Rejected(err.to_string()))?;
        let svg = String::from_utf8(output)?;
        debug!(bytes = svg.len(); "SVG rendered");
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_error_converts() {
        let err = String::from_utf8(vec![0xff]).unwrap_err();
        assert!(matches!(RenderError::from(err), RenderError::Encoding(_)));
    }

    #[test]
    fn test_unparseable_dot_is_rejected_or_unavailable() {
        // Without a Graphviz install the availability check fails first; either way no SVG comes out.
        let renderer = GraphvizRenderer::new();
        let result = renderer.render("digraph {");
        assert!(matches!(
            result,
            Err(RenderError::Rejected(_) | RenderError::Unavailable(_))
        ));
    }

    #[test]
    fn test_availability_check_runs_once() {
        let renderer = GraphvizRenderer::new();
        let first = renderer.ensure_ready();
        let second = renderer.ensure_ready();
        assert_eq!(first, second);
    }
}
