//! erdify - Layout and export for entity-relationship diagrams.
//!
//! An editing [`session`] of entities, attributes and relationships is laid
//! out by a deterministic [`layout`] engine and exported as Graphviz DOT with
//! pinned node positions. Diagrams are stored as a flat JSON [`document`],
//! and the [`preview`] module drives live re-rendering while a diagram is
//! being edited.

pub mod config;
pub mod document;
pub mod export;
pub mod layout;
pub mod preview;
pub mod render;
pub mod session;

mod error;

pub use erdify_core::{ValidationError, color, geometry, identifier, semantic};

pub use error::ErdifyError;

use log::{debug, info, trace};

use config::AppConfig;
use document::DiagramDocument;
use export::DotExporter;
use layout::{Engine, Layout};
use render::Renderer;
use session::Session;

/// Builder for loading, laying out and rendering diagrams.
///
/// # Examples
///
/// ```rust
/// use erdify::{DiagramBuilder, config::AppConfig};
///
/// let json = r#"{
///     "name": "school",
///     "entities": [
///         { "name": "Student", "attributes": ["student_id"], "primary_key": "student_id" },
///         { "name": "Course", "attributes": ["course_id"], "primary_key": "course_id" }
///     ],
///     "relationships": [
///         { "entity1": "Student", "entity2": "Course", "relation": "enrolls",
///           "type": "one-to-many", "layout": "LR" }
///     ]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let session = builder.load(json).expect("Failed to load");
/// let dot = builder.render_dot(&session).expect("Failed to export");
/// assert!(dot.contains("rel_1"));
/// ```
#[derive(Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration used by this builder.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON diagram document into an editing session.
    ///
    /// # Errors
    ///
    /// Returns [`ErdifyError::Document`] when the JSON is malformed.
    pub fn load(&self, json: &str) -> Result<Session, ErdifyError> {
        info!("Loading diagram document");
        let document = DiagramDocument::from_json(json)?;
        trace!(document:?; "Parsed document");
        Ok(Session::from_document(&document))
    }

    /// Lay out every node of a session.
    pub fn layout(&self, session: &Session) -> Layout {
        let layout = Engine::from_config(self.config.layout()).calculate_layout(session);
        debug!(bounds:? = layout.bounds(); "Layout bounds");
        layout
    }

    /// Lay out a session and export it as DOT text.
    ///
    /// # Errors
    ///
    /// Returns [`ErdifyError::Validation`] if the configured style is invalid.
    pub fn render_dot(&self, session: &Session) -> Result<String, ErdifyError> {
        let exporter = DotExporter::new()
            .with_style(self.config.style().dot_style()?)
            .with_pin_positions(self.config.layout().pin_positions());

        let layout = self.layout(session);
        let dot = exporter.export(&layout);
        debug!(bytes = dot.len(); "DOT generated");
        Ok(dot)
    }

    /// Lay out a session and render it to SVG with `renderer`.
    ///
    /// # Errors
    ///
    /// Returns [`ErdifyError::Render`] if the renderer fails.
    pub fn render_svg(
        &self,
        session: &Session,
        renderer: &impl Renderer,
    ) -> Result<String, ErdifyError> {
        let dot = self.render_dot(session)?;
        let svg = renderer.render(&dot)?;
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Validate a session and produce its normalized JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ErdifyError::Validation`] if the session cannot be saved.
    pub fn save(&self, session: &Session) -> Result<String, ErdifyError> {
        let document = session.to_document()?;
        Ok(document.to_json_pretty()?)
    }
}
