//! Live preview of a diagram being edited.
//!
//! The [`Editor`] ties a [`Session`] to the layout engine, the DOT exporter
//! and a [`Renderer`]:
//!
//! - Structural edits (adding or removing entities, attributes and
//!   relationships) recompute the preview immediately.
//! - Field edits (names, primary keys, relationship fields) only schedule a
//!   recompute; the [`Debouncer`] fires it once edits have been quiet for the
//!   configured delay. Each new field edit pushes the deadline back.
//! - Renders go through a [`RenderQueue`]. Only the newest request may update
//!   the preview; results of older requests are discarded when they arrive.
//!
//! Time is passed in explicitly, so the whole pipeline runs on the caller's
//! clock.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};

use erdify_core::{
    ValidationError,
    identifier::{EntityId, RelationshipId},
    semantic::AttributeRef,
};

use crate::{
    config::AppConfig,
    error::ErdifyError,
    export::DotExporter,
    layout::Engine,
    render::{RenderError, Renderer},
    session::{EntityField, RelationshipField, Session},
};

/// A single pending deadline that is pushed back by every new request.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Replaces any pending deadline with `now + delay`.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Consumes the pending deadline if it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Identifies one render request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RenderTicket(u64);

/// Single-slot queue where the latest request wins.
#[derive(Debug, Clone, Default)]
pub struct RenderQueue {
    latest: u64,
}

impl RenderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier one.
    pub fn submit(&mut self) -> RenderTicket {
        self.latest += 1;
        RenderTicket(self.latest)
    }

    pub fn is_current(&self, ticket: RenderTicket) -> bool {
        ticket.0 == self.latest
    }

    /// Returns `result` if `ticket` is still the newest request, `None` otherwise.
    pub fn complete<T>(&self, ticket: RenderTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            trace!(ticket = ticket.0, latest = self.latest; "Discarding stale render");
            None
        }
    }
}

/// What the preview area currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewState {
    /// The diagram has no entities yet.
    #[default]
    Empty,
    /// A rendered SVG document.
    Ready(String),
    /// Rendering failed; the message is shown in place of the diagram.
    Failed(String),
}

/// A render that has been requested but not completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRender {
    pub ticket: RenderTicket,
    pub dot: String,
}

/// An editing session with a live preview.
pub struct Editor<R: Renderer> {
    session: Session,
    engine: Engine,
    exporter: DotExporter,
    debouncer: Debouncer,
    queue: RenderQueue,
    renderer: R,
    state: PreviewState,
    last_dot: Option<String>,
}

impl<R: Renderer> Editor<R> {
    /// Creates an editor over an empty session.
    ///
    /// # Errors
    ///
    /// Returns [`ErdifyError::Validation`] if the configured style is invalid.
    pub fn new(config: &AppConfig, renderer: R) -> Result<Self, ErdifyError> {
        let exporter = DotExporter::new()
            .with_style(config.style().dot_style()?)
            .with_pin_positions(config.layout().pin_positions());

        Ok(Self {
            session: Session::new(),
            engine: Engine::from_config(config.layout()),
            exporter,
            debouncer: Debouncer::new(config.preview().debounce()),
            queue: RenderQueue::new(),
            renderer,
            state: PreviewState::Empty,
            last_dot: None,
        })
    }

    /// Replaces the session, e.g. after loading a document, and refreshes
    /// the preview.
    pub fn load(&mut self, session: Session) {
        self.session = session;
        self.debouncer.cancel();
        self.refresh();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn preview(&self) -> &PreviewState {
        &self.state
    }

    /// DOT text of the most recent recompute.
    pub fn last_dot(&self) -> Option<&str> {
        self.last_dot.as_deref()
    }

    pub fn has_pending_update(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn add_entity(&mut self) -> EntityId {
        let id = self.session.add_entity();
        self.structural_edit(true);
        id
    }

    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let changed = self.session.remove_entity(id);
        self.structural_edit(changed)
    }

    pub fn add_attribute(&mut self, id: EntityId, name: &str) -> bool {
        let changed = self.session.add_attribute(id, name);
        self.structural_edit(changed)
    }

    pub fn remove_attribute(&mut self, id: EntityId, attribute: AttributeRef<'_>) -> bool {
        let changed = self.session.remove_attribute(id, attribute);
        self.structural_edit(changed)
    }

    /// Adds a relationship; see [`Session::add_relationship`].
    pub fn add_relationship(&mut self) -> Result<RelationshipId, ValidationError> {
        let id = self.session.add_relationship()?;
        self.structural_edit(true);
        Ok(id)
    }

    pub fn remove_relationship(&mut self, id: RelationshipId) -> bool {
        let changed = self.session.remove_relationship(id);
        self.structural_edit(changed)
    }

    pub fn add_relationship_attribute(&mut self, id: RelationshipId, name: &str) -> bool {
        let changed = self.session.add_relationship_attribute(id, name);
        self.structural_edit(changed)
    }

    pub fn remove_relationship_attribute(&mut self, id: RelationshipId, index: usize) -> bool {
        let changed = self.session.remove_relationship_attribute(id, index);
        self.structural_edit(changed)
    }

    pub fn set_name(&mut self, name: impl Into<String>, now: Instant) -> bool {
        let changed = self.session.set_name(name);
        self.field_edit(changed, now)
    }

    pub fn update_entity(&mut self, id: EntityId, field: EntityField, now: Instant) -> bool {
        let changed = self.session.update_entity(id, field);
        self.field_edit(changed, now)
    }

    pub fn update_relationship(
        &mut self,
        id: RelationshipId,
        field: RelationshipField,
        now: Instant,
    ) -> bool {
        let changed = self.session.update_relationship(id, field);
        self.field_edit(changed, now)
    }

    /// Runs a debounced recompute if its deadline has passed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.debouncer.fire_if_due(now) {
            trace!("Debounced recompute firing");
            self.refresh();
            true
        } else {
            false
        }
    }

    /// Recomputes the layout and renders it synchronously.
    pub fn refresh(&mut self) {
        if let Some(pending) = self.request_render() {
            let result = self.renderer.render(&pending.dot);
            self.complete_render(pending.ticket, result);
        }
    }

    /// Recomputes the layout and starts a render request.
    ///
    /// Returns `None`, and shows the empty preview, when the session has no
    /// entities.
    pub fn request_render(&mut self) -> Option<PendingRender> {
        let layout = self.engine.calculate_layout(&self.session);
        if layout.is_empty() {
            self.last_dot = None;
            self.state = PreviewState::Empty;
            return None;
        }

        let dot = self.exporter.export(&layout);
        self.last_dot = Some(dot.clone());
        let ticket = self.queue.submit();
        debug!(ticket = ticket.0; "Render requested");
        Some(PendingRender { ticket, dot })
    }

    /// Applies the outcome of a render request, unless a newer one exists.
    pub fn complete_render(
        &mut self,
        ticket: RenderTicket,
        result: Result<String, RenderError>,
    ) -> bool {
        let Some(result) = self.queue.complete(ticket, result) else {
            return false;
        };
        self.state = match result {
            Ok(svg) => PreviewState::Ready(svg),
            Err(err) => {
                warn!(error:% = err; "Preview render failed");
                PreviewState::Failed(err.to_string())
            }
        };
        true
    }

    fn structural_edit(&mut self, changed: bool) -> bool {
        if changed {
            self.debouncer.cancel();
            self.refresh();
        }
        changed
    }

    fn field_edit(&mut self, changed: bool, now: Instant) -> bool {
        if changed {
            self.debouncer.schedule(now);
        }
        changed
    }
}
