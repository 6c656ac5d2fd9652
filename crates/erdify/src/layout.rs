//! Layout of entity-relationship diagrams.
//!
//! The [`Engine`] turns a [`Session`] into a [`Layout`]: a position for every
//! entity, attribute, relationship diamond and relationship attribute, plus
//! the attribute node sizes the exporter needs.
//!
//! # Pipeline Position
//!
//! ```text
//! Session (entities, relationships)
//!     ↓ layout (this module)
//! Layout (positioned nodes)
//!     ↓ export
//! DOT text
//! ```
//!
//! Layouts are computed from scratch on every call and are deterministic for
//! a given session. Relationships whose endpoints do not resolve are ignored.
//!
//! # Example
//!
//! ```
//! use erdify::{
//!     layout::Engine,
//!     session::{EntityField, RelationshipField, Session},
//! };
//!
//! let mut session = Session::new();
//! for name in ["Student", "Course"] {
//!     let id = session.add_entity();
//!     session.update_entity(id, EntityField::Name(name.to_string()));
//! }
//! let rel = session.add_relationship().unwrap();
//! session.update_relationship(rel, RelationshipField::Entity1("Student".to_string()));
//! session.update_relationship(rel, RelationshipField::Entity2("Course".to_string()));
//!
//! let layout = Engine::new().calculate_layout(&session);
//! assert_eq!(layout.entities()[1].position().x(), 4.0);
//! ```

mod attributes;
mod positions;

pub use attributes::{AngleSweep, AttributeSize, attribute_size};

use log::{debug, info};

use erdify_core::{
    geometry::{Bounds, Point},
    identifier::{EntityId, RelationshipId},
    semantic::Cardinality,
};

use crate::{config::LayoutConfig, session::Session};
use attributes::{EntityAttributeRing, relationship_attribute_radius};

/// Distance between neighboring entities, derived from the entity count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    horizontal: f64,
    vertical: f64,
}

impl Spacing {
    /// Returns the spacing used for a diagram with `count` entities.
    ///
    /// The horizontal step is 4.0 below 7 entities, 6.0 up to 15 and 8.0 from
    /// 16 on; the vertical step is 1.1 shorter.
    pub fn for_entity_count(count: usize) -> Self {
        let horizontal = match count {
            n if n >= 16 => 8.0,
            n if n >= 7 => 6.0,
            _ => 4.0,
        };
        Self {
            horizontal,
            vertical: horizontal - 1.1,
        }
    }

    pub fn horizontal(self) -> f64 {
        self.horizontal
    }

    pub fn vertical(self) -> f64 {
        self.vertical
    }
}

/// A positioned attribute node.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedAttribute {
    name: String,
    position: Point,
    primary_key: bool,
}

impl PlacedAttribute {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }
}

/// A positioned entity with its attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEntity {
    id: EntityId,
    label: String,
    position: Point,
    attributes: Vec<PlacedAttribute>,
    attribute_size: AttributeSize,
}

impl PlacedEntity {
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Display label; blank names are already replaced.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn attributes(&self) -> &[PlacedAttribute] {
        &self.attributes
    }

    pub fn attribute_size(&self) -> AttributeSize {
        self.attribute_size
    }
}

/// A positioned relationship diamond.
///
/// `entity1` and `entity2` index into [`Layout::entities`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRelationship {
    id: RelationshipId,
    ordinal: usize,
    label: String,
    entity1: usize,
    entity2: usize,
    cardinality: Cardinality,
    position: Point,
    attributes: Vec<PlacedAttribute>,
}

impl PlacedRelationship {
    pub fn id(&self) -> RelationshipId {
        self.id
    }

    /// One-based position of the relationship in the session.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entity1(&self) -> usize {
        self.entity1
    }

    pub fn entity2(&self) -> usize {
        self.entity2
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Relationship attributes; only many-to-many relationships have any.
    pub fn attributes(&self) -> &[PlacedAttribute] {
        &self.attributes
    }
}

/// The result of laying out a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    entities: Vec<PlacedEntity>,
    relationships: Vec<PlacedRelationship>,
}

impl Layout {
    /// Entities in session order.
    pub fn entities(&self) -> &[PlacedEntity] {
        &self.entities
    }

    /// Relationships that resolved, in session order.
    pub fn relationships(&self) -> &[PlacedRelationship] {
        &self.relationships
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Bounds of every positioned node, or `None` for an empty layout.
    pub fn bounds(&self) -> Option<Bounds> {
        let entity_points = self.entities.iter().flat_map(|entity| {
            std::iter::once(entity.position)
                .chain(entity.attributes.iter().map(PlacedAttribute::position))
        });
        let relationship_points = self.relationships.iter().flat_map(|rel| {
            std::iter::once(rel.position).chain(rel.attributes.iter().map(PlacedAttribute::position))
        });
        Bounds::enclosing(entity_points.chain(relationship_points))
    }
}

/// Deterministic layout engine for entity-relationship diagrams.
#[derive(Debug, Clone)]
pub struct Engine {
    max_visits_per_entity: usize,
    disconnected_row_gap: f64,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            max_visits_per_entity: 10,
            disconnected_row_gap: 1.5,
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with the walk settings of a layout configuration
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new()
            .with_max_visits_per_entity(config.max_visits_per_entity())
            .with_disconnected_row_gap(config.disconnected_row_gap())
    }

    /// Set the traversal budget, in queue visits per entity
    pub fn with_max_visits_per_entity(mut self, visits: usize) -> Self {
        self.max_visits_per_entity = visits;
        self
    }

    /// Set the gap, in vertical steps, above the row of unreached entities
    pub fn with_disconnected_row_gap(mut self, gap: f64) -> Self {
        self.disconnected_row_gap = gap;
        self
    }

    /// Calculate the layout for a session
    pub fn calculate_layout(&self, session: &Session) -> Layout {
        let entity_count = session.entities().len();
        if entity_count == 0 {
            debug!("Empty session, nothing to lay out");
            return Layout::default();
        }

        let spacing = Spacing::for_entity_count(entity_count);
        let positions = positions::entity_positions(
            session,
            spacing,
            self.max_visits_per_entity,
            self.disconnected_row_gap,
        );

        let resolved: Vec<_> = session.resolved_relationships().collect();

        let entities: Vec<PlacedEntity> = session
            .entities()
            .iter()
            .enumerate()
            .map(|(index, entity)| {
                let position = positions[index];
                let connected: Vec<usize> = resolved
                    .iter()
                    .filter(|rel| rel.touches(index))
                    .map(|rel| {
                        if rel.entity1 == index {
                            rel.entity2
                        } else {
                            rel.entity1
                        }
                    })
                    .collect();
                let blocked: Vec<f64> = connected
                    .iter()
                    .map(|&other| position.angle_to(positions[other]))
                    .collect();

                let attribute_count = entity.attributes().len();
                let ring =
                    EntityAttributeRing::for_entity(entity_count, connected.len(), attribute_count);
                let angles = ring.sweep.distribute(&blocked, attribute_count);

                let attributes = entity
                    .attributes()
                    .iter()
                    .zip(angles)
                    .enumerate()
                    .map(|(i, (name, angle))| PlacedAttribute {
                        name: name.clone(),
                        position: position.polar_offset(ring.radius(i), angle),
                        primary_key: entity.is_primary_key(name),
                    })
                    .collect();

                PlacedEntity {
                    id: entity.id(),
                    label: entity.display_label(index).into_owned(),
                    position,
                    attributes,
                    attribute_size: attribute_size(connected.len(), attribute_count),
                }
            })
            .collect();

        let relationships: Vec<PlacedRelationship> = resolved
            .iter()
            .map(|rel| {
                let from = positions[rel.entity1];
                let to = positions[rel.entity2];
                let position = from.midpoint(to);

                let names = rel.relationship.drawn_attributes();
                let blocked = [position.angle_to(from), position.angle_to(to)];
                let angles = AngleSweep::RELATIONSHIP.distribute(&blocked, names.len());
                let attributes = names
                    .iter()
                    .zip(angles)
                    .enumerate()
                    .map(|(i, (name, angle))| PlacedAttribute {
                        name: name.clone(),
                        position: position.polar_offset(relationship_attribute_radius(i), angle),
                        primary_key: false,
                    })
                    .collect();

                PlacedRelationship {
                    id: rel.relationship.id(),
                    ordinal: rel.position + 1,
                    label: rel.relationship.display_label(rel.position).into_owned(),
                    entity1: rel.entity1,
                    entity2: rel.entity2,
                    cardinality: rel.relationship.cardinality(),
                    position,
                    attributes,
                }
            })
            .collect();

        info!(
            entities_count = entities.len(),
            relationships_count = relationships.len(),
            skipped_relationships = session.relationships().len() - relationships.len();
            "Layout calculated"
        );

        Layout {
            entities,
            relationships,
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;
    use crate::session::{EntityField, RelationshipField};
    use erdify_core::semantic::LayoutHint;

    fn hint_strategy() -> impl Strategy<Value = LayoutHint> {
        prop_oneof![
            Just(LayoutHint::LeftToRight),
            Just(LayoutHint::RightToLeft),
            Just(LayoutHint::TopToBottom),
            Just(LayoutHint::BottomToTop),
        ]
    }

    fn session_strategy() -> impl Strategy<Value = Session> {
        (1usize..20).prop_flat_map(|count| {
            (
                Just(count),
                prop::collection::vec(0usize..6, count),
                prop::collection::vec((0..count, 0..count, hint_strategy()), 0..30),
            )
                .prop_map(|(count, attribute_counts, edges)| {
                    let mut session = Session::new();
                    for (i, attributes) in attribute_counts.iter().enumerate().take(count) {
                        let id = session.add_entity();
                        session.update_entity(id, EntityField::Name(format!("E{i}")));
                        for a in 0..*attributes {
                            session.add_attribute(id, &format!("attr_{a}"));
                        }
                    }
                    for (from, to, hint) in edges {
                        let Ok(rel) = session.add_relationship() else {
                            break;
                        };
                        session.update_relationship(rel, RelationshipField::Entity1(format!("E{from}")));
                        session.update_relationship(rel, RelationshipField::Entity2(format!("E{to}")));
                        session.update_relationship(rel, RelationshipField::Layout(hint));
                    }
                    session
                })
        })
    }

    fn check_every_node_is_placed(session: &Session) -> Result<(), TestCaseError> {
        let layout = Engine::new().calculate_layout(session);
        prop_assert_eq!(layout.entities().len(), session.entities().len());
        for (placed, entity) in layout.entities().iter().zip(session.entities()) {
            prop_assert_eq!(placed.attributes().len(), entity.attributes().len());
            prop_assert!(placed.position().x().is_finite());
            prop_assert!(placed.position().y().is_finite());
        }
        prop_assert_eq!(
            layout.relationships().len(),
            session.resolved_relationships().count()
        );
        Ok(())
    }

    fn check_layout_is_deterministic(session: &Session) -> Result<(), TestCaseError> {
        let engine = Engine::new();
        prop_assert_eq!(engine.calculate_layout(session), engine.calculate_layout(session));
        Ok(())
    }

    fn check_positions_on_spacing_grid(session: &Session) -> Result<(), TestCaseError> {
        let layout = Engine::new().calculate_layout(session);
        let spacing = Spacing::for_entity_count(session.entities().len());
        for entity in layout.entities() {
            let steps = entity.position().x() / spacing.horizontal();
            prop_assert!((steps - steps.round()).abs() < 1e-9);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn every_node_is_placed(session in session_strategy()) {
            check_every_node_is_placed(&session)?;
        }

        #[test]
        fn layout_is_deterministic(session in session_strategy()) {
            check_layout_is_deterministic(&session)?;
        }

        #[test]
        fn positions_on_spacing_grid(session in session_strategy()) {
            check_positions_on_spacing_grid(&session)?;
        }
    }
}
