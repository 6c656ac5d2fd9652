//! The editing session: an explicit, in-memory diagram store.
//!
//! A [`Session`] owns the diagram name, its entities and relationships, and the
//! counters that hand out stable ids. Every editing operation goes through it;
//! there is no global state, so independent sessions can coexist.
//!
//! Relationship endpoints are kept as [`EntityRef`] values keyed on stable
//! [`EntityId`]s. Display names only appear at the edges: when the user picks
//! an endpoint by name ([`RelationshipField::Entity1`]) and when documents are
//! loaded or saved.
//!
//! Each mutating method returns `true` when it changed something. Callers use
//! that to decide whether a preview recompute is needed.

use log::{debug, trace};

use erdify_core::{
    ValidationError,
    identifier::{EntityId, IdCounter, RelationshipId},
    semantic::{AttributeRef, Cardinality, Entity, EntityRef, LayoutHint, Relationship},
};

use crate::document::{DiagramDocument, EntityDocument, RelationshipDocument};

/// Minimum number of entities before a relationship can be added.
const MIN_ENTITIES_FOR_RELATIONSHIP: usize = 2;

/// Label shown in endpoint choice lists for entities without a name.
pub const UNNAMED_CHOICE_LABEL: &str = "Unnamed";

/// A single-field edit of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityField {
    Name(String),
    PrimaryKey(String),
}

/// A single-field edit of a relationship.
///
/// Endpoint fields carry the display name selected by the user. Blank names
/// clear the endpoint; names that match no entity are kept as unresolved
/// references and re-resolved on every layout pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationshipField {
    Entity1(String),
    Entity2(String),
    Relation(String),
    Cardinality(Cardinality),
    Layout(LayoutHint),
}

/// One entry of the endpoint choice list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityChoice {
    pub id: EntityId,
    pub label: String,
}

/// A relationship whose endpoints both resolve to entities.
///
/// `position` is the relationship's index in the session; `entity1` and
/// `entity2` are indices into [`Session::entities`].
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRelationship<'a> {
    pub position: usize,
    pub relationship: &'a Relationship,
    pub entity1: usize,
    pub entity2: usize,
}

impl ResolvedRelationship<'_> {
    /// Returns true if the relationship touches the entity at `entity`.
    pub fn touches(&self, entity: usize) -> bool {
        self.entity1 == entity || self.entity2 == entity
    }
}

/// An in-memory diagram being edited.
#[derive(Debug, Clone, Default)]
pub struct Session {
    name: String,
    entities: Vec<Entity>,
    relationships: Vec<Relationship>,
    entity_ids: IdCounter,
    relationship_ids: IdCounter,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id() == id)
    }

    pub fn relationship(&self, id: RelationshipId) -> Option<&Relationship> {
        self.relationships.iter().find(|rel| rel.id() == id)
    }

    /// Sets the diagram name.
    pub fn set_name(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.name == name {
            return false;
        }
        self.name = name;
        true
    }

    /// Clears the whole session, including the id counters.
    pub fn reset(&mut self) {
        debug!(
            entities_count = self.entities.len(),
            relationships_count = self.relationships.len();
            "Resetting session"
        );
        self.name.clear();
        self.entities.clear();
        self.relationships.clear();
        self.entity_ids.reset();
        self.relationship_ids.reset();
    }

    /// Appends an entity with an empty name, no attributes and no primary key.
    pub fn add_entity(&mut self) -> EntityId {
        let id = EntityId::new(self.entity_ids.next_raw());
        self.entities.push(Entity::new(id));
        debug!(entity_id:% = id; "Entity added");
        id
    }

    /// Removes an entity and every relationship that references it.
    ///
    /// Relationships are removed when either endpoint resolves to the entity
    /// or names its current trimmed name. With duplicate names this also drops
    /// relationships attached to the other entities sharing the name.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        let Some(position) = self.entity_position(id) else {
            return false;
        };

        let name = self.entities[position].name().trim();
        let references = |entity: &EntityRef| {
            self.resolve_position(entity) == Some(position)
                || (!name.is_empty() && self.endpoint_name(entity).trim() == name)
        };

        let before = self.relationships.len();
        let doomed: Vec<RelationshipId> = self
            .relationships
            .iter()
            .filter(|rel| references(rel.entity1()) || references(rel.entity2()))
            .map(Relationship::id)
            .collect();
        self.relationships.retain(|rel| !doomed.contains(&rel.id()));
        self.entities.remove(position);

        debug!(
            entity_id:% = id,
            removed_relationships = before - self.relationships.len();
            "Entity removed"
        );
        true
    }

    /// Appends a trimmed attribute name. Empty names are ignored.
    pub fn add_attribute(&mut self, id: EntityId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(entity) = self.entity_mut(id) else {
            return false;
        };
        entity.push_attribute(name);
        trace!(entity_id:% = id, attribute = name; "Attribute added");
        true
    }

    /// Removes one attribute, by index or by the first matching name.
    pub fn remove_attribute(&mut self, id: EntityId, attribute: AttributeRef<'_>) -> bool {
        self.entity_mut(id)
            .and_then(|entity| entity.remove_attribute(attribute))
            .is_some()
    }

    /// Appends a relationship with blank endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NotEnoughEntities`] when the session has
    /// fewer than two entities. Nothing is added in that case.
    pub fn add_relationship(&mut self) -> Result<RelationshipId, ValidationError> {
        if self.entities.len() < MIN_ENTITIES_FOR_RELATIONSHIP {
            return Err(ValidationError::NotEnoughEntities {
                required: MIN_ENTITIES_FOR_RELATIONSHIP,
                found: self.entities.len(),
            });
        }

        let id = RelationshipId::new(self.relationship_ids.next_raw());
        self.relationships.push(Relationship::new(id));
        debug!(relationship_id:% = id; "Relationship added");
        Ok(id)
    }

    pub fn remove_relationship(&mut self, id: RelationshipId) -> bool {
        let before = self.relationships.len();
        self.relationships.retain(|rel| rel.id() != id);
        before != self.relationships.len()
    }

    /// Updates a single field of an entity.
    pub fn update_entity(&mut self, id: EntityId, field: EntityField) -> bool {
        let Some(entity) = self.entity_mut(id) else {
            return false;
        };
        match field {
            EntityField::Name(name) => entity.set_name(name),
            EntityField::PrimaryKey(primary_key) => entity.set_primary_key(primary_key),
        }
        true
    }

    /// Updates a single field of a relationship.
    pub fn update_relationship(&mut self, id: RelationshipId, field: RelationshipField) -> bool {
        let field = match field {
            RelationshipField::Entity1(name) => {
                Resolved::Entity1(self.entity_ref_for_name(&name))
            }
            RelationshipField::Entity2(name) => {
                Resolved::Entity2(self.entity_ref_for_name(&name))
            }
            RelationshipField::Relation(relation) => Resolved::Relation(relation),
            RelationshipField::Cardinality(cardinality) => Resolved::Cardinality(cardinality),
            RelationshipField::Layout(layout) => Resolved::Layout(layout),
        };

        let Some(rel) = self.relationship_mut(id) else {
            return false;
        };
        match field {
            Resolved::Entity1(entity) => rel.set_entity1(entity),
            Resolved::Entity2(entity) => rel.set_entity2(entity),
            Resolved::Relation(relation) => rel.set_relation(relation),
            Resolved::Cardinality(cardinality) => rel.set_cardinality(cardinality),
            Resolved::Layout(layout) => rel.set_layout(layout),
        }
        true
    }

    /// Appends a trimmed relationship attribute. Empty names are ignored.
    pub fn add_relationship_attribute(&mut self, id: RelationshipId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        let Some(rel) = self.relationship_mut(id) else {
            return false;
        };
        rel.push_attribute(name);
        true
    }

    pub fn remove_relationship_attribute(&mut self, id: RelationshipId, index: usize) -> bool {
        self.relationship_mut(id)
            .and_then(|rel| rel.remove_attribute(index))
            .is_some()
    }

    /// Returns the choices for relationship endpoint selectors, in entity order.
    ///
    /// The list is rebuilt on every call, so it always shows current names.
    pub fn entity_choices(&self) -> Vec<EntityChoice> {
        self.entities
            .iter()
            .map(|entity| EntityChoice {
                id: entity.id(),
                label: if entity.is_unnamed() {
                    UNNAMED_CHOICE_LABEL.to_string()
                } else {
                    entity.name().trim().to_string()
                },
            })
            .collect()
    }

    /// Resolves an endpoint to its entity, if it currently exists.
    pub fn resolve(&self, entity: &EntityRef) -> Option<&Entity> {
        self.resolve_position(entity)
            .map(|position| &self.entities[position])
    }

    /// Returns every relationship whose endpoints both resolve, in order.
    pub fn resolved_relationships(&self) -> impl Iterator<Item = ResolvedRelationship<'_>> + '_ {
        self.relationships
            .iter()
            .enumerate()
            .filter_map(|(position, relationship)| {
                let entity1 = self.resolve_position(relationship.entity1())?;
                let entity2 = self.resolve_position(relationship.entity2())?;
                Some(ResolvedRelationship {
                    position,
                    relationship,
                    entity1,
                    entity2,
                })
            })
    }

    /// Rebuilds a session from a stored document.
    ///
    /// Ids are regenerated. Endpoint names are resolved to the first entity
    /// with that name; unresolved names are kept so they can resolve later.
    pub fn from_document(document: &DiagramDocument) -> Self {
        let mut session = Self::new();
        session.name = document.name.clone();

        for entity_doc in &document.entities {
            let id = EntityId::new(session.entity_ids.next_raw());
            let mut entity = Entity::new(id);
            entity.set_name(entity_doc.name.as_str());
            for attribute in &entity_doc.attributes {
                entity.push_attribute(attribute.as_str());
            }
            entity.set_primary_key(entity_doc.primary_key.as_str());
            session.entities.push(entity);
        }

        for rel_doc in &document.relationships {
            let id = RelationshipId::new(session.relationship_ids.next_raw());
            let mut rel = Relationship::new(id);
            rel.set_entity1(session.entity_ref_for_name(&rel_doc.entity1));
            rel.set_entity2(session.entity_ref_for_name(&rel_doc.entity2));
            rel.set_relation(rel_doc.relation.as_str());
            rel.set_cardinality(rel_doc.cardinality);
            rel.set_layout(rel_doc.layout);
            rel.set_attributes(rel_doc.attributes.clone());
            session.relationships.push(rel);
        }

        debug!(
            entities_count = session.entities.len(),
            relationships_count = session.relationships.len();
            "Session loaded from document"
        );
        session
    }

    /// Validates the session and converts it into a storable document.
    ///
    /// The diagram name is lower-cased with whitespace runs replaced by `_`.
    /// Entities without a primary key get their first attribute as one.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the diagram name is blank, when
    /// there are no entities, or when any entity is unnamed.
    pub fn to_document(&self) -> Result<DiagramDocument, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyDiagramName);
        }
        if self.entities.is_empty() {
            return Err(ValidationError::NoEntities);
        }
        if let Some(position) = self.entities.iter().position(Entity::is_unnamed) {
            return Err(ValidationError::UnnamedEntity {
                position: position + 1,
            });
        }

        let entities = self
            .entities
            .iter()
            .map(|entity| EntityDocument {
                name: entity.name().to_string(),
                attributes: entity.attributes().to_vec(),
                primary_key: if entity.primary_key().is_empty() {
                    entity.attributes().first().cloned().unwrap_or_default()
                } else {
                    entity.primary_key().to_string()
                },
            })
            .collect();

        let relationships = self
            .relationships
            .iter()
            .map(|rel| RelationshipDocument {
                entity1: self.endpoint_name(rel.entity1()),
                entity2: self.endpoint_name(rel.entity2()),
                relation: rel.relation().to_string(),
                cardinality: rel.cardinality(),
                layout: rel.layout(),
                attributes: rel.attributes().map(<[String]>::to_vec),
            })
            .collect();

        Ok(DiagramDocument {
            name: normalize_document_name(name),
            entities,
            relationships,
        })
    }

    fn entity_position(&self, id: EntityId) -> Option<usize> {
        self.entities.iter().position(|entity| entity.id() == id)
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.id() == id)
    }

    fn relationship_mut(&mut self, id: RelationshipId) -> Option<&mut Relationship> {
        self.relationships.iter_mut().find(|rel| rel.id() == id)
    }

    fn position_by_name(&self, name: &str) -> Option<usize> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.entities
            .iter()
            .position(|entity| entity.name().trim() == name)
    }

    fn resolve_position(&self, entity: &EntityRef) -> Option<usize> {
        match entity {
            EntityRef::Unset => None,
            EntityRef::Entity(id) => self.entity_position(*id),
            EntityRef::Named(name) => self.position_by_name(name),
        }
    }

    fn entity_ref_for_name(&self, name: &str) -> EntityRef {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return EntityRef::Unset;
        }
        match self.position_by_name(trimmed) {
            Some(position) => EntityRef::Entity(self.entities[position].id()),
            None => EntityRef::Named(trimmed.to_string()),
        }
    }

    fn endpoint_name(&self, entity: &EntityRef) -> String {
        match entity {
            EntityRef::Unset => String::new(),
            EntityRef::Entity(_) => self
                .resolve(entity)
                .map(|entity| entity.name().trim().to_string())
                .unwrap_or_default(),
            EntityRef::Named(name) => name.clone(),
        }
    }
}

/// A [`RelationshipField`] with endpoint names already resolved.
enum Resolved {
    Entity1(EntityRef),
    Entity2(EntityRef),
    Relation(String),
    Cardinality(Cardinality),
    Layout(LayoutHint),
}

/// Lower-cases a diagram name and replaces whitespace runs with `_`.
///
/// # Examples
///
/// ```
/// use erdify::session::normalize_document_name;
///
/// assert_eq!(normalize_document_name("Order Items"), "order_items");
/// assert_eq!(normalize_document_name("  Big   School\tDB "), "big_school_db");
/// ```
pub fn normalize_document_name(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_session(names: &[&str]) -> (Session, Vec<EntityId>) {
        let mut session = Session::new();
        let ids = names
            .iter()
            .map(|name| {
                let id = session.add_entity();
                session.update_entity(id, EntityField::Name(name.to_string()));
                id
            })
            .collect();
        (session, ids)
    }

    fn connect(session: &mut Session, from: &str, to: &str) -> RelationshipId {
        let id = session.add_relationship().unwrap();
        session.update_relationship(id, RelationshipField::Entity1(from.to_string()));
        session.update_relationship(id, RelationshipField::Entity2(to.to_string()));
        id
    }

    #[test]
    fn test_add_entity_defaults() {
        let mut session = Session::new();
        let id = session.add_entity();
        let entity = session.entity(id).unwrap();
        assert_eq!(entity.name(), "");
        assert!(entity.attributes().is_empty());
        assert_eq!(entity.primary_key(), "");
    }

    #[test]
    fn test_ids_are_stable_and_increasing() {
        let mut session = Session::new();
        let first = session.add_entity();
        let second = session.add_entity();
        session.remove_entity(first);
        let third = session.add_entity();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_add_attribute_trims_and_ignores_blank() {
        let (mut session, ids) = named_session(&["Student"]);
        assert!(session.add_attribute(ids[0], "  name "));
        assert!(!session.add_attribute(ids[0], "   "));
        assert!(session.add_attribute(ids[0], "name"));
        assert_eq!(session.entity(ids[0]).unwrap().attributes(), ["name", "name"]);
    }

    #[test]
    fn test_remove_attribute_by_index_and_name() {
        let (mut session, ids) = named_session(&["Student"]);
        for attribute in ["id", "name", "email"] {
            session.add_attribute(ids[0], attribute);
        }
        assert!(session.remove_attribute(ids[0], AttributeRef::Index(0)));
        assert!(session.remove_attribute(ids[0], AttributeRef::Name("email")));
        assert!(!session.remove_attribute(ids[0], AttributeRef::Name("missing")));
        assert_eq!(session.entity(ids[0]).unwrap().attributes(), ["name"]);
    }

    #[test]
    fn test_add_relationship_needs_two_entities() {
        let (mut session, _) = named_session(&["Only"]);
        let err = session.add_relationship().unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotEnoughEntities {
                required: 2,
                found: 1
            }
        );
        assert!(session.relationships().is_empty());
    }

    #[test]
    fn test_add_relationship_defaults() {
        let (mut session, _) = named_session(&["A", "B"]);
        let id = session.add_relationship().unwrap();
        let rel = session.relationship(id).unwrap();
        assert!(rel.entity1().is_unset());
        assert!(rel.entity2().is_unset());
        assert_eq!(rel.cardinality(), Cardinality::OneToMany);
        assert_eq!(rel.layout(), LayoutHint::LeftToRight);
    }

    #[test]
    fn test_endpoints_follow_renames() {
        let (mut session, ids) = named_session(&["Student", "Course"]);
        connect(&mut session, "Student", "Course");

        session.update_entity(ids[0], EntityField::Name("Pupil".to_string()));

        let resolved: Vec<_> = session.resolved_relationships().collect();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].entity1, 0);
    }

    #[test]
    fn test_unknown_endpoint_name_resolves_later() {
        let (mut session, ids) = named_session(&["Student", ""]);
        let rel = connect(&mut session, "Student", "Course");
        assert_eq!(
            session.relationship(rel).unwrap().entity2(),
            &EntityRef::Named("Course".to_string())
        );
        assert_eq!(session.resolved_relationships().count(), 0);

        session.update_entity(ids[1], EntityField::Name("Course".to_string()));
        assert_eq!(session.resolved_relationships().count(), 1);
    }

    #[test]
    fn test_blank_endpoint_name_unsets() {
        let (mut session, _) = named_session(&["A", "B"]);
        let rel = connect(&mut session, "A", "B");
        session.update_relationship(rel, RelationshipField::Entity2("  ".to_string()));
        assert!(session.relationship(rel).unwrap().entity2().is_unset());
    }

    #[test]
    fn test_remove_entity_cascades() {
        let (mut session, ids) = named_session(&["A", "B", "C"]);
        connect(&mut session, "A", "B");
        let kept = connect(&mut session, "B", "C");
        connect(&mut session, "C", "A");

        assert!(session.remove_entity(ids[0]));
        assert_eq!(session.entities().len(), 2);
        let remaining: Vec<_> = session.relationships().iter().map(Relationship::id).collect();
        assert_eq!(remaining, [kept]);
    }

    #[test]
    fn test_remove_entity_cascades_named_references() {
        let (mut session, ids) = named_session(&["A", "B"]);
        let rel = session.add_relationship().unwrap();
        session.update_relationship(rel, RelationshipField::Entity1("B".to_string()));
        session.update_relationship(rel, RelationshipField::Entity2("Ghost".to_string()));
        session.update_entity(ids[0], EntityField::Name("Ghost".to_string()));

        assert!(session.remove_entity(ids[0]));
        assert!(session.relationships().is_empty());
    }

    #[test]
    fn test_remove_entity_cascades_duplicate_names() {
        let (mut session, ids) = named_session(&["X", "Y", "X"]);
        let rel = connect(&mut session, "X", "Y");
        assert_eq!(
            session.relationship(rel).map(|rel| rel.entity1().clone()),
            Some(EntityRef::Entity(ids[0]))
        );

        assert!(session.remove_entity(ids[2]));
        assert!(session.relationships().is_empty());
        assert_eq!(session.entities().len(), 2);
    }

    #[test]
    fn test_remove_entity_without_relationships() {
        let (mut session, ids) = named_session(&["Lonely"]);
        assert!(session.remove_entity(ids[0]));
        assert!(!session.remove_entity(ids[0]));
        assert!(session.entities().is_empty());
    }

    #[test]
    fn test_entity_choices_reflect_current_names() {
        let (mut session, ids) = named_session(&["Student", ""]);
        let labels: Vec<_> = session
            .entity_choices()
            .into_iter()
            .map(|choice| choice.label)
            .collect();
        assert_eq!(labels, ["Student", UNNAMED_CHOICE_LABEL]);

        session.update_entity(ids[1], EntityField::Name("Course".to_string()));
        assert_eq!(session.entity_choices()[1].label, "Course");
        assert_eq!(session.entity_choices()[1].id, ids[1]);
    }

    #[test]
    fn test_relationship_attributes() {
        let (mut session, _) = named_session(&["A", "B"]);
        let rel = connect(&mut session, "A", "B");
        assert!(session.add_relationship_attribute(rel, " grade "));
        assert!(!session.add_relationship_attribute(rel, ""));
        assert_eq!(
            session.relationship(rel).unwrap().attributes(),
            Some(&["grade".to_string()][..])
        );
        assert!(session.remove_relationship_attribute(rel, 0));
        assert!(!session.remove_relationship_attribute(rel, 0));
    }

    #[test]
    fn test_reset_clears_counters() {
        let (mut session, _) = named_session(&["A", "B"]);
        session.set_name("school");
        session.reset();
        assert_eq!(session.name(), "");
        assert!(session.entities().is_empty());
        assert_eq!(session.add_entity(), EntityId::new(1));
    }

    #[test]
    fn test_to_document_validation_order() {
        let mut session = Session::new();
        assert_eq!(
            session.to_document().unwrap_err(),
            ValidationError::EmptyDiagramName
        );

        session.set_name("school");
        assert_eq!(session.to_document().unwrap_err(), ValidationError::NoEntities);

        session.add_entity();
        assert_eq!(
            session.to_document().unwrap_err(),
            ValidationError::UnnamedEntity { position: 1 }
        );
    }

    #[test]
    fn test_to_document_defaults_primary_key() {
        let (mut session, ids) = named_session(&["Student"]);
        session.set_name("Order Items");
        session.add_attribute(ids[0], "student_id");
        session.add_attribute(ids[0], "name");

        let document = session.to_document().unwrap();
        assert_eq!(document.name, "order_items");
        assert_eq!(document.entities[0].primary_key, "student_id");
    }

    #[test]
    fn test_document_round_trip_keeps_relationship_attributes() {
        let (mut session, _) = named_session(&["Student", "Course"]);
        session.set_name("school");
        let with_attrs = connect(&mut session, "Student", "Course");
        session.update_relationship(
            with_attrs,
            RelationshipField::Cardinality(Cardinality::ManyToMany),
        );
        session.add_relationship_attribute(with_attrs, "grade");
        session.add_relationship_attribute(with_attrs, "semester");

        let document = session.to_document().unwrap();
        let reloaded = Session::from_document(&document);
        assert_eq!(reloaded.to_document().unwrap(), document);
    }

    #[test]
    fn test_from_document_resolves_first_matching_name() {
        let document = DiagramDocument {
            name: "d".to_string(),
            entities: vec![
                EntityDocument {
                    name: "Twin".to_string(),
                    ..EntityDocument::default()
                },
                EntityDocument {
                    name: "Twin".to_string(),
                    ..EntityDocument::default()
                },
            ],
            relationships: vec![RelationshipDocument {
                entity1: "Twin".to_string(),
                entity2: "Missing".to_string(),
                ..RelationshipDocument::default()
            }],
        };

        let session = Session::from_document(&document);
        let rel = &session.relationships()[0];
        assert_eq!(rel.entity1(), &EntityRef::Entity(session.entities()[0].id()));
        assert_eq!(rel.entity2(), &EntityRef::Named("Missing".to_string()));
        assert_eq!(rel.attributes(), None);
    }
}
