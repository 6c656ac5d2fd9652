//! Semantic model types for entity-relationship diagrams.
//!
//! These are the in-memory forms of what a user authors in the editor:
//! [`Entity`] values with their attributes, and [`Relationship`] values that
//! connect two entities with a [`Cardinality`] and a [`LayoutHint`].
//!
//! Relationship endpoints are [`EntityRef`] values. They point at entities by
//! stable [`EntityId`] wherever possible and fall back to a plain name only for
//! references that did not resolve when they were set.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Serialize};

use crate::identifier::{EntityId, RelationshipId};

/// Multiplicity constraint of a relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    OneToOne,
    #[default]
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    /// Returns the edge labels drawn next to `entity1` and `entity2`.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdify_core::semantic::Cardinality;
    ///
    /// assert_eq!(Cardinality::OneToMany.labels(), ("1", "N"));
    /// assert_eq!(Cardinality::ManyToMany.labels(), ("N", "N"));
    /// ```
    pub fn labels(self) -> (&'static str, &'static str) {
        match self {
            Cardinality::OneToOne => ("1", "1"),
            Cardinality::OneToMany => ("1", "N"),
            Cardinality::ManyToOne => ("N", "1"),
            Cardinality::ManyToMany => ("N", "N"),
        }
    }

    /// Returns the wire name of this cardinality.
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::OneToOne => "one-to-one",
            Cardinality::OneToMany => "one-to-many",
            Cardinality::ManyToOne => "many-to-one",
            Cardinality::ManyToMany => "many-to-many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction in which `entity2` is placed relative to `entity1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayoutHint {
    #[default]
    #[serde(rename = "LR", alias = "lr")]
    LeftToRight,
    #[serde(rename = "RL", alias = "rl")]
    RightToLeft,
    #[serde(rename = "TB", alias = "tb")]
    TopToBottom,
    #[serde(rename = "BT", alias = "bt")]
    BottomToTop,
}

impl LayoutHint {
    /// Returns the hint seen from the other endpoint of the relationship.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdify_core::semantic::LayoutHint;
    ///
    /// assert_eq!(LayoutHint::LeftToRight.mirror(), LayoutHint::RightToLeft);
    /// assert_eq!(LayoutHint::BottomToTop.mirror(), LayoutHint::TopToBottom);
    /// ```
    pub fn mirror(self) -> Self {
        match self {
            LayoutHint::LeftToRight => LayoutHint::RightToLeft,
            LayoutHint::RightToLeft => LayoutHint::LeftToRight,
            LayoutHint::TopToBottom => LayoutHint::BottomToTop,
            LayoutHint::BottomToTop => LayoutHint::TopToBottom,
        }
    }

    /// True for the top-to-bottom and bottom-to-top hints.
    pub fn is_vertical(self) -> bool {
        matches!(self, LayoutHint::TopToBottom | LayoutHint::BottomToTop)
    }

    /// Returns the `(dx, dy)` offset of a neighbor placed along this hint.
    pub fn offset(self, horizontal: f64, vertical: f64) -> (f64, f64) {
        match self {
            LayoutHint::LeftToRight => (horizontal, 0.0),
            LayoutHint::RightToLeft => (-horizontal, 0.0),
            LayoutHint::TopToBottom => (0.0, -vertical),
            LayoutHint::BottomToTop => (0.0, vertical),
        }
    }

    /// Returns the two-letter wire code of this hint.
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutHint::LeftToRight => "LR",
            LayoutHint::RightToLeft => "RL",
            LayoutHint::TopToBottom => "TB",
            LayoutHint::BottomToTop => "BT",
        }
    }
}

impl fmt::Display for LayoutHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One endpoint of a relationship.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EntityRef {
    /// No entity chosen yet.
    #[default]
    Unset,
    /// A resolved entity, followed across renames.
    Entity(EntityId),
    /// A name that matched no entity when it was set.
    Named(String),
}

impl EntityRef {
    /// Returns true if no entity has been chosen.
    pub fn is_unset(&self) -> bool {
        matches!(self, EntityRef::Unset)
    }
}

/// Selects one attribute of an entity, by position or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeRef<'a> {
    Index(usize),
    Name(&'a str),
}

/// An entity as authored in the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    id: EntityId,
    name: String,
    attributes: Vec<String>,
    primary_key: String,
}

impl Entity {
    /// Creates an entity with an empty name, no attributes and no primary key.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            name: String::new(),
            attributes: Vec::new(),
            primary_key: String::new(),
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    /// The name exactly as the user typed it.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[String] {
        &self.attributes
    }

    pub fn primary_key(&self) -> &str {
        &self.primary_key
    }

    /// Returns true when the trimmed name is empty.
    pub fn is_unnamed(&self) -> bool {
        self.name.trim().is_empty()
    }

    /// The label used for layout and rendering.
    ///
    /// Blank names are replaced with `Entitas_{position + 1}`, where `position`
    /// is the entity's index in the session. The stored name is not changed.
    ///
    /// # Examples
    ///
    /// ```
    /// use erdify_core::{identifier::EntityId, semantic::Entity};
    ///
    /// let mut entity = Entity::new(EntityId::new(1));
    /// assert_eq!(entity.display_label(2), "Entitas_3");
    ///
    /// entity.set_name("  Student ");
    /// assert_eq!(entity.display_label(2), "Student");
    /// ```
    pub fn display_label(&self, position: usize) -> Cow<'_, str> {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            Cow::Owned(format!("Entitas_{}", position + 1))
        } else {
            Cow::Borrowed(trimmed)
        }
    }

    /// Returns true if `attribute` is this entity's primary key.
    pub fn is_primary_key(&self, attribute: &str) -> bool {
        !self.primary_key.is_empty() && attribute == self.primary_key
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_primary_key(&mut self, primary_key: impl Into<String>) {
        self.primary_key = primary_key.into();
    }

    /// Appends an attribute name. Duplicates are kept.
    pub fn push_attribute(&mut self, attribute: impl Into<String>) {
        self.attributes.push(attribute.into());
    }

    /// Removes one attribute, returning it if it existed.
    pub fn remove_attribute(&mut self, attribute: AttributeRef<'_>) -> Option<String> {
        let index = match attribute {
            AttributeRef::Index(index) => index,
            AttributeRef::Name(name) => self.attributes.iter().position(|a| a == name)?,
        };
        (index < self.attributes.len()).then(|| self.attributes.remove(index))
    }
}

/// A relationship between two entities.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    id: RelationshipId,
    entity1: EntityRef,
    entity2: EntityRef,
    relation: String,
    cardinality: Cardinality,
    layout: LayoutHint,
    attributes: Option<Vec<String>>,
}

impl Relationship {
    /// Creates a relationship with blank endpoints, an empty relation label,
    /// [`Cardinality::OneToMany`] and [`LayoutHint::LeftToRight`].
    pub fn new(id: RelationshipId) -> Self {
        Self {
            id,
            entity1: EntityRef::Unset,
            entity2: EntityRef::Unset,
            relation: String::new(),
            cardinality: Cardinality::default(),
            layout: LayoutHint::default(),
            attributes: Some(Vec::new()),
        }
    }

    pub fn id(&self) -> RelationshipId {
        self.id
    }

    pub fn entity1(&self) -> &EntityRef {
        &self.entity1
    }

    pub fn entity2(&self) -> &EntityRef {
        &self.entity2
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    pub fn layout(&self) -> LayoutHint {
        self.layout
    }

    /// Relationship-level attributes; `None` when the source document had none.
    pub fn attributes(&self) -> Option<&[String]> {
        self.attributes.as_deref()
    }

    /// Attributes that are drawn, which only happens for many-to-many relationships.
    pub fn drawn_attributes(&self) -> &[String] {
        match (self.cardinality, &self.attributes) {
            (Cardinality::ManyToMany, Some(attributes)) => attributes,
            _ => &[],
        }
    }

    /// The label used for the relationship node; blank relations become
    /// `Relasi_{position + 1}`.
    pub fn display_label(&self, position: usize) -> Cow<'_, str> {
        let trimmed = self.relation.trim();
        if trimmed.is_empty() {
            Cow::Owned(format!("Relasi_{}", position + 1))
        } else {
            Cow::Borrowed(trimmed)
        }
    }

    pub fn set_entity1(&mut self, entity: EntityRef) {
        self.entity1 = entity;
    }

    pub fn set_entity2(&mut self, entity: EntityRef) {
        self.entity2 = entity;
    }

    pub fn set_relation(&mut self, relation: impl Into<String>) {
        self.relation = relation.into();
    }

    pub fn set_cardinality(&mut self, cardinality: Cardinality) {
        self.cardinality = cardinality;
    }

    pub fn set_layout(&mut self, layout: LayoutHint) {
        self.layout = layout;
    }

    /// Replaces the attribute list, keeping `None` distinct from an empty list.
    pub fn set_attributes(&mut self, attributes: Option<Vec<String>>) {
        self.attributes = attributes;
    }

    /// Appends a relationship attribute, creating the list if needed.
    pub fn push_attribute(&mut self, attribute: impl Into<String>) {
        self.attributes
            .get_or_insert_with(Vec::new)
            .push(attribute.into());
    }

    /// Removes the relationship attribute at `index`, returning it if it existed.
    pub fn remove_attribute(&mut self, index: usize) -> Option<String> {
        let attributes = self.attributes.as_mut()?;
        (index < attributes.len()).then(|| attributes.remove(index))
    }
}
