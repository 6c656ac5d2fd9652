//! Stable identifiers for diagram elements.
//!
//! Entities and relationships are keyed by synthetic, incrementing ids that
//! stay fixed for the lifetime of an editing session, independent of the
//! user-visible names, which can change at any time.

use std::fmt;

/// Stable identifier of an entity within a session.
///
/// # Examples
///
/// ```
/// use erdify_core::identifier::EntityId;
///
/// let id = EntityId::new(3);
/// assert_eq!(id.to_string(), "entity_3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u32);

impl EntityId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity_{}", self.0)
    }
}

/// Stable identifier of a relationship within a session.
///
/// # Examples
///
/// ```
/// use erdify_core::identifier::RelationshipId;
///
/// let id = RelationshipId::new(1);
/// assert_eq!(id.to_string(), "rel_1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationshipId(u32);

impl RelationshipId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rel_{}", self.0)
    }
}

/// Hands out increasing ids, starting at 1.
#[derive(Debug, Clone, Default)]
pub struct IdCounter {
    last: u32,
}

impl IdCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next raw id value.
    pub fn next_raw(&mut self) -> u32 {
        self.last += 1;
        self.last
    }

    /// Resets the counter so the next id is 1 again.
    pub fn reset(&mut self) {
        self.last = 0;
    }
}
