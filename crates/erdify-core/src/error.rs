//! Validation errors reported back to the user.

use thiserror::Error;

/// A user-facing validation failure.
///
/// Validation errors never leave the session in a partially-updated state:
/// the operation that reports one performs no mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("diagram name is required")]
    EmptyDiagramName,

    #[error("at least one entity is required")]
    NoEntities,

    #[error("every entity must have a name (entity #{position} is unnamed)")]
    UnnamedEntity { position: usize },

    #[error("at least {required} entities are required to add a relationship, found {found}")]
    NotEnoughEntities { required: usize, found: usize },

    #[error("invalid color `{value}`: {reason}")]
    InvalidColor { value: String, reason: String },
}
