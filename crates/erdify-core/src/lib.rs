//! erdify Core Types and Definitions
//!
//! This crate provides the foundational types shared by the erdify layout
//! engine and its front ends. It includes:
//!
//! - **Identifiers**: Stable entity and relationship ids ([`identifier`] module)
//! - **Semantic model**: Entities, relationships, cardinalities and layout hints ([`semantic`] module)
//! - **Geometry**: Points, angles and bounds ([`geometry`] module)
//! - **Colors**: CSS color parsing for diagram styling ([`color::Color`])
//! - **Errors**: User-facing validation errors ([`ValidationError`])

pub mod color;
pub mod geometry;
pub mod identifier;
pub mod semantic;

mod error;

pub use error::ValidationError;
