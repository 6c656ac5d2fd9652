//! Error types for erdify operations.
//!
//! This module provides the main error type [`ErdifyError`] which wraps the
//! error conditions that can occur while loading, laying out, exporting and
//! rendering diagrams.

use std::io;

use thiserror::Error;

use erdify_core::ValidationError;

use crate::{document::DocumentError, render::RenderError};

/// The main error type for erdify operations.
#[derive(Debug, Error)]
pub enum ErdifyError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),
}
