//! Export of laid-out diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! Session
//!     ↓ layout
//! Layout (positioned nodes)
//!     ↓ export (this module)
//! DOT text
//!     ↓ render
//! SVG
//! ```
//!
//! # Available Backends
//!
//! - [`dot`]: Graphviz DOT output via [`dot::DotExporter`]
//!
//! The DOT text pins every node to the coordinates computed by the layout
//! engine, so the renderer only draws; it does not lay anything out.

pub mod dot;

pub use dot::{DotExporter, DotStyle};
