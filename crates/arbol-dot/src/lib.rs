//! Decision tree visualization: DOT emission plus Graphviz rendering.
//!
//! Translates an [`arbol_id3::Node`] tree into node/edge declarations and
//! delegates pixel rendering to the external Graphviz layout engine.

mod dot;
mod error;
mod render;

pub use dot::{DotGraph, NodeShape, NodeStyle};
pub use error::VizError;
pub use render::{OutputFormat, TreeRenderer};
