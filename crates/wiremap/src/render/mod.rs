//! Rendering backends for the architecture store
//!
//! `text` produces the list table and draw hierarchy, `dot` the Graphviz
//! description, and `graphviz` drives the external renderer.

pub mod dot;
pub mod graphviz;
pub mod text;

pub use dot::dot_source;
pub use graphviz::{GraphvizRunner, ImageFormat};
pub use text::{draw, list_module};
