//! Wiremap - document and visualize module/port dataflow architectures
//!
//! A library for maintaining a static architecture graph: named modules
//! exposing named, directed ports, connected by links from an output port to
//! an input port. The graph persists to a small XML-shaped file shared with
//! other front ends and exports to Graphviz for rendering.
//!
//! # Quick Start
//!
//! ```rust
//! use wiremap::{ops, render, ArchitectureStore};
//!
//! let mut store = ArchitectureStore::new();
//! ops::add_link(&mut store, "Sensor::Out:int", "Proc::In").unwrap();
//!
//! let table = render::list_module(&store, "Sensor").unwrap();
//! assert!(table.contains("Proc::In"));
//!
//! let dot = render::dot_source(&store);
//! assert!(dot.contains("Sensor:Out -> Proc:In;"));
//! ```
//!
//! # Persistence
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wiremap::{load, save};
//!
//! let path = Path::new("links_data.xml");
//! let mut store = load(path); // missing file yields an empty store
//! // ... mutate ...
//! save(path, &store).unwrap();
//! ```

pub mod core;
pub mod ops;
pub mod render;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        parse_port_ref, ArchitectureStore, ModuleData, MoveDirection, PortData, PortDirection,
        PortRef, StoreError,
    };
    pub use crate::ops::{add_link, edit_port, move_port, remove_link};
    pub use crate::render::{dot_source, draw, list_module, GraphvizRunner, ImageFormat};
}
