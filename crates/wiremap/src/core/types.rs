//! Core type definitions for architecture graphs
//!
//! This module contains the fundamental types used throughout Wiremap:
//! port directions, name bounds, and the module/port records owned by
//! the store.

use std::fmt;

/// Maximum stored length of any name or label, in bytes.
///
/// Longer values are silently truncated at a character boundary. The bound
/// applies uniformly to module names, port names, type labels, and link
/// destinations, at both the parse and create boundaries.
pub const MAX_NAME_LEN: usize = 63;

/// Truncate a name to [`MAX_NAME_LEN`] bytes at a character boundary.
///
/// Truncation is silent: callers that pass an over-long name get the
/// shortened form back without any error.
pub fn clamp_name(name: &str) -> &str {
    if name.len() <= MAX_NAME_LEN {
        return name;
    }
    let mut end = MAX_NAME_LEN;
    while end > 0 && !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

/// Direction of a port
///
/// Classifies a port as a producer (`Out`), consumer (`In`), or
/// unconnected (`None`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum PortDirection {
    /// Not connected in either direction
    #[default]
    None,
    /// Consumer side of a link
    In,
    /// Producer side of a link; may carry a destination reference
    Out,
}

impl PortDirection {
    /// The persisted token for this direction
    pub fn as_str(&self) -> &'static str {
        match self {
            PortDirection::None => "none",
            PortDirection::In => "in",
            PortDirection::Out => "out",
        }
    }

    /// Parse a direction token. Unrecognized tokens map to `None`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "in" => PortDirection::In,
            "out" => PortDirection::Out,
            _ => PortDirection::None,
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which way to move a port within its module's sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    /// Swap with the immediate predecessor
    Up,
    /// Swap with the immediate successor
    Down,
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Up => write!(f, "up"),
            MoveDirection::Down => write!(f, "down"),
        }
    }
}

/// A named, typed attachment point on a module
///
/// The destination fields are non-empty only on `Out` ports with an
/// established link. The store never checks that the referenced module or
/// port exists; dangling references are part of the contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortData {
    /// Port name, unique within its module
    pub name: String,
    /// Free-form type label; empty means unknown
    pub ty: String,
    /// Port direction
    pub dir: PortDirection,
    /// Target module name of the recorded link, if any
    pub dest_module: String,
    /// Target port name of the recorded link, if any
    pub dest_port: String,
}

impl PortData {
    /// Create a new unconnected, untyped port
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: clamp_name(&name.into()).to_string(),
            ty: String::new(),
            dir: PortDirection::None,
            dest_module: String::new(),
            dest_port: String::new(),
        }
    }

    /// Record a link: direction becomes `Out` and the destination is set
    pub fn set_link(&mut self, dest_module: &str, dest_port: &str) {
        self.dir = PortDirection::Out;
        self.dest_module = clamp_name(dest_module).to_string();
        self.dest_port = clamp_name(dest_port).to_string();
    }

    /// Clear any recorded link: direction back to `None`, destination emptied
    pub fn clear_link(&mut self) {
        self.dir = PortDirection::None;
        self.dest_module.clear();
        self.dest_port.clear();
    }

    /// Empty the destination fields without touching the direction
    pub fn clear_destination(&mut self) {
        self.dest_module.clear();
        self.dest_port.clear();
    }

    /// True when the recorded destination exactly matches the given endpoint
    pub fn links_to(&self, dest_module: &str, dest_port: &str) -> bool {
        self.dest_module == dest_module && self.dest_port == dest_port
    }

    /// Resolved destination label (`Module::Port`) for linked `Out` ports
    ///
    /// Returns `None` for `In`/`None` ports and for `Out` ports without an
    /// established link.
    pub fn destination_label(&self) -> Option<String> {
        if self.dir == PortDirection::Out && !self.dest_module.is_empty() {
            Some(format!("{}::{}", self.dest_module, self.dest_port))
        } else {
            None
        }
    }
}

/// A named component exposing an ordered sequence of ports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleData {
    /// Module name, unique in the store
    pub name: String,
    ports: Vec<PortData>,
}

impl ModuleData {
    /// Create a new module with no ports
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: clamp_name(&name.into()).to_string(),
            ports: Vec::new(),
        }
    }

    /// Non-creating port lookup
    pub fn port(&self, name: &str) -> Option<&PortData> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Non-creating mutable port lookup
    pub fn port_mut(&mut self, name: &str) -> Option<&mut PortData> {
        self.ports.iter_mut().find(|p| p.name == name)
    }

    /// Get or create a port, preserving the order of existing ports
    ///
    /// New ports are appended at the tail with empty type, direction `None`,
    /// and no destination. Over-long names are silently truncated before the
    /// lookup, so repeated calls with the same over-long name are stable.
    pub fn ensure_port(&mut self, name: &str) -> &mut PortData {
        let name = clamp_name(name);
        let idx = match self.ports.iter().position(|p| p.name == name) {
            Some(idx) => idx,
            None => {
                self.ports.push(PortData::new(name));
                self.ports.len() - 1
            }
        };
        &mut self.ports[idx]
    }

    /// Iterate ports in their current order
    pub fn ports(&self) -> impl Iterator<Item = &PortData> {
        self.ports.iter()
    }

    /// Number of ports on this module
    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Position of a port in the sequence
    pub fn port_position(&self, name: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.name == name)
    }

    /// Swap a port with its neighbor in the given direction
    ///
    /// The sequence is index-addressed, so the move is a plain swap with no
    /// special casing for the first element.
    pub fn move_port(&mut self, name: &str, direction: MoveDirection) -> Result<(), PortMoveError> {
        let idx = self
            .port_position(name)
            .ok_or(PortMoveError::NotFound)?;
        match direction {
            MoveDirection::Up => {
                if idx == 0 {
                    return Err(PortMoveError::AtBoundary);
                }
                self.ports.swap(idx, idx - 1);
            }
            MoveDirection::Down => {
                if idx + 1 == self.ports.len() {
                    return Err(PortMoveError::AtBoundary);
                }
                self.ports.swap(idx, idx + 1);
            }
        }
        Ok(())
    }

    /// True if any port has the given direction
    pub fn has_direction(&self, dir: PortDirection) -> bool {
        self.ports.iter().any(|p| p.dir == dir)
    }
}

/// Outcome detail for [`ModuleData::move_port`]
///
/// Kept separate from the store-level error type so the module record stays
/// self-contained; the ops layer translates these into full errors with
/// module and port names attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortMoveError {
    /// No port with that name on this module
    NotFound,
    /// Already first (for up) or last (for down)
    AtBoundary,
}
