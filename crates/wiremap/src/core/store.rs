//! Architecture graph store
//!
//! Owns the ordered collection of modules and their ports. Lookup is
//! name-keyed through an index map; display order is the explicit insertion
//! sequence, kept in sync on every creation.

use std::collections::HashMap;
use tracing::{debug, trace};

use crate::core::types::{clamp_name, ModuleData};

/// In-memory store of modules and their ports
///
/// Modules are created implicitly on first reference and live for the
/// process lifetime; there is no delete operation. Module order is insertion
/// order and is never reshuffled, so the name index stays valid across all
/// mutations. Port order inside a module is user-controlled.
#[derive(Debug, Default)]
pub struct ArchitectureStore {
    /// Modules in insertion order
    modules: Vec<ModuleData>,
    /// Module name -> position in `modules`
    index: HashMap<String, usize>,
}

impl ArchitectureStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-creating module lookup
    pub fn module(&self, name: &str) -> Option<&ModuleData> {
        self.index.get(name).map(|&idx| &self.modules[idx])
    }

    /// Non-creating mutable module lookup
    pub fn module_mut(&mut self, name: &str) -> Option<&mut ModuleData> {
        match self.index.get(name) {
            Some(&idx) => Some(&mut self.modules[idx]),
            None => None,
        }
    }

    /// Check if a module exists
    pub fn has_module(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Get or create a module, appending new modules at the tail
    ///
    /// Over-long names are silently truncated before the lookup, so the
    /// truncated and original spellings address the same module.
    pub fn ensure_module(&mut self, name: &str) -> &mut ModuleData {
        let name = clamp_name(name);
        let idx = match self.index.get(name) {
            Some(&idx) => idx,
            None => {
                trace!(module = %name, "Creating module");
                self.modules.push(ModuleData::new(name));
                let idx = self.modules.len() - 1;
                self.index.insert(name.to_string(), idx);
                debug!(module_count = self.modules.len(), "Module added");
                idx
            }
        };
        &mut self.modules[idx]
    }

    /// Iterate modules in insertion order
    pub fn modules(&self) -> impl Iterator<Item = &ModuleData> {
        self.modules.iter()
    }

    /// Number of modules in the store
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// True when the store holds no modules
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Drop all modules and ports
    pub fn clear(&mut self) {
        self.modules.clear();
        self.index.clear();
    }
}
