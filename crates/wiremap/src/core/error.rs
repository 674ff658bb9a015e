//! Core error types for architecture graph processing
//!
//! This module defines the common error type used throughout the store,
//! codec, ops, and export layers.

use thiserror::Error;

/// Core error types for architecture graph processing
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Invalid reference '{input}': expected Module::Port[:Type]")]
    InvalidReference { input: String },

    #[error("Reference '{input}' must specify a port (e.g. Module::Port)")]
    MissingPort { input: String },

    #[error("Module '{name}' not found")]
    ModuleNotFound { name: String },

    #[error("Port '{module}::{port}' not found")]
    PortNotFound { module: String, port: String },

    #[error("Link {src_module}::{src_port} -> {dest_module}::{dest_port} not found")]
    LinkNotFound {
        src_module: String,
        src_port: String,
        dest_module: String,
        dest_port: String,
    },

    #[error("Port '{module}::{port}' is already the {boundary} port (cannot move {direction})")]
    PortAtBoundary {
        module: String,
        port: String,
        boundary: &'static str,
        direction: &'static str,
    },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error("Render error: {message}")]
    Render { message: String },
}

impl StoreError {
    /// Create a new invalid-reference error
    pub fn invalid_reference(input: impl Into<String>) -> Self {
        Self::InvalidReference {
            input: input.into(),
        }
    }

    /// Create a new missing-port error
    pub fn missing_port(input: impl Into<String>) -> Self {
        Self::MissingPort {
            input: input.into(),
        }
    }

    /// Create a new module-not-found error
    pub fn module_not_found(name: impl Into<String>) -> Self {
        Self::ModuleNotFound { name: name.into() }
    }

    /// Create a new port-not-found error
    pub fn port_not_found(module: impl Into<String>, port: impl Into<String>) -> Self {
        Self::PortNotFound {
            module: module.into(),
            port: port.into(),
        }
    }

    /// Create a new render error
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }
}
