//! Reference token syntax
//!
//! Parses the `Module::Port:Type` reference tokens taken on the command
//! line. The grammar is deliberately lossy: every field is truncated to the
//! maximum name length, and splitting always prefers the first `::` and the
//! first subsequent `:`.

use crate::core::error::StoreError;
use crate::core::types::clamp_name;
use tracing::trace;

/// A parsed `Module::Port:Type` reference
///
/// `port` and `ty` may be empty; `module` never is (an empty module name is
/// a parse failure, not an empty reference).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRef {
    /// Module name (non-empty)
    pub module: String,
    /// Port name; empty when the token named only a module
    pub port: String,
    /// Type label; empty when not given
    pub ty: String,
}

impl PortRef {
    /// True when the reference names a port, not just a module
    pub fn has_port(&self) -> bool {
        !self.port.is_empty()
    }
}

impl std::fmt::Display for PortRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}::{}", self.module, self.port)?;
        if !self.ty.is_empty() {
            write!(f, ":{}", self.ty)?;
        }
        Ok(())
    }
}

/// Parse a `Module::Port:Type` token
///
/// Grammar:
/// - No `::` in the input: the whole token is the module name; port and type
///   are empty.
/// - Otherwise everything before the first `::` is the module name. Within
///   the remainder, everything before the first `:` is the port and
///   everything after it is the type; with no `:`, the whole remainder is
///   the port.
///
/// Every field is silently truncated to the maximum name length. Success is
/// defined as a non-empty module name, so `""` and `"::P"` both fail.
pub fn parse_port_ref(input: &str) -> Result<PortRef, StoreError> {
    let (module, rest) = match input.find("::") {
        Some(pos) => (&input[..pos], Some(&input[pos + 2..])),
        None => (input, None),
    };

    if module.is_empty() {
        return Err(StoreError::invalid_reference(input));
    }

    let (port, ty) = match rest {
        Some(rest) => match rest.find(':') {
            Some(pos) => (&rest[..pos], &rest[pos + 1..]),
            None => (rest, ""),
        },
        None => ("", ""),
    };

    let parsed = PortRef {
        module: clamp_name(module).to_string(),
        port: clamp_name(port).to_string(),
        ty: clamp_name(ty).to_string(),
    };
    trace!(
        module = %parsed.module,
        port = %parsed.port,
        ty = %parsed.ty,
        "Parsed port reference"
    );
    Ok(parsed)
}
