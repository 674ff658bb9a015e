//! Persistence codec for the shared architecture file
//!
//! Encodes the store as an XML-shaped document and decodes it back with a
//! line-oriented scanner. The schema is fixed and shared with the GUI
//! collaborator, so both the attribute names and their order are part of the
//! contract:
//!
//! ```text
//! <root>
//!   <module name="Sensor">
//!     <port name="Out" type="int" dir="out" dest_mod="Proc" dest_port="In" />
//!   </module>
//! </root>
//! ```
//!
//! Known limitation, kept for compatibility: attribute values containing a
//! `"` character break extraction. The decoder assumes the five port
//! attributes appear in fixed positional order and leaves any attribute it
//! cannot extract (and all later ones) empty.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use tracing::{debug, trace, warn};

use crate::core::error::StoreError;
use crate::core::store::ArchitectureStore;
use crate::core::types::PortDirection;

/// Encode the store as the persistence document
///
/// Modules and ports are written in list order, one element per line.
pub fn encode(store: &ArchitectureStore) -> String {
    let mut out = String::new();
    out.push_str("<root>\n");
    for module in store.modules() {
        // Infallible: fmt::Write on String cannot fail
        let _ = writeln!(out, "  <module name=\"{}\">", module.name);
        for port in module.ports() {
            let _ = writeln!(
                out,
                "    <port name=\"{}\" type=\"{}\" dir=\"{}\" dest_mod=\"{}\" dest_port=\"{}\" />",
                port.name,
                port.ty,
                port.dir.as_str(),
                port.dest_module,
                port.dest_port
            );
        }
        out.push_str("  </module>\n");
    }
    out.push_str("</root>\n");
    out
}

/// Decode a persistence document into an existing store
///
/// Performs get-or-create on every module and port line and overwrites port
/// fields; it never clears the store first. Decoding the same document twice
/// is therefore idempotent, while decoding into an already-mutated store
/// merges rather than replaces. Unknown direction tokens decode to `None`.
pub fn decode_into(input: &str, store: &mut ArchitectureStore) {
    let mut current_module: Option<String> = None;

    for line in input.lines() {
        if line.contains("<module") {
            if let Some(name) = attr_value(line, "name") {
                // Keep the stored (possibly truncated) spelling as current
                let module = store.ensure_module(name);
                current_module = Some(module.name.clone());
            }
        } else if line.contains("<port") {
            let Some(module_name) = current_module.as_deref() else {
                continue;
            };

            // Fixed positional attribute order; a failed extraction leaves
            // that field and everything after it empty.
            let mut rest = line;
            let name = take_attr(&mut rest, "name").unwrap_or("");
            let ty = take_attr(&mut rest, "type").unwrap_or("");
            let dir = take_attr(&mut rest, "dir").unwrap_or("");
            let dest_mod = take_attr(&mut rest, "dest_mod").unwrap_or("");
            let dest_port = take_attr(&mut rest, "dest_port").unwrap_or("");

            if name.is_empty() {
                trace!(line, "Skipping port line without a name");
                continue;
            }

            let module_name = module_name.to_string();
            let module = store.ensure_module(&module_name);
            let port = module.ensure_port(name);
            port.ty = ty.to_string();
            port.dir = PortDirection::from_token(dir);
            port.dest_module = dest_mod.to_string();
            port.dest_port = dest_port.to_string();
        }
    }

    debug!(module_count = store.module_count(), "Decoded store");
}

/// Load the store from a file
///
/// A missing file yields an empty store, not an error; that is the normal
/// first-run state. Any other read failure is also mapped to an empty store,
/// with a warning, so one unreadable file never wedges the tool.
pub fn load(path: &Path) -> ArchitectureStore {
    let mut store = ArchitectureStore::new();
    match fs::read_to_string(path) {
        Ok(contents) => {
            decode_into(&contents, &mut store);
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "No persisted state, starting empty");
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read persisted state, starting empty");
        }
    }
    store
}

/// Save the store to a file
///
/// Returns the underlying I/O error on failure; callers decide whether that
/// is fatal (the CLI logs it and carries on, matching the original's
/// silent-no-op contract while still leaving a trace).
pub fn save(path: &Path, store: &ArchitectureStore) -> Result<(), StoreError> {
    fs::write(path, encode(store))?;
    trace!(path = %path.display(), "Persisted store");
    Ok(())
}

/// Extract the value of `key="..."` from a line without consuming it
fn attr_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let mut rest = line;
    take_attr(&mut rest, key)
}

/// Extract `key="value"` from `*rest`, advancing past the closing quote
///
/// Returns `None` when the key or its closing quote is missing. Because the
/// cursor only moves forward, attributes must appear in the order they are
/// asked for.
fn take_attr<'a>(rest: &mut &'a str, key: &str) -> Option<&'a str> {
    let marker = format!("{}=\"", key);
    let start = rest.find(&marker)? + marker.len();
    let value_and_tail = &rest[start..];
    let end = value_and_tail.find('"')?;
    *rest = &value_and_tail[end + 1..];
    Some(&value_and_tail[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::PortDirection;

    fn sample_store() -> ArchitectureStore {
        let mut store = ArchitectureStore::new();
        let sensor = store.ensure_module("Sensor");
        let out = sensor.ensure_port("Out");
        out.ty = "int".to_string();
        out.set_link("Proc", "In");

        let proc_ = store.ensure_module("Proc");
        let inp = proc_.ensure_port("In");
        inp.ty = "int".to_string();
        inp.dir = PortDirection::In;
        store
    }

    #[test]
    fn test_encode_schema() {
        let store = sample_store();
        let doc = encode(&store);
        assert_eq!(
            doc,
            "<root>\n\
             \x20 <module name=\"Sensor\">\n\
             \x20   <port name=\"Out\" type=\"int\" dir=\"out\" dest_mod=\"Proc\" dest_port=\"In\" />\n\
             \x20 </module>\n\
             \x20 <module name=\"Proc\">\n\
             \x20   <port name=\"In\" type=\"int\" dir=\"in\" dest_mod=\"\" dest_port=\"\" />\n\
             \x20 </module>\n\
             </root>\n"
        );
    }

    #[test]
    fn test_round_trip() {
        let store = sample_store();
        let doc = encode(&store);

        let mut decoded = ArchitectureStore::new();
        decode_into(&doc, &mut decoded);

        assert_eq!(decoded.module_count(), 2);
        let names: Vec<_> = decoded.modules().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Sensor", "Proc"]);

        let out = decoded.module("Sensor").unwrap().port("Out").unwrap();
        assert_eq!(out.ty, "int");
        assert_eq!(out.dir, PortDirection::Out);
        assert_eq!(out.dest_module, "Proc");
        assert_eq!(out.dest_port, "In");

        let inp = decoded.module("Proc").unwrap().port("In").unwrap();
        assert_eq!(inp.dir, PortDirection::In);
        assert!(inp.dest_module.is_empty());

        // Second encode reproduces the document byte for byte
        assert_eq!(encode(&decoded), doc);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let doc = encode(&sample_store());
        let mut store = ArchitectureStore::new();
        decode_into(&doc, &mut store);
        decode_into(&doc, &mut store);

        assert_eq!(store.module_count(), 2);
        assert_eq!(store.module("Sensor").unwrap().port_count(), 1);
    }

    #[test]
    fn test_decode_merges_into_mutated_store() {
        let doc = encode(&sample_store());
        let mut store = ArchitectureStore::new();
        store.ensure_module("Extra").ensure_port("P");

        decode_into(&doc, &mut store);

        // Existing content survives; decoded content is appended after it
        assert_eq!(store.module_count(), 3);
        let names: Vec<_> = store.modules().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Extra", "Sensor", "Proc"]);
    }

    #[test]
    fn test_decode_unknown_direction() {
        let doc = "<root>\n  <module name=\"M\">\n    <port name=\"P\" type=\"t\" dir=\"sideways\" dest_mod=\"\" dest_port=\"\" />\n  </module>\n</root>\n";
        let mut store = ArchitectureStore::new();
        decode_into(doc, &mut store);
        assert_eq!(
            store.module("M").unwrap().port("P").unwrap().dir,
            PortDirection::None
        );
    }

    #[test]
    fn test_decode_port_before_module_ignored() {
        let doc = "<root>\n    <port name=\"P\" type=\"\" dir=\"none\" dest_mod=\"\" dest_port=\"\" />\n</root>\n";
        let mut store = ArchitectureStore::new();
        decode_into(doc, &mut store);
        assert!(store.is_empty());
    }

    #[test]
    fn test_quote_in_value_breaks_extraction() {
        // Documented limitation: the quote inside the type value terminates
        // the attribute early and the scanner falls out of sync.
        let doc = "<root>\n  <module name=\"M\">\n    <port name=\"P\" type=\"a\"b\" dir=\"out\" dest_mod=\"D\" dest_port=\"Q\" />\n  </module>\n</root>\n";
        let mut store = ArchitectureStore::new();
        decode_into(doc, &mut store);

        let port = store.module("M").unwrap().port("P").unwrap();
        assert_eq!(port.ty, "a");
        // The scanner resynchronizes on later attributes where it can, but
        // the mis-parse is silent either way; pin the current behavior.
        assert_eq!(port.dir, PortDirection::Out);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = load(&dir.path().join("nope.xml"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links_data.xml");

        let store = sample_store();
        save(&path, &store).unwrap();

        let loaded = load(&path);
        assert_eq!(loaded.module_count(), 2);
        assert_eq!(encode(&loaded), encode(&store));
    }
}
