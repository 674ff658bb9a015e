//! Graphviz DOT export
//!
//! Renders the store as a DOT description: one `shape=plain` node per
//! module with an HTML-like table label of three regions (input ports,
//! module name, output ports), and one edge per established link. Edges
//! whose destination does not exist in the store are emitted verbatim;
//! resolving them is Graphviz's problem, not ours.

use std::fmt::Write as _;
use tracing::debug;

use crate::core::{ArchitectureStore, ModuleData, PortDirection};

/// Produce the DOT source for the whole store
pub fn dot_source(store: &ArchitectureStore) -> String {
    let mut out = String::new();
    out.push_str("digraph G {\n");
    out.push_str("  rankdir=LR;\n");
    // polyline keeps the wires attached to their port cells
    out.push_str("  splines=polyline;\n");
    out.push_str("  nodesep=0.8;\n");
    out.push_str("  ranksep=1.0;\n");
    out.push_str("  node [shape=plain, fontname=\"Arial\", fontsize=12];\n");
    out.push_str("  edge [fontname=\"Arial\", fontsize=10];\n\n");

    for module in store.modules() {
        write_module_node(module, &mut out);
    }

    out.push('\n');

    let mut edge_count = 0usize;
    for module in store.modules() {
        for port in module.ports() {
            if port.dir == PortDirection::Out && !port.dest_module.is_empty() {
                let _ = writeln!(
                    out,
                    "  {}:{} -> {}:{};",
                    module.name, port.name, port.dest_module, port.dest_port
                );
                edge_count += 1;
            }
        }
    }

    out.push_str("}\n");
    debug!(
        module_count = store.module_count(),
        edge_count, "DOT description generated"
    );
    out
}

/// Emit one module as a plain node with a three-region table label
///
/// The left and right regions are inner tables with one addressable cell per
/// `In`/`Out` port (`port="<name>"`); either region is omitted entirely when
/// the module has no ports of that direction.
fn write_module_node(module: &ModuleData, out: &mut String) {
    let _ = writeln!(out, "  {} [label=<", module.name);
    out.push_str("   <table border=\"0\" cellborder=\"0\" cellspacing=\"0\" cellpadding=\"0\">\n");
    out.push_str("    <tr>\n");

    // Left region: input ports
    out.push_str("      <td>\n");
    if module.has_direction(PortDirection::In) {
        write_port_cells(module, PortDirection::In, out);
    }
    out.push_str("      </td>\n");

    // Middle region: module name block
    out.push_str("      <td>\n");
    out.push_str(
        "        <table border=\"1\" cellborder=\"0\" cellspacing=\"0\" cellpadding=\"8\" bgcolor=\"#f0f0f0\">\n",
    );
    let _ = writeln!(out, "          <tr><td><b>{}</b></td></tr>", module.name);
    out.push_str("        </table>\n");
    out.push_str("      </td>\n");

    // Right region: output ports
    out.push_str("      <td>\n");
    if module.has_direction(PortDirection::Out) {
        write_port_cells(module, PortDirection::Out, out);
    }
    out.push_str("      </td>\n");

    out.push_str("    </tr>\n");
    out.push_str("   </table>>];\n\n");
}

fn write_port_cells(module: &ModuleData, dir: PortDirection, out: &mut String) {
    out.push_str(
        "        <table border=\"0\" cellborder=\"1\" cellspacing=\"0\" cellpadding=\"4\" bgcolor=\"#ffffff\">\n",
    );
    for port in module.ports() {
        if port.dir == dir {
            let _ = writeln!(
                out,
                "          <tr><td port=\"{}\">{}</td></tr>",
                port.name, port.name
            );
        }
    }
    out.push_str("        </table>\n");
}
