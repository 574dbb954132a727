//! Generic Graphviz DOT emitter.
//!
//! Knows nothing about CFGs or call graphs; it walks any
//! `GraphDecorator` and writes one `digraph` with whatever labels and
//! attributes the decorator hands back.

use std::io;
use std::path::Path;

use crate::ports::{GraphDecorator, OutputExporter};

pub struct DotWriter;

impl DotWriter {
    /// Render a decorated graph as DOT text.
    pub fn to_dot(graph: &dyn GraphDecorator) -> String {
        let name = escape(&graph.graph_name());
        let mut lines = Vec::new();
        lines.push(format!("digraph \"{}\" {{", name));
        lines.push(format!("    label=\"{}\";", name));
        lines.push("    node [shape=box, fontname=\"Courier\", fontsize=10];".to_string());
        lines.push(String::new());

        for node in 0..graph.node_count() {
            if !graph.node_visible(node) {
                continue;
            }
            let mut line = format!("    n{} [label=\"{}\"", node, escape(&graph.node_label(node)));
            if let Some(attrs) = graph.node_attributes(node) {
                line.push_str(", ");
                line.push_str(&attrs);
            }
            line.push_str("];");
            lines.push(line);
        }

        lines.push(String::new());

        for node in 0..graph.node_count() {
            if !graph.node_visible(node) {
                continue;
            }
            for (succ, target) in graph.successors(node).into_iter().enumerate() {
                if !graph.node_visible(target) {
                    continue;
                }
                let mut attrs = Vec::new();
                if let Some(marker) = graph.edge_source_label(node, succ) {
                    attrs.push(format!("taillabel=\"{}\"", escape(&marker)));
                }
                if let Some(extra) = graph.edge_attributes(node, succ) {
                    attrs.push(extra);
                }
                if attrs.is_empty() {
                    lines.push(format!("    n{} -> n{};", node, target));
                } else {
                    lines.push(format!("    n{} -> n{} [{}];", node, target, attrs.join(", ")));
                }
            }
        }

        lines.push("}".to_string());
        lines.push(String::new());
        lines.join("\n")
    }
}

impl OutputExporter for DotWriter {
    fn export(&self, graph: &dyn GraphDecorator, path: &Path) -> io::Result<()> {
        std::fs::write(path, Self::to_dot(graph))
    }
}

/// Quote escaping only: labels carry intentional DOT sequences like the
/// `\l` left-justification marker, which a full backslash escape would
/// destroy.
fn escape(text: &str) -> String {
    text.replace('"', "\\\"").replace('\n', "\\n")
}
