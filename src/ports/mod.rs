//! Trait seams between graph decoration and text emission.

use std::io;
use std::path::Path;

/// Traversal and annotation protocol driving the generic DOT emitter.
///
/// A decorator adapts one graph flavor (CFG or call graph) to the
/// emitter: it enumerates nodes by index, says which are visible, and
/// produces the label and attribute text for each node and edge. Edge
/// callbacks are indexed by position in `successors`, so the three edge
/// methods must agree on ordering.
pub trait GraphDecorator {
    /// Human-readable graph title, also emitted as the graph label.
    fn graph_name(&self) -> String;

    fn node_count(&self) -> usize;

    /// Hidden nodes are skipped along with every edge touching them.
    fn node_visible(&self, _node: usize) -> bool {
        true
    }

    /// Node label text. May contain DOT escape sequences such as `\l`;
    /// the emitter only escapes quotes.
    fn node_label(&self, node: usize) -> String;

    /// Extra attribute text for a node (e.g. heat colors), without
    /// surrounding brackets.
    fn node_attributes(&self, _node: usize) -> Option<String> {
        None
    }

    /// Successor node indices, one entry per outgoing edge.
    fn successors(&self, node: usize) -> Vec<usize>;

    /// Source-side edge marker ("T"/"F", switch case value).
    fn edge_source_label(&self, _node: usize, _succ: usize) -> Option<String> {
        None
    }

    /// Attribute text for an edge (e.g. a weight label), without
    /// surrounding brackets.
    fn edge_attributes(&self, _node: usize, _succ: usize) -> Option<String> {
        None
    }
}

/// Writes a decorated graph to a file.
pub trait OutputExporter {
    fn export(&self, graph: &dyn GraphDecorator, path: &Path) -> io::Result<()>;
}
