//! DOT source construction from node and edge declarations.

use std::fmt::Write as _;

/// Shape of a declared visual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeShape {
    /// Ellipse, used for split nodes.
    Ellipse,
    /// Rounded box, used for leaf nodes.
    RoundedBox,
}

/// Fill and font styling for a declared visual node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    /// Fill color.
    pub fillcolor: &'static str,
    /// Border color.
    pub color: &'static str,
    /// Label font color.
    pub fontcolor: &'static str,
}

struct NodeDecl {
    id: String,
    label: String,
    shape: NodeShape,
    style: NodeStyle,
}

struct EdgeDecl {
    from: String,
    to: String,
    label: String,
}

/// Accumulates node and edge declarations and emits Graphviz DOT source.
///
/// Graph-level attributes (top-to-bottom ranking, polyline splines,
/// transparent background, Arial labeling) are fixed to match the
/// service's rendering style.
#[derive(Default)]
pub struct DotGraph {
    nodes: Vec<NodeDecl>,
    edges: Vec<EdgeDecl>,
}

impl DotGraph {
    /// Create an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a visual node.
    pub fn add_node(&mut self, id: &str, label: &str, shape: NodeShape, style: NodeStyle) {
        self.nodes.push(NodeDecl {
            id: id.to_string(),
            label: label.to_string(),
            shape,
            style,
        });
    }

    /// Declare a directed, labeled edge between two declared nodes.
    pub fn add_edge(&mut self, from: &str, to: &str, label: &str) {
        self.edges.push(EdgeDecl {
            from: from.to_string(),
            to: to.to_string(),
            label: label.to_string(),
        });
    }

    /// Return the number of declared nodes.
    #[must_use]
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Return the number of declared edges.
    #[must_use]
    pub fn n_edges(&self) -> usize {
        self.edges.len()
    }

    /// Emit the DOT source for the declared graph.
    #[must_use]
    pub fn source(&self) -> String {
        let mut out = String::new();
        out.push_str("digraph DecisionTree {\n");
        out.push_str(
            "  graph [rankdir=TB, splines=polyline, ranksep=1.4, nodesep=0.6, \
             bgcolor=\"transparent\", overlap=false, dpi=300];\n",
        );
        out.push_str("  node [fontname=\"Arial\", fontsize=14, penwidth=1.5];\n");
        out.push_str(
            "  edge [fontname=\"Arial\", fontsize=12, fontcolor=\"#4A5568\", \
             color=\"#CBD5E0\", arrowhead=none];\n",
        );

        for node in &self.nodes {
            let (shape, style) = match node.shape {
                NodeShape::Ellipse => ("ellipse", "filled"),
                NodeShape::RoundedBox => ("box", "filled,rounded"),
            };
            let _ = writeln!(
                out,
                "  {} [label=\"{}\", shape={}, style=\"{}\", fillcolor=\"{}\", \
                 color=\"{}\", fontcolor=\"{}\"];",
                node.id,
                escape(&node.label),
                shape,
                style,
                node.style.fillcolor,
                node.style.color,
                node.style.fontcolor,
            );
        }

        for edge in &self.edges {
            let _ = writeln!(
                out,
                "  {} -> {} [label=\" {} \"];",
                edge.from,
                edge.to,
                escape(&edge.label),
            );
        }

        out.push_str("}\n");
        out
    }
}

/// Escape a label for inclusion in a double-quoted DOT string.
fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
