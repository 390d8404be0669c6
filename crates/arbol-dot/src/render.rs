//! Tree-to-image rendering through an external Graphviz engine.

use std::io::Write as _;
use std::process::{Command, Stdio};

use arbol_id3::{MetricsObserver, Node};
use tracing::{debug, instrument, trace};

use crate::dot::{DotGraph, NodeShape, NodeStyle};
use crate::VizError;

const SPLIT_STYLE: NodeStyle = NodeStyle {
    fillcolor: "#EBF8FF",
    color: "#90CDF4",
    fontcolor: "#2C5282",
};

const LEAF_STYLE: NodeStyle = NodeStyle {
    fillcolor: "#F0FFF4",
    color: "#9AE6B4",
    fontcolor: "#2F855A",
};

/// Raster format requested from the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Portable Network Graphics.
    Png,
    /// Scalable Vector Graphics.
    Svg,
}

impl OutputFormat {
    fn flag(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Renders a decision tree to an encoded image via the Graphviz `dot`
/// layout engine.
///
/// Splits are drawn as ellipses labeled with the feature name, leaves as
/// rounded boxes labeled with the class value, and each branch as one
/// directed edge from the split to the branch's subtree root, labeled
/// with the branch value. The value edge itself is never drawn as a node.
#[derive(Debug, Clone)]
pub struct TreeRenderer {
    engine: String,
    format: OutputFormat,
}

impl TreeRenderer {
    /// Create a renderer using the `dot` executable and PNG output.
    #[must_use]
    pub fn new() -> Self {
        Self {
            engine: "dot".to_string(),
            format: OutputFormat::Png,
        }
    }

    /// Set the layout engine executable (name or path).
    #[must_use]
    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Set the output image format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Return the configured engine executable.
    #[must_use]
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Build the DOT source for a tree without invoking the engine.
    #[must_use]
    pub fn dot_source(&self, root: &Node) -> String {
        let mut graph = DotGraph::new();
        let mut next_id = 0usize;
        declare(root, &mut graph, &mut next_id);
        graph.source()
    }

    /// Render a tree to encoded image bytes.
    ///
    /// # Errors
    ///
    /// | Variant | When |
    /// |---|---|
    /// | [`VizError::EngineSpawn`] | The engine executable cannot be launched |
    /// | [`VizError::EngineIo`] | Piping the graph through the engine fails |
    /// | [`VizError::EngineFailed`] | The engine exits unsuccessfully |
    #[instrument(skip_all, fields(engine = %self.engine, n_nodes = root.n_nodes()))]
    pub fn render(&self, root: &Node) -> Result<Vec<u8>, VizError> {
        let source = self.dot_source(root);

        let mut child = Command::new(&self.engine)
            .arg(format!("-T{}", self.format.flag()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| VizError::EngineSpawn {
                engine: self.engine.clone(),
                source: e,
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| VizError::EngineIo {
                    engine: self.engine.clone(),
                    source: e,
                })?;
        }

        let output = child.wait_with_output().map_err(|e| VizError::EngineIo {
            engine: self.engine.clone(),
            source: e,
        })?;

        if !output.status.success() {
            return Err(VizError::EngineFailed {
                engine: self.engine.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!(bytes = output.stdout.len(), "tree rendered");
        Ok(output.stdout)
    }
}

impl Default for TreeRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsObserver for TreeRenderer {
    // Progress hook only; rendering happens after the build completes.
    fn metrics_updated(&mut self, node: &Node) {
        trace!(samples = node.samples(), leaf = node.is_leaf(), "build progress");
    }
}

/// Declare `node` and its subtree, returning the node's DOT id.
fn declare(node: &Node, graph: &mut DotGraph, next_id: &mut usize) -> String {
    let id = format!("n{next_id}");
    *next_id += 1;

    match node {
        Node::Leaf { label, .. } => {
            graph.add_node(&id, label, NodeShape::RoundedBox, LEAF_STYLE);
        }
        Node::Split {
            feature, branches, ..
        } => {
            graph.add_node(&id, feature, NodeShape::Ellipse, SPLIT_STYLE);
            for branch in branches {
                let child_id = declare(&branch.child, graph, next_id);
                graph.add_edge(&id, &child_id, &branch.value);
            }
        }
    }

    id
}
