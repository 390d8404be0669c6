//! Recursive ID3 tree induction.

use std::collections::BTreeMap;
use std::time::Instant;

use tracing::{debug, instrument};

use crate::gain::best_split;
use crate::trace::{NoTrace, TraceSink};
use crate::{Branch, Dataset, Node, TreeConfig, TreeError, TreeMetrics};

/// Result of one tree build: the root node and the populated metrics.
#[derive(Debug)]
pub struct BuildResult {
    root: Node,
    metrics: TreeMetrics,
}

impl BuildResult {
    /// Borrow the root node.
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Borrow the build metrics.
    #[must_use]
    pub fn metrics(&self) -> &TreeMetrics {
        &self.metrics
    }

    /// Consume the result and return the root node.
    #[must_use]
    pub fn into_root(self) -> Node {
        self.root
    }
}

/// Builds categorical decision trees by recursive entropy-gain partitioning.
///
/// Each call to [`build`](TreeBuilder::build) works on freshly allocated
/// metrics and log state, so one builder may serve concurrent requests
/// without cross-build sharing.
#[derive(Debug)]
pub struct TreeBuilder {
    config: TreeConfig,
}

impl TreeBuilder {
    /// Create a builder after validating the configuration.
    ///
    /// # Errors
    ///
    /// Propagates the configuration variants of [`TreeError`] from
    /// [`TreeConfig::validate`].
    pub fn new(config: TreeConfig) -> Result<Self, TreeError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Return the builder's configuration.
    #[must_use]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Build a tree over the full dataset with fresh metrics and no trace.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingColumn`] when `target` or a feature is
    /// not declared by the dataset; no partial tree is returned.
    pub fn build(
        &self,
        data: &Dataset,
        features: &[String],
        target: &str,
    ) -> Result<BuildResult, TreeError> {
        let mut metrics = TreeMetrics::new(features, target);
        let mut trace = NoTrace;
        let root = self.build_with(data, features, target, &mut metrics, &mut trace)?;
        Ok(BuildResult { root, metrics })
    }

    /// Build a tree into caller-supplied metrics and trace sink.
    ///
    /// Resets `metrics` (observers survive), grows the tree from depth 0,
    /// then feeds every node of the finished tree to the metrics collector
    /// pre-order along with its decision level, and stamps the elapsed
    /// build duration.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingColumn`] when `target` or a feature is
    /// not declared by the dataset; no partial tree is returned.
    #[instrument(skip_all, fields(n_rows = data.n_rows(), n_features = features.len(), target = %target))]
    pub fn build_with(
        &self,
        data: &Dataset,
        features: &[String],
        target: &str,
        metrics: &mut TreeMetrics,
        trace: &mut dyn TraceSink,
    ) -> Result<Node, TreeError> {
        metrics.reset(features, target);
        data.column_index(target)?;

        trace.record(0, "Starting decision tree build...");
        trace.record(0, &format!("Total samples: {}", data.n_rows()));
        trace.record(0, &format!("Features: {features:?}"));
        trace.record(0, &format!("Target: {target}"));

        let start = Instant::now();
        let rows = data.row_indices();
        let root = self.grow(data, &rows, features, target, 0, trace)?;
        let elapsed = start.elapsed();

        root.visit(&mut |node, level| metrics.record(node, level));
        metrics.set_build_time(elapsed);

        debug!(
            n_nodes = root.n_nodes(),
            n_leaves = root.n_leaves(),
            depth = root.depth(),
            "decision tree built"
        );
        Ok(root)
    }

    /// Grow one subtree over the row subset `rows`.
    fn grow(
        &self,
        data: &Dataset,
        rows: &[usize],
        features: &[String],
        target: &str,
        depth: usize,
        trace: &mut dyn TraceSink,
    ) -> Result<Node, TreeError> {
        debug_assert!(!rows.is_empty(), "empty subsets are never recursed into");
        let target_column = data.column_index(target)?;

        // Pure stop: every row shares one target value.
        let first = data.value(rows[0], target_column);
        if rows.iter().all(|&row| data.value(row, target_column) == first) {
            return Ok(Node::Leaf {
                label: first.to_string(),
                samples: rows.len(),
            });
        }

        // Exhausted stop: no features left, depth limit reached, or the
        // subset is too small to split. The leaf takes the majority label.
        let depth_reached = self.config.max_depth.is_some_and(|limit| depth >= limit);
        let too_few = rows.len() < self.config.min_samples_split;
        if features.is_empty() || depth_reached || too_few {
            return Ok(Node::Leaf {
                label: majority_label(data, rows, target_column),
                samples: rows.len(),
            });
        }

        // Split on the highest-gain candidate.
        trace.record(depth, &format!("Searching best split among {features:?}..."));
        let choice = best_split(data, rows, features, target)?;
        for candidate in &choice.evaluated {
            trace.record(
                depth + 1,
                &format!("- Gain({}) = {:.4}", candidate.feature, candidate.gain),
            );
        }

        if self.config.min_information_gain > 0.0 && choice.gain < self.config.min_information_gain
        {
            trace.record(
                depth,
                &format!(
                    "Best gain {:.4} below threshold, emitting majority leaf",
                    choice.gain
                ),
            );
            return Ok(Node::Leaf {
                label: majority_label(data, rows, target_column),
                samples: rows.len(),
            });
        }

        trace.record(
            depth,
            &format!("Best split: {} (Gain = {:.4})", choice.feature, choice.gain),
        );

        let remaining: Vec<String> = features
            .iter()
            .filter(|feature| **feature != choice.feature)
            .cloned()
            .collect();
        let split_column = data.column_index(&choice.feature)?;

        // Partition by value; BTreeMap keys give the lexicographic branch order.
        let mut partitions: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for &row in rows {
            partitions
                .entry(data.value(row, split_column))
                .or_default()
                .push(row);
        }

        let mut branches = Vec::with_capacity(partitions.len());
        for (value, subset) in &partitions {
            let child = self.grow(data, subset, &remaining, target, depth + 1, trace)?;
            branches.push(Branch {
                value: (*value).to_string(),
                child,
            });
        }

        Ok(Node::Split {
            feature: choice.feature,
            samples: rows.len(),
            branches,
        })
    }
}

/// Return the most frequent target value in the subset.
///
/// Ties break to the lexicographically smallest value so exhausted-stop
/// leaves are deterministic regardless of row order.
fn majority_label(data: &Dataset, rows: &[usize], target_column: usize) -> String {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for &row in rows {
        *counts.entry(data.value(row, target_column)).or_insert(0) += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for (value, &count) in &counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string()).unwrap_or_default()
}
