//! Build metrics collection with observer notification.

use std::collections::BTreeMap;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::trace;

use crate::Node;

/// Receives a callback after every metrics update.
///
/// Observers are invoked synchronously, in registration order, once per
/// recorded node. Used by the visualization adapter as a progress hook and
/// by any external tracing consumer.
pub trait MetricsObserver {
    /// Called after `node` has been folded into the metrics.
    fn metrics_updated(&mut self, node: &Node);
}

/// Aggregate statistics for one tree build.
///
/// Created fresh per build (or [`reset`](TreeMetrics::reset) between
/// builds), populated by the builder's post-build traversal, then
/// snapshotted into an immutable [`MetricsSummary`] via
/// [`finalize`](TreeMetrics::finalize).
pub struct TreeMetrics {
    created_at: DateTime<Utc>,
    features: Vec<String>,
    target: String,
    node_count: usize,
    max_depth: usize,
    leaf_count: usize,
    split_counts: BTreeMap<String, usize>,
    build_time: Duration,
    observers: Vec<Box<dyn MetricsObserver>>,
}

impl std::fmt::Debug for TreeMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeMetrics")
            .field("created_at", &self.created_at)
            .field("features", &self.features)
            .field("target", &self.target)
            .field("node_count", &self.node_count)
            .field("max_depth", &self.max_depth)
            .field("leaf_count", &self.leaf_count)
            .field("split_counts", &self.split_counts)
            .field("build_time", &self.build_time)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl TreeMetrics {
    /// Create fresh metrics for a build over the given features and target.
    #[must_use]
    pub fn new(features: &[String], target: &str) -> Self {
        Self {
            created_at: Utc::now(),
            features: features.to_vec(),
            target: target.to_string(),
            node_count: 0,
            max_depth: 0,
            leaf_count: 0,
            split_counts: BTreeMap::new(),
            build_time: Duration::ZERO,
            observers: Vec::new(),
        }
    }

    /// Reset every counter for a new build, keeping attached observers.
    pub fn reset(&mut self, features: &[String], target: &str) {
        self.created_at = Utc::now();
        self.features = features.to_vec();
        self.target = target.to_string();
        self.node_count = 0;
        self.max_depth = 0;
        self.leaf_count = 0;
        self.split_counts.clear();
        self.build_time = Duration::ZERO;
    }

    /// Attach an observer to be notified after each recorded node.
    pub fn attach(&mut self, observer: Box<dyn MetricsObserver>) {
        self.observers.push(observer);
    }

    /// Fold one node into the metrics and notify attached observers.
    ///
    /// `level` is the node's decision level as counted by the builder's
    /// traversal: the root at 0, children of a split one deeper.
    pub fn record(&mut self, node: &Node, level: usize) {
        match node {
            Node::Split { feature, .. } => {
                self.node_count += 1;
                *self.split_counts.entry(feature.clone()).or_insert(0) += 1;
            }
            Node::Leaf { .. } => {
                self.node_count += 1;
                self.leaf_count += 1;
            }
        }
        if level > self.max_depth {
            self.max_depth = level;
        }
        trace!(level, node_count = self.node_count, "node recorded");

        for observer in &mut self.observers {
            observer.metrics_updated(node);
        }
    }

    /// Record the total elapsed build duration.
    pub(crate) fn set_build_time(&mut self, build_time: Duration) {
        self.build_time = build_time;
    }

    /// Return the total number of recorded nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Return the number of recorded leaf nodes.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Return the maximum recorded decision depth.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Return per-feature split occurrence counts.
    #[must_use]
    pub fn split_counts(&self) -> &BTreeMap<String, usize> {
        &self.split_counts
    }

    /// Return the recorded build duration.
    #[must_use]
    pub fn build_time(&self) -> Duration {
        self.build_time
    }

    /// Snapshot the metrics into an immutable summary.
    ///
    /// Feature importance is each feature's split count divided by the
    /// total number of splits; the map is empty when no split occurred.
    /// Build time is reported in seconds at millisecond precision.
    #[must_use]
    pub fn finalize(&self) -> MetricsSummary {
        let total_splits: usize = self.split_counts.values().sum();
        let feature_importance = if total_splits > 0 {
            self.split_counts
                .iter()
                .map(|(feature, &count)| (feature.clone(), count as f64 / total_splits as f64))
                .collect()
        } else {
            BTreeMap::new()
        };

        MetricsSummary {
            created_at: self.created_at,
            features: self.features.clone(),
            target: self.target.clone(),
            node_count: self.node_count,
            max_depth: self.max_depth,
            leaf_count: self.leaf_count,
            split_counts: self.split_counts.clone(),
            feature_importance,
            build_time_secs: (self.build_time.as_secs_f64() * 1000.0).round() / 1000.0,
        }
    }
}

/// Immutable snapshot of one build's metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    /// When the build started.
    pub created_at: DateTime<Utc>,
    /// Feature columns offered to the builder.
    pub features: Vec<String>,
    /// Target column name.
    pub target: String,
    /// Total nodes in the tree (splits and leaves).
    pub node_count: usize,
    /// Maximum decision depth reached.
    pub max_depth: usize,
    /// Number of leaf nodes.
    pub leaf_count: usize,
    /// Per-feature split occurrence counts.
    pub split_counts: BTreeMap<String, usize>,
    /// Normalized per-feature importance (split count / total splits).
    pub feature_importance: BTreeMap<String, f64>,
    /// Build duration in seconds, millisecond precision.
    pub build_time_secs: f64,
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::{Branch, Node};

    fn leaf(label: &str, samples: usize) -> Node {
        Node::Leaf {
            label: label.to_string(),
            samples,
        }
    }

    fn split(feature: &str, samples: usize, branches: Vec<Branch>) -> Node {
        Node::Split {
            feature: feature.to_string(),
            samples,
            branches,
        }
    }

    fn features(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn record_classifies_variants() {
        let mut metrics = TreeMetrics::new(&features(&["Weather"]), "Play");
        metrics.record(&split("Weather", 4, vec![]), 0);
        metrics.record(&leaf("Yes", 2), 1);
        metrics.record(&leaf("No", 2), 1);

        assert_eq!(metrics.node_count(), 3);
        assert_eq!(metrics.leaf_count(), 2);
        assert_eq!(metrics.max_depth(), 1);
        assert_eq!(metrics.split_counts().get("Weather"), Some(&1));
    }

    #[test]
    fn importances_sum_to_one() {
        let mut metrics = TreeMetrics::new(&features(&["A", "B"]), "Y");
        metrics.record(&split("A", 8, vec![]), 0);
        metrics.record(&split("B", 4, vec![]), 1);
        metrics.record(&split("A", 4, vec![]), 1);

        let summary = metrics.finalize();
        let total: f64 = summary.feature_importance.values().sum();
        assert!((total - 1.0).abs() < 1e-9, "importances sum to {total}");
        assert!((summary.feature_importance["A"] - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn importances_empty_for_single_leaf() {
        let mut metrics = TreeMetrics::new(&features(&["A"]), "Y");
        metrics.record(&leaf("Yes", 3), 0);

        let summary = metrics.finalize();
        assert!(summary.feature_importance.is_empty());
        assert_eq!(summary.leaf_count, 1);
        assert_eq!(summary.max_depth, 0);
    }

    #[test]
    fn reset_clears_counts_and_keeps_observers() {
        struct Counter(Rc<RefCell<usize>>);
        impl MetricsObserver for Counter {
            fn metrics_updated(&mut self, _node: &Node) {
                *self.0.borrow_mut() += 1;
            }
        }

        let count = Rc::new(RefCell::new(0));
        let mut metrics = TreeMetrics::new(&features(&["A"]), "Y");
        metrics.attach(Box::new(Counter(Rc::clone(&count))));

        metrics.record(&leaf("Yes", 1), 0);
        metrics.reset(&features(&["B"]), "Z");
        assert_eq!(metrics.node_count(), 0);
        assert!(metrics.split_counts().is_empty());

        metrics.record(&leaf("No", 1), 0);
        assert_eq!(*count.borrow(), 2, "observer must survive reset");
    }

    #[test]
    fn observers_fire_once_per_node_in_order() {
        struct Tagger {
            tag: &'static str,
            seen: Rc<RefCell<Vec<&'static str>>>,
        }
        impl MetricsObserver for Tagger {
            fn metrics_updated(&mut self, _node: &Node) {
                self.seen.borrow_mut().push(self.tag);
            }
        }

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut metrics = TreeMetrics::new(&features(&["A"]), "Y");
        metrics.attach(Box::new(Tagger {
            tag: "first",
            seen: Rc::clone(&seen),
        }));
        metrics.attach(Box::new(Tagger {
            tag: "second",
            seen: Rc::clone(&seen),
        }));

        metrics.record(&leaf("Yes", 1), 0);
        assert_eq!(*seen.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn summary_serializes_with_stable_field_set() {
        let mut metrics = TreeMetrics::new(&features(&["Weather", "Temp"]), "Play");
        metrics.record(&split("Weather", 4, vec![]), 0);
        metrics.record(&leaf("Yes", 2), 1);
        metrics.set_build_time(Duration::from_micros(1_234));

        let summary = metrics.finalize();
        assert!((summary.build_time_secs - 0.001).abs() < 1e-9);

        let json = serde_json::to_value(&summary).unwrap();
        for field in [
            "created_at",
            "features",
            "target",
            "node_count",
            "max_depth",
            "leaf_count",
            "split_counts",
            "feature_importance",
            "build_time_secs",
        ] {
            assert!(json.get(field).is_some(), "missing field {field}");
        }
        assert_eq!(json["target"], "Play");
    }
}
