//! Categorical (ID3) decision tree induction.
//!
//! Builds decision trees over tabular string-valued data using Shannon
//! entropy and information-gain splitting, with per-build metrics
//! collection, observer notification, and an injectable build-log trace.

mod builder;
mod config;
mod dataset;
mod error;
mod gain;
mod metrics;
mod node;
mod trace;

pub use builder::{BuildResult, TreeBuilder};
pub use config::TreeConfig;
pub use dataset::Dataset;
pub use error::TreeError;
pub use gain::{best_split, entropy, information_gain, FeatureGain, SplitChoice};
pub use metrics::{MetricsObserver, MetricsSummary, TreeMetrics};
pub use node::{Branch, Node};
pub use trace::{BuildLog, NoTrace, TraceSink};
