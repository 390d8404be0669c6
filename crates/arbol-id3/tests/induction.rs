//! End-to-end induction tests for arbol-id3.
//!
//! These tests exercise the public API the way the service does: build a
//! tree from raw rows, then check the tree shape and the finalized metrics
//! against hand-computed expectations.

use arbol_id3::{
    BuildLog, Dataset, Node, TreeBuilder, TreeConfig, TreeError, TreeMetrics,
};

fn weather_dataset() -> Dataset {
    let columns = vec!["Weather".to_string(), "Temp".to_string(), "Play".to_string()];
    let rows = vec![
        vec!["Sunny".to_string(), "Hot".to_string(), "No".to_string()],
        vec!["Sunny".to_string(), "Mild".to_string(), "No".to_string()],
        vec!["Overcast".to_string(), "Hot".to_string(), "Yes".to_string()],
        vec!["Rain".to_string(), "Mild".to_string(), "Yes".to_string()],
    ];
    Dataset::new(columns, rows).unwrap()
}

fn weather_features() -> Vec<String> {
    vec!["Weather".to_string(), "Temp".to_string()]
}

#[test]
fn weather_scenario_full_shape() {
    // Weather gives pure per-value subsets (gain 1.0); Temp gives nothing
    // (gain 0.0). The root must split on Weather into three pure leaves.
    let data = weather_dataset();
    let builder = TreeBuilder::new(TreeConfig::new()).unwrap();
    let result = builder.build(&data, &weather_features(), "Play").unwrap();

    let root = result.root();
    match root {
        Node::Split {
            feature,
            samples,
            branches,
        } => {
            assert_eq!(feature, "Weather");
            assert_eq!(*samples, 4);
            assert_eq!(branches.len(), 3);

            let expected = [("Overcast", "Yes", 1), ("Rain", "Yes", 1), ("Sunny", "No", 2)];
            for (branch, (value, label, samples)) in branches.iter().zip(expected) {
                assert_eq!(branch.value, value);
                assert_eq!(
                    branch.child,
                    Node::Leaf {
                        label: label.to_string(),
                        samples,
                    }
                );
            }
        }
        Node::Leaf { .. } => panic!("expected a split root"),
    }

    let summary = result.metrics().finalize();
    assert_eq!(summary.node_count, 4);
    assert_eq!(summary.leaf_count, 3);
    assert_eq!(summary.max_depth, 1);
    assert_eq!(summary.split_counts.get("Weather"), Some(&1));
    assert_eq!(summary.split_counts.get("Temp"), None);
    assert!((summary.feature_importance["Weather"] - 1.0).abs() < 1e-9);
}

#[test]
fn single_target_value_yields_single_leaf() {
    let columns = vec!["A".to_string(), "Y".to_string()];
    let rows = vec![
        vec!["p".to_string(), "same".to_string()],
        vec!["q".to_string(), "same".to_string()],
        vec!["r".to_string(), "same".to_string()],
        vec!["p".to_string(), "same".to_string()],
    ];
    let data = Dataset::new(columns, rows).unwrap();

    let builder = TreeBuilder::new(TreeConfig::new()).unwrap();
    let result = builder
        .build(&data, &["A".to_string()], "Y")
        .unwrap();

    assert_eq!(
        *result.root(),
        Node::Leaf {
            label: "same".to_string(),
            samples: 4,
        }
    );
    let summary = result.metrics().finalize();
    assert_eq!(summary.node_count, 1);
    assert_eq!(summary.leaf_count, 1);
    assert!(summary.feature_importance.is_empty());
}

#[test]
fn max_depth_one_terminates_impure_branches() {
    // XOR-shaped data: no single feature separates it, so every depth-1
    // branch is impure and must become a majority-vote leaf.
    let columns = vec!["A".to_string(), "B".to_string(), "Y".to_string()];
    let rows = vec![
        vec!["0".to_string(), "0".to_string(), "no".to_string()],
        vec!["0".to_string(), "1".to_string(), "yes".to_string()],
        vec!["1".to_string(), "0".to_string(), "yes".to_string()],
        vec!["1".to_string(), "1".to_string(), "no".to_string()],
    ];
    let data = Dataset::new(columns, rows).unwrap();

    let builder = TreeBuilder::new(TreeConfig::new().with_max_depth(Some(1))).unwrap();
    let result = builder
        .build(&data, &["A".to_string(), "B".to_string()], "Y")
        .unwrap();

    match result.root() {
        Node::Split { branches, .. } => {
            assert_eq!(branches.len(), 2);
            for branch in branches {
                // Tied majority resolves to the lexicographically smaller label.
                assert_eq!(
                    branch.child,
                    Node::Leaf {
                        label: "no".to_string(),
                        samples: 2,
                    }
                );
            }
        }
        Node::Leaf { .. } => panic!("expected a split root"),
    }
    assert_eq!(result.metrics().finalize().max_depth, 1);
}

#[test]
fn missing_target_column_fails_with_no_tree() {
    let data = weather_dataset();
    let builder = TreeBuilder::new(TreeConfig::new()).unwrap();
    let err = builder
        .build(&data, &weather_features(), "Humidity")
        .unwrap_err();
    assert!(matches!(err, TreeError::MissingColumn { column } if column == "Humidity"));
}

#[test]
fn build_log_variant_records_trace() {
    let data = weather_dataset();
    let builder = TreeBuilder::new(TreeConfig::new()).unwrap();
    let mut metrics = TreeMetrics::new(&weather_features(), "Play");
    let mut log = BuildLog::new();

    builder
        .build_with(&data, &weather_features(), "Play", &mut metrics, &mut log)
        .unwrap();

    let lines = log.lines();
    assert!(lines.len() >= 7, "expected header plus split trace, got {lines:?}");
    assert!(lines[2].contains("Weather") && lines[2].contains("Temp"));
    // One gain line per candidate, indented one level deeper than the search line.
    assert!(lines.iter().any(|l| l.starts_with("  - Gain(Weather)")));
    assert!(lines.iter().any(|l| l.starts_with("  - Gain(Temp)")));
}

#[test]
fn repeated_builds_use_fresh_metrics() {
    let data = weather_dataset();
    let builder = TreeBuilder::new(TreeConfig::new()).unwrap();

    let first = builder.build(&data, &weather_features(), "Play").unwrap();
    let second = builder.build(&data, &weather_features(), "Play").unwrap();

    assert_eq!(first.metrics().node_count(), second.metrics().node_count());
    assert_eq!(second.metrics().node_count(), 4);
}
