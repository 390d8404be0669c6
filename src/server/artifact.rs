//! Per-build metrics artifacts.

use std::fs;
use std::path::{Path, PathBuf};

use arbol_id3::MetricsSummary;

/// Write a metrics summary as pretty JSON under `dir`.
///
/// The file is named from the summary's creation timestamp, e.g.
/// `metrics_20260807_101530123.json`. The directory is created when
/// missing.
///
/// # Errors
///
/// Returns the underlying I/O error when the directory or file cannot
/// be written.
pub fn write_metrics(dir: &Path, summary: &MetricsSummary) -> Result<PathBuf, std::io::Error> {
    fs::create_dir_all(dir)?;

    let name = format!(
        "metrics_{}.json",
        summary.created_at.format("%Y%m%d_%H%M%S%3f")
    );
    let path = dir.join(name);

    let json = serde_json::to_string_pretty(summary).expect("serialization cannot fail");
    fs::write(&path, json)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use arbol_id3::{TreeBuilder, TreeConfig, Dataset};
    use tempfile::TempDir;

    use super::*;

    fn sample_summary() -> MetricsSummary {
        let data = Dataset::new(
            vec!["A".to_string(), "Y".to_string()],
            vec![
                vec!["x".to_string(), "0".to_string()],
                vec!["y".to_string(), "1".to_string()],
            ],
        )
        .unwrap();
        let builder = TreeBuilder::new(TreeConfig::new()).unwrap();
        let result = builder.build(&data, &["A".to_string()], "Y").unwrap();
        result.metrics().finalize()
    }

    #[test]
    fn writes_parseable_json_with_expected_fields() {
        let dir = TempDir::new().unwrap();
        let summary = sample_summary();

        let path = write_metrics(dir.path(), &summary).unwrap();
        assert!(path.exists());
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("metrics_"));

        let content: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(content["target"], "Y");
        assert_eq!(content["node_count"], 3);
        assert!(content["feature_importance"].is_object());
        assert!(content["build_time_secs"].is_number());
    }

    #[test]
    fn creates_nested_output_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("deep").join("er");
        let summary = sample_summary();

        let path = write_metrics(&nested, &summary).unwrap();
        assert!(path.exists());
    }
}
