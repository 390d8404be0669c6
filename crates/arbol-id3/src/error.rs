/// Errors from dataset validation, configuration, and tree induction.
#[derive(Debug, thiserror::Error)]
pub enum TreeError {
    /// Returned when a referenced column is not declared by the dataset.
    #[error("column \"{column}\" not found in dataset")]
    MissingColumn {
        /// The column name that was requested.
        column: String,
    },

    /// Returned when a row's value count differs from the declared columns.
    #[error("row {row_index} has {got} values, expected {expected}")]
    RowWidthMismatch {
        /// Zero-based index of the offending row.
        row_index: usize,
        /// Number of declared columns.
        expected: usize,
        /// Number of values in the offending row.
        got: usize,
    },

    /// Returned when the same column name is declared twice.
    #[error("duplicate column \"{column}\" in dataset")]
    DuplicateColumn {
        /// The duplicated column name.
        column: String,
    },

    /// Returned when the dataset has zero rows.
    #[error("dataset has zero rows")]
    EmptyDataset,

    /// Returned when max_depth is zero.
    #[error("max_depth must be at least 1, got {max_depth}")]
    InvalidMaxDepth {
        /// The invalid max_depth value provided.
        max_depth: usize,
    },

    /// Returned when min_samples_split is less than 2.
    #[error("min_samples_split must be at least 2, got {min_samples_split}")]
    InvalidMinSamplesSplit {
        /// The invalid min_samples_split value provided.
        min_samples_split: usize,
    },

    /// Returned when min_information_gain is outside [0.0, 1.0].
    #[error("min_information_gain must be in [0.0, 1.0], got {min_information_gain}")]
    InvalidMinInformationGain {
        /// The invalid min_information_gain value provided.
        min_information_gain: f64,
    },
}
