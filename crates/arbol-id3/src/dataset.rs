//! Tabular categorical dataset with full construction-time validation.

use std::collections::HashMap;

use crate::TreeError;

/// An ordered table of categorical string values.
///
/// Columns are named; rows hold exactly one value per declared column.
/// Row subsets during induction are represented as index slices into
/// this table, so partitioning never copies row data.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`TreeError::DuplicateColumn`] | Same column name declared twice |
/// | [`TreeError::EmptyDataset`] | Zero data rows |
/// | [`TreeError::RowWidthMismatch`] | Row value count differs from column count |
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Build a dataset from declared columns and data rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self, TreeError> {
        let mut index = HashMap::with_capacity(columns.len());
        for (position, column) in columns.iter().enumerate() {
            if index.insert(column.clone(), position).is_some() {
                return Err(TreeError::DuplicateColumn {
                    column: column.clone(),
                });
            }
        }

        if rows.is_empty() {
            return Err(TreeError::EmptyDataset);
        }

        for (row_index, row) in rows.iter().enumerate() {
            if row.len() != columns.len() {
                return Err(TreeError::RowWidthMismatch {
                    row_index,
                    expected: columns.len(),
                    got: row.len(),
                });
            }
        }

        Ok(Self {
            columns,
            index,
            rows,
        })
    }

    /// Return the declared column names in order.
    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Return the number of data rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Return the number of declared columns.
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Resolve a column name to its position.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingColumn`] when the name is not declared.
    pub fn column_index(&self, column: &str) -> Result<usize, TreeError> {
        self.index
            .get(column)
            .copied()
            .ok_or_else(|| TreeError::MissingColumn {
                column: column.to_string(),
            })
    }

    /// Return the value at `(row, column)`.
    ///
    /// Indices must come from [`Dataset::row_indices`] and
    /// [`Dataset::column_index`]; out-of-range indices panic.
    #[must_use]
    pub fn value(&self, row: usize, column: usize) -> &str {
        self.rows[row][column].as_str()
    }

    /// Return the index of every row, in order.
    #[must_use]
    pub fn row_indices(&self) -> Vec<usize> {
        (0..self.rows.len()).collect()
    }
}
