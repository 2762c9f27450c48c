//! Observation tables for the nonparametric bootstrap.
//!
//! A table is a set of named numeric columns held in an
//! `n_obs × n_columns` matrix, so a bootstrap replicate is a row selection.

use nalgebra::{DMatrix, DVectorView};

use crate::error::ValidationError;

/// Named numeric columns, one row per observation.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationTable {
    columns: Vec<String>,
    data: DMatrix<f64>,
}

impl ObservationTable {
    /// Create a table from column names and an `n_obs × n_columns` matrix.
    pub fn new(columns: Vec<String>, data: DMatrix<f64>) -> Result<Self, ValidationError> {
        if data.nrows() == 0 || data.ncols() == 0 {
            return Err(ValidationError::EmptyTable);
        }
        if columns.len() != data.ncols() {
            return Err(ValidationError::ColumnNamesMismatch {
                names: columns.len(),
                columns: data.ncols(),
            });
        }
        for (i, name) in columns.iter().enumerate() {
            if columns[..i].contains(name) {
                return Err(ValidationError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self { columns, data })
    }

    /// Create a table from `(name, values)` pairs. All columns must have the
    /// same length.
    pub fn from_columns<S: Into<String>>(
        columns: Vec<(S, Vec<f64>)>,
    ) -> Result<Self, ValidationError> {
        let n_rows = columns.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut names = Vec::with_capacity(columns.len());
        let mut flat = Vec::with_capacity(n_rows * columns.len());

        for (name, values) in columns {
            let name = name.into();
            if values.len() != n_rows {
                return Err(ValidationError::ColumnLength {
                    column: name,
                    expected: n_rows,
                    got: values.len(),
                });
            }
            flat.extend_from_slice(&values);
            names.push(name);
        }

        // nalgebra is column-major, which matches the column-by-column layout.
        let data = DMatrix::from_vec(n_rows, names.len(), flat);
        Self::new(names, data)
    }

    /// Number of observations.
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.data.ncols()
    }

    /// Column names in order.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Borrow a column by name.
    pub fn column(&self, name: &str) -> Option<DVectorView<'_, f64>> {
        let j = self.columns.iter().position(|c| c == name)?;
        Some(self.data.column(j))
    }

    /// The underlying `n_obs × n_columns` matrix.
    pub fn data(&self) -> &DMatrix<f64> {
        &self.data
    }

    /// Build a new table from the given row indices (repeats allowed).
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds; bootstrap index draws are always
    /// in range.
    pub fn resample_rows(&self, indices: &[usize]) -> ObservationTable {
        ObservationTable {
            columns: self.columns.clone(),
            data: self.data.select_rows(indices),
        }
    }
}
