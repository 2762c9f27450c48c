//! Loading observation tables from external files.
//!
//! The nonparametric bootstrap resamples rows of the table a model was
//! fitted on. When that table lives in a file, these loaders turn it into an
//! [`ObservationTable`](medboot_core::ObservationTable).
//!
//! # Supported Formats
//!
//! - **Numeric CSV**: a header row of column names followed by one row of
//!   numeric cells per observation. Blank lines and lines starting with `#`
//!   are skipped.
//!
//! # Example
//!
//! ```ignore
//! use medboot::data::load_csv;
//! use std::path::Path;
//!
//! let table = load_csv(Path::new("trial.csv"))?;
//! println!("Loaded {} observations of {:?}", table.n_rows(), table.column_names());
//! ```

mod csv;

pub use csv::{load_csv, parse_csv};

use std::fmt;

use medboot_core::ValidationError;

/// Errors that can occur during data loading.
#[derive(Debug)]
pub enum DataError {
    /// IO error reading file.
    Io(std::io::Error),

    /// CSV parse error at a specific line.
    Parse {
        /// Line number where the error occurred (1-indexed).
        line: usize,
        /// Description of the parse error.
        message: String,
    },

    /// A row with a different number of cells than the header.
    RaggedRow {
        /// Line number of the offending row (1-indexed).
        line: usize,
        /// Number of header columns.
        expected: usize,
        /// Number of cells found.
        got: usize,
    },

    /// Cell that is not a number.
    InvalidValue {
        /// Line number where the invalid value was found (1-indexed).
        line: usize,
        /// Column the value belongs to.
        column: String,
        /// The invalid value string.
        value: String,
    },

    /// The parsed data does not form a valid table.
    Table(ValidationError),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataError::Io(e) => write!(f, "IO error: {}", e),
            DataError::Parse { line, message } => {
                write!(f, "Parse error at line {}: {}", line, message)
            }
            DataError::RaggedRow {
                line,
                expected,
                got,
            } => write!(
                f,
                "Row at line {} has {} cells, header has {} columns",
                line, got, expected
            ),
            DataError::InvalidValue {
                line,
                column,
                value,
            } => write!(
                f,
                "Invalid value at line {} in column '{}': '{}'",
                line, column, value
            ),
            DataError::Table(e) => write!(f, "Invalid table: {}", e),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Io(e) => Some(e),
            DataError::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DataError {
    fn from(e: std::io::Error) -> Self {
        DataError::Io(e)
    }
}

impl From<ValidationError> for DataError {
    fn from(e: ValidationError) -> Self {
        DataError::Table(e)
    }
}
