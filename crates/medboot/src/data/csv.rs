//! CSV parsing for observation tables.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use medboot_core::ObservationTable;

use super::DataError;

/// Load an observation table from a CSV file.
///
/// # Example file content
/// ```csv
/// x,m,y
/// 0,0.12,1.30
/// 1,0.95,2.02
/// # comment lines are skipped
/// 1,0.71,1.88
/// ```
///
/// # Errors
/// Returns `DataError` if the file cannot be read, a row is ragged, a cell is
/// not a number, or the result would be an empty table.
pub fn load_csv(path: &Path) -> Result<ObservationTable, DataError> {
    let file = File::open(path)?;
    let table = parse_csv(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        rows = table.n_rows(),
        columns = table.n_columns(),
        "loaded observation table"
    );
    Ok(table)
}

/// Parse an observation table from any buffered reader.
///
/// The first non-blank, non-comment line is the header.
pub fn parse_csv<R: BufRead>(reader: R) -> Result<ObservationTable, DataError> {
    let mut header: Option<Vec<String>> = None;
    let mut columns: Vec<Vec<f64>> = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let cells: Vec<&str> = line.split(',').map(str::trim).collect();

        if header.is_none() {
            if let Some(pos) = cells.iter().position(|c| c.is_empty()) {
                return Err(DataError::Parse {
                    line: line_num + 1,
                    message: format!("header column {} has no name", pos + 1),
                });
            }
            columns = vec![Vec::new(); cells.len()];
            header = Some(cells.iter().map(|c| c.to_string()).collect());
            continue;
        }
        let names = header.as_deref().unwrap_or_default();

        if cells.len() != names.len() {
            return Err(DataError::RaggedRow {
                line: line_num + 1,
                expected: names.len(),
                got: cells.len(),
            });
        }

        for ((cell, column), name) in cells.iter().zip(columns.iter_mut()).zip(names) {
            let value: f64 = cell.parse().map_err(|_| DataError::InvalidValue {
                line: line_num + 1,
                column: name.clone(),
                value: cell.to_string(),
            })?;
            column.push(value);
        }
    }

    let names = header.ok_or_else(|| DataError::Parse {
        line: 0,
        message: "no header row found".to_string(),
    })?;
    Ok(ObservationTable::from_columns(
        names.into_iter().zip(columns).collect(),
    )?)
}
