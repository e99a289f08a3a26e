//! CSV loading for ad-hoc record tables.
//!
//! The first row is the header. An `id` column (any case) supplies record
//! ids; without one, rows are numbered `row-1`, `row-2`, ...

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::{debug, warn};

use crm_model::{DynamicRecord, FieldValue};

use crate::error::{Result, StateError};

/// Load every row of the CSV file at `path`.
pub fn load_csv(path: &Path) -> Result<Vec<DynamicRecord>> {
    let file = std::fs::File::open(path).map_err(|source| StateError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv(file, path)
}

/// Read CSV from any reader; `origin` is only used in errors.
pub fn read_csv<R: Read>(reader: R, origin: &Path) -> Result<Vec<DynamicRecord>> {
    let csv_error = |source| StateError::Csv {
        path: origin.to_path_buf(),
        source,
    };
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(str::to_string)
        .collect();
    if headers.iter().all(String::is_empty) {
        return Err(StateError::MissingHeader {
            path: origin.to_path_buf(),
        });
    }
    let id_column = headers
        .iter()
        .position(|name| name.eq_ignore_ascii_case("id"));

    let mut records = Vec::new();
    let mut seen = HashSet::new();
    for (index, row) in reader.records().enumerate() {
        let row = row.map_err(csv_error)?;
        let id = id_column
            .and_then(|column| row.get(column))
            .filter(|value| !value.is_empty())
            .map_or_else(|| format!("row-{}", index + 1), str::to_string);
        if !seen.insert(id.clone()) {
            warn!(%id, row = index + 1, "duplicate record id in CSV input");
        }
        let mut record = DynamicRecord::new(id);
        for (column, name) in headers.iter().enumerate() {
            let cell = row.get(column).unwrap_or_default();
            record.set(name.clone(), FieldValue::parse_cell(cell));
        }
        records.push(record);
    }
    debug!(origin = %origin.display(), rows = records.len(), "csv loaded");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_model::Record;

    #[test]
    fn reads_typed_cells() {
        let data = "Id,Name,Score\nA1,Acme,72\nB2,Beta,\n";
        let records = read_csv(data.as_bytes(), Path::new("inline.csv")).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].record_id(), "A1");
        assert_eq!(records[0].field("Score"), FieldValue::Number(72.0));
        assert_eq!(records[1].field("Score"), FieldValue::Missing);
    }

    #[test]
    fn numbers_rows_without_id_column() {
        let data = "name\nx\ny\n";
        let records = read_csv(data.as_bytes(), Path::new("inline.csv")).unwrap();
        assert_eq!(records[1].record_id(), "row-2");
    }

    #[test]
    fn empty_input_has_no_header() {
        let result = read_csv("".as_bytes(), Path::new("empty.csv"));
        assert!(matches!(result, Err(StateError::MissingHeader { .. })));
    }
}
