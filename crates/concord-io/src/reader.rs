//! CSV and JSON table parsing.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::IoError;
use crate::coerce::{cell_to_f64, value_to_f64};
use crate::domain::{Column, Table};

/// Supported upload formats, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// An array of records or an object of columns.
    Json,
}

impl TableFormat {
    /// Format implied by the extension of `file_name` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`IoError::UnsupportedFileType`] for anything but `.csv` and `.json`.
    pub fn from_file_name(file_name: &str) -> Result<Self, IoError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(IoError::UnsupportedFileType { extension }),
        }
    }
}

/// Parse an uploaded file into a [`Table`], dispatching on its extension.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`IoError::UnsupportedFileType`] | Extension is not `.csv` or `.json` |
/// | [`IoError::CsvParse`] | Malformed CSV record |
/// | [`IoError::JsonParse`] | Invalid JSON |
/// | [`IoError::Malformed`] | Valid syntax that does not describe a table |
#[instrument(skip(bytes), fields(bytes = bytes.len()))]
pub fn parse_table(file_name: &str, bytes: &[u8]) -> Result<Table, IoError> {
    let table = match TableFormat::from_file_name(file_name)? {
        TableFormat::Csv => parse_csv(file_name, bytes)?,
        TableFormat::Json => parse_json(file_name, bytes)?,
    };
    debug!(rows = table.n_rows(), columns = table.columns().len(), "parsed table");
    Ok(table)
}

/// Read and parse the file at `path`. Returns the file name with the table.
///
/// # Errors
///
/// [`IoError::FileNotFound`] if the file cannot be read, otherwise as
/// [`parse_table`].
pub fn read_table(path: &Path) -> Result<(String, Table), IoError> {
    let bytes = std::fs::read(path).map_err(|source| IoError::FileNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let table = parse_table(&file_name, &bytes)?;
    Ok((file_name, table))
}

/// Parse CSV with a header row. Rows are labelled `"0"`, `"1"`, ...
///
/// Short rows are padded with NaN. Empty header names become `Unnamed: <i>`
/// and repeated names get a `.1`, `.2`, ... suffix.
///
/// # Errors
///
/// [`IoError::CsvParse`] on malformed records; [`IoError::Malformed`] for a
/// missing header or a row with more fields than the header.
pub fn parse_csv(file: &str, bytes: &[u8]) -> Result<Table, IoError> {
    // flexible(true) so short rows can be padded and long rows get our own error.
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let header = rdr.headers().map_err(|e| csv_error(file, e))?.clone();
    if header.is_empty() {
        return Err(IoError::malformed(file, "no columns to parse"));
    }
    let names = unique_names(header.iter());
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];

    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| csv_error(file, e))?;
        if record.len() > names.len() {
            return Err(IoError::malformed(
                file,
                format!("row {row} has {} fields, header has {}", record.len(), names.len()),
            ));
        }
        for (j, column) in values.iter_mut().enumerate() {
            column.push(record.get(j).map_or(f64::NAN, cell_to_f64));
        }
    }

    let n_rows = values.first().map_or(0, Vec::len);
    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, v)| Column::new(name, v))
        .collect();
    Ok(Table::new(positional_index(n_rows), columns))
}

/// Parse a JSON table.
///
/// Accepted shapes:
///
/// - records: `[{"a": 1, "b": 2}, {"a": 3}]`, rows labelled by position;
/// - columns of arrays: `{"a": [1, 3], "b": [2, 4]}`, rows labelled by position;
/// - columns of labelled values: `{"a": {"x": 1, "y": 3}}`, rows labelled by key.
///
/// Missing cells are NaN. Columns and labels keep first-seen order.
///
/// # Errors
///
/// [`IoError::JsonParse`] on invalid JSON; [`IoError::Malformed`] for any
/// other shape, or column arrays of different lengths.
pub fn parse_json(file: &str, bytes: &[u8]) -> Result<Table, IoError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|source| IoError::JsonParse {
        file: file.to_string(),
        source,
    })?;
    match value {
        Value::Array(records) => from_records(file, &records),
        Value::Object(columns) => from_columns(file, &columns),
        _ => Err(IoError::malformed(
            file,
            "expected an array of records or an object of columns",
        )),
    }
}

fn from_records(file: &str, records: &[Value]) -> Result<Table, IoError> {
    let mut names: Vec<String> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();
    for (row, record) in records.iter().enumerate() {
        let Value::Object(fields) = record else {
            return Err(IoError::malformed(file, format!("record {row} is not an object")));
        };
        for key in fields.keys() {
            if !position.contains_key(key.as_str()) {
                position.insert(key, names.len());
                names.push(key.clone());
            }
        }
    }

    let mut values = vec![vec![f64::NAN; records.len()]; names.len()];
    for (row, record) in records.iter().enumerate() {
        if let Value::Object(fields) = record {
            for (key, v) in fields {
                values[position[key.as_str()]][row] = value_to_f64(v);
            }
        }
    }

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, v)| Column::new(name, v))
        .collect();
    Ok(Table::new(positional_index(records.len()), columns))
}

fn from_columns(file: &str, columns: &Map<String, Value>) -> Result<Table, IoError> {
    if columns.values().all(Value::is_array) {
        let mut n_rows = None;
        let mut out = Vec::with_capacity(columns.len());
        for (name, column) in columns {
            let items = column.as_array().map_or(&[][..], Vec::as_slice);
            match n_rows {
                Some(n) if n != items.len() => {
                    return Err(IoError::malformed(
                        file,
                        "all column arrays must be of the same length",
                    ));
                }
                _ => n_rows = Some(items.len()),
            }
            out.push(Column::new(name.clone(), items.iter().map(value_to_f64).collect()));
        }
        return Ok(Table::new(positional_index(n_rows.unwrap_or(0)), out));
    }

    if !columns.values().all(Value::is_object) {
        return Err(IoError::malformed(
            file,
            "columns must all be arrays or all be objects of labelled values",
        ));
    }

    let mut index: Vec<String> = Vec::new();
    let mut row_of: HashMap<&str, usize> = HashMap::new();
    for cells in columns.values().filter_map(Value::as_object) {
        for label in cells.keys() {
            if !row_of.contains_key(label.as_str()) {
                row_of.insert(label, index.len());
                index.push(label.clone());
            }
        }
    }

    let out = columns
        .iter()
        .map(|(name, cells)| {
            let mut values = vec![f64::NAN; index.len()];
            for (label, v) in cells.as_object().into_iter().flatten() {
                values[row_of[label.as_str()]] = value_to_f64(v);
            }
            Column::new(name.clone(), values)
        })
        .collect();
    Ok(Table::new(index, out))
}

fn positional_index(n_rows: usize) -> Vec<String> {
    (0..n_rows).map(|i| i.to_string()).collect()
}

fn unique_names<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (i, name) in raw.enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {i}")
        } else {
            name.to_string()
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{base}.{suffix}");
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

fn csv_error(file: &str, e: csv::Error) -> IoError {
    IoError::CsvParse {
        file: file.to_string(),
        offset: e.position().map_or(0, |p| p.byte()),
        source: e,
    }
}
