//! Parsing of the supported file formats into a Polars DataFrame.

use std::collections::BTreeSet;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::*;
use serde_json::{Map, Value};
use tabprep_model::{Cell, ReadOptions};

use crate::error::{IngestError, Result};
use crate::format::FileFormat;
use crate::header::{drop_fields, normalize_and_sort, normalize_column_name, report_missing_fields};
use crate::polars_utils::{cells_to_column, cells_to_column_lenient};

/// A parsed table plus the columns whose source cells did not share a type.
///
/// A mixed column mixes text with numbers or booleans in the source file. It
/// is held as text so the frame stays typed, and listed in `mixed` so that
/// operations needing a uniform type can refuse it.
#[derive(Debug, Clone, Default)]
pub struct LoadedTable {
    pub frame: DataFrame,
    pub mixed: BTreeSet<String>,
}

impl From<DataFrame> for LoadedTable {
    fn from(frame: DataFrame) -> Self {
        Self {
            frame,
            mixed: BTreeSet::new(),
        }
    }
}

/// Loads a table: detect format, parse, drop fields, normalize and sort names.
///
/// `options.fields` is only checked and reported; `options.replace_strings`
/// is left to the caller.
///
/// # Errors
///
/// Fails on an unsupported format, an unreadable or malformed file, a drop
/// field that is not present, or two headers that normalize to one name.
pub fn read_table(path: &Path, options: &ReadOptions) -> Result<LoadedTable> {
    let format = FileFormat::detect(path)?;
    ensure_exists(path)?;
    let LoadedTable { frame, mixed } = read_raw_table(path, format)?;
    tracing::debug!(
        path = %path.display(),
        format = %format,
        rows = frame.height(),
        columns = frame.width(),
        mixed = mixed.len(),
        "parsed table"
    );
    let frame = if options.drop_fields.is_empty() {
        frame
    } else {
        drop_fields(frame, &options.drop_fields, path)?
    };
    let mixed: BTreeSet<String> = mixed
        .iter()
        .filter(|name| frame.column(name.as_str()).is_ok())
        .map(|name| normalize_column_name(name))
        .collect();
    let frame = normalize_and_sort(frame, path)?;
    report_missing_fields(&frame, options, path);
    for column in &mixed {
        tracing::warn!(path = %path.display(), column = %column, "column mixes text with other values");
    }
    Ok(LoadedTable { frame, mixed })
}

/// Parses a file in the given format without touching its column names.
pub fn read_raw_table(path: &Path, format: FileFormat) -> Result<LoadedTable> {
    match format {
        FileFormat::Csv => read_csv(path).map(LoadedTable::from),
        FileFormat::Json => read_json(path),
        FileFormat::Spreadsheet => read_spreadsheet(path),
    }
}

/// Builds a frame from per-column cells, marking columns that only fit as text.
fn assemble(columns: &[(String, Vec<Cell>)]) -> Result<LoadedTable> {
    let mut mixed = BTreeSet::new();
    let cols: Vec<Column> = columns
        .iter()
        .map(|(name, cells)| {
            cells_to_column(name, cells, &DataType::String).unwrap_or_else(|| {
                mixed.insert(name.clone());
                cells_to_column_lenient(name, cells)
            })
        })
        .collect();
    Ok(LoadedTable {
        frame: DataFrame::new(cols)?,
        mixed,
    })
}

fn ensure_exists(path: &Path) -> Result<()> {
    std::fs::metadata(path).map(|_| ()).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Reads a CSV file; the first row holds the column names.
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

/// Reads a JSON file holding either an array of row objects or an object of
/// columns.
pub fn read_json(path: &Path) -> Result<LoadedTable> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_slice(&bytes).map_err(|source| IngestError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;
    let columns = match value {
        Value::Array(rows) => json_rows_to_columns(&rows, path)?,
        Value::Object(columns) => json_columns_to_columns(&columns, path)?,
        _ => {
            return Err(IngestError::JsonShape {
                path: path.to_path_buf(),
                reason: "top level must be an array of rows or an object of columns".to_string(),
            });
        }
    };
    assemble(&columns)
}

fn json_to_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Missing,
        Value::Bool(b) => Cell::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(v) => Cell::Int(v),
            None => n.as_f64().map_or(Cell::Missing, Cell::from),
        },
        Value::String(s) => Cell::Text(s.clone()),
        nested => Cell::Text(nested.to_string()),
    }
}

/// One column per key seen in any row; rows without the key hold a missing
/// cell.
fn json_rows_to_columns(rows: &[Value], path: &Path) -> Result<Vec<(String, Vec<Cell>)>> {
    let mut columns: Vec<(String, Vec<Cell>)> = Vec::new();
    for (row_idx, row) in rows.iter().enumerate() {
        let Value::Object(fields) = row else {
            return Err(IngestError::JsonShape {
                path: path.to_path_buf(),
                reason: format!("row {row_idx} is not an object"),
            });
        };
        for (key, value) in fields {
            let pos = match columns.iter().position(|(name, _)| name == key) {
                Some(pos) => pos,
                None => {
                    columns.push((key.clone(), vec![Cell::Missing; rows.len()]));
                    columns.len() - 1
                }
            };
            columns[pos].1[row_idx] = json_to_cell(value);
        }
    }
    Ok(columns)
}

/// Each column is an array of values or an object keyed by row label.
fn json_columns_to_columns(
    columns: &Map<String, Value>,
    path: &Path,
) -> Result<Vec<(String, Vec<Cell>)>> {
    if columns.values().all(Value::is_array) {
        let mut out = Vec::with_capacity(columns.len());
        let mut height = None;
        for (name, values) in columns {
            let values = values.as_array().map(Vec::as_slice).unwrap_or_default();
            if *height.get_or_insert(values.len()) != values.len() {
                return Err(IngestError::JsonShape {
                    path: path.to_path_buf(),
                    reason: format!("column '{name}' has {} values", values.len()),
                });
            }
            out.push((name.clone(), values.iter().map(json_to_cell).collect()));
        }
        return Ok(out);
    }
    if !columns.values().all(Value::is_object) {
        return Err(IngestError::JsonShape {
            path: path.to_path_buf(),
            reason: "columns must all be arrays or all be objects".to_string(),
        });
    }
    let mut labels: Vec<&str> = Vec::new();
    for cells in columns.values().filter_map(Value::as_object) {
        for label in cells.keys() {
            if !labels.contains(&label.as_str()) {
                labels.push(label);
            }
        }
    }
    if labels.iter().all(|label| label.parse::<u64>().is_ok()) {
        labels.sort_by_key(|label| label.parse::<u64>().unwrap_or(u64::MAX));
    }
    let out = columns
        .iter()
        .map(|(name, cells)| {
            let cells = cells
                .as_object()
                .map(|cells| {
                    labels
                        .iter()
                        .map(|label| cells.get(*label).map_or(Cell::Missing, json_to_cell))
                        .collect()
                })
                .unwrap_or_default();
            (name.clone(), cells)
        })
        .collect();
    Ok(out)
}

fn spreadsheet_cell(data: &Data) -> Cell {
    match data {
        Data::Empty | Data::Error(_) => Cell::Missing,
        Data::Bool(b) => Cell::Bool(*b),
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) => Cell::number(*v),
        Data::String(s) if s.trim().is_empty() => Cell::Missing,
        Data::String(s) => Cell::Text(s.clone()),
        other => Cell::Text(other.to_string()),
    }
}

/// Reads the first worksheet of a workbook; its first row holds the names.
pub fn read_spreadsheet(path: &Path) -> Result<LoadedTable> {
    let spreadsheet_err = |message: String| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };
    let mut workbook = open_workbook_auto(path).map_err(|e| spreadsheet_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| spreadsheet_err("workbook has no worksheets".to_string()))?
        .map_err(|e| spreadsheet_err(e.to_string()))?;
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(LoadedTable::default());
    };
    let names: Vec<String> = header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let name = cell.to_string();
            if name.trim().is_empty() {
                format!("column_{}", idx + 1)
            } else {
                name
            }
        })
        .collect();
    let mut cells: Vec<Vec<Cell>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (col_idx, column) in cells.iter_mut().enumerate() {
            column.push(row.get(col_idx).map_or(Cell::Missing, spreadsheet_cell));
        }
    }
    let columns: Vec<(String, Vec<Cell>)> = names.into_iter().zip(cells).collect();
    assemble(&columns)
}
