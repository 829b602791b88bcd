//! Conversions between polars columns and [`Cell`] values.
//!
//! Edits read a column as cells, transform them, and rebuild a column. The
//! strict rebuild keeps a column homogeneous; the lenient rebuild is what the
//! loaders use for sources that carry per-cell types (JSON, workbooks).

use polars::prelude::*;
use tabprep_model::{Cell, ColumnKind};

/// Classifies a polars dtype into the column kinds the pipeline dispatches on.
pub fn column_kind(dtype: &DataType) -> ColumnKind {
    match dtype {
        DataType::Int8
        | DataType::Int16
        | DataType::Int32
        | DataType::Int64
        | DataType::UInt8
        | DataType::UInt16
        | DataType::UInt32
        | DataType::UInt64 => ColumnKind::Numeric { integer: true },
        DataType::Float32 | DataType::Float64 => ColumnKind::Numeric { integer: false },
        DataType::String => ColumnKind::Categorical,
        DataType::Boolean => ColumnKind::Boolean,
        DataType::Null => ColumnKind::Empty,
        _ => ColumnKind::Nested,
    }
}

/// Converts a Polars AnyValue to a [`Cell`]. NaN and Null become `Missing`.
pub fn any_to_cell(value: AnyValue<'_>) -> Cell {
    match value {
        AnyValue::Null => Cell::Missing,
        AnyValue::Boolean(b) => Cell::Bool(b),
        AnyValue::Int8(v) => Cell::Int(i64::from(v)),
        AnyValue::Int16(v) => Cell::Int(i64::from(v)),
        AnyValue::Int32(v) => Cell::Int(i64::from(v)),
        AnyValue::Int64(v) => Cell::Int(v),
        AnyValue::UInt8(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt16(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt32(v) => Cell::Int(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).map_or(Cell::Float(v as f64), Cell::Int),
        AnyValue::Float32(v) => Cell::from(f64::from(v)),
        AnyValue::Float64(v) => Cell::from(v),
        AnyValue::String(s) => Cell::Text(s.to_string()),
        AnyValue::StringOwned(s) => Cell::Text(s.to_string()),
        other => Cell::Text(other.to_string()),
    }
}

/// Reads every value of a column as a cell, in row order.
pub fn column_cells(column: &Column) -> Vec<Cell> {
    (0..column.len())
        .map(|idx| any_to_cell(column.get(idx).unwrap_or(AnyValue::Null)))
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
struct CellMix {
    bools: bool,
    ints: bool,
    floats: bool,
    texts: bool,
}

impl CellMix {
    fn of(cells: &[Cell]) -> Self {
        let mut mix = Self::default();
        for cell in cells {
            match cell {
                Cell::Missing => {}
                Cell::Bool(_) => mix.bools = true,
                Cell::Int(_) => mix.ints = true,
                Cell::Float(_) => mix.floats = true,
                Cell::Text(_) => mix.texts = true,
            }
        }
        mix
    }

    fn numeric(self) -> bool {
        self.ints || self.floats
    }

    fn is_homogeneous(self) -> bool {
        let scalar = self.bools || self.numeric();
        !(self.texts && scalar) && !(self.bools && self.numeric())
    }
}

/// Builds a homogeneous column from cells.
///
/// Ints and floats together widen to Float64. Returns `None` when the cells
/// mix text with scalars or booleans with numbers. An all-missing column
/// takes `fallback` as its dtype.
pub fn cells_to_column(name: &str, cells: &[Cell], fallback: &DataType) -> Option<Column> {
    let mix = CellMix::of(cells);
    if !mix.is_homogeneous() {
        return None;
    }
    let column = if mix.texts {
        let values: Vec<Option<&str>> = cells.iter().map(Cell::as_text).collect();
        Column::new(name.into(), values)
    } else if mix.floats {
        let values: Vec<Option<f64>> = cells.iter().map(Cell::as_f64).collect();
        Column::new(name.into(), values)
    } else if mix.ints {
        let values: Vec<Option<i64>> = cells
            .iter()
            .map(|cell| match cell {
                Cell::Int(v) => Some(*v),
                _ => None,
            })
            .collect();
        Column::new(name.into(), values)
    } else if mix.bools {
        let values: Vec<Option<bool>> = cells
            .iter()
            .map(|cell| match cell {
                Cell::Bool(v) => Some(*v),
                _ => None,
            })
            .collect();
        Column::new(name.into(), values)
    } else {
        Column::full_null(name.into(), cells.len(), fallback)
    };
    Some(column)
}

/// Builds a column from cells, rendering a heterogeneous mix as text.
pub fn cells_to_column_lenient(name: &str, cells: &[Cell]) -> Column {
    if let Some(column) = cells_to_column(name, cells, &DataType::String) {
        return column;
    }
    let values: Vec<Option<String>> = cells
        .iter()
        .map(|cell| (!cell.is_missing()).then(|| cell.to_string()))
        .collect();
    Column::new(name.into(), values)
}
