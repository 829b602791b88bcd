//! Column and row edits: map a column, add a column, update a row, merge
//! columns from another table.

use std::path::Path;

use polars::prelude::*;
use tabprep_ingest::{LoadedTable, column_cells, read_table};
use tabprep_model::{Cell, ReadOptions};

use crate::dataset::{Dataset, rebuild_column};
use crate::error::{Result, TransformError};

impl Dataset {
    /// Replaces every cell of `name` with `func(cell)`, in row order.
    ///
    /// Passes the table through when nothing is loaded or the column is absent.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MixedTypes`] if `func` yields values that
    /// cannot share one column type.
    pub fn apply_column_event<F>(&self, name: &str, mut func: F) -> Result<Self>
    where
        F: FnMut(Cell) -> Cell,
    {
        if !self.check_column(name) {
            return Ok(self.clone());
        }
        let Some(df) = self.frame() else {
            return Ok(self.clone());
        };
        let column = df.column(name)?;
        let cells: Vec<Cell> = column_cells(column).into_iter().map(&mut func).collect();
        let rebuilt = rebuild_column(name, &cells, column.dtype())?;
        let mut frame = df.clone();
        frame.with_column(rebuilt)?;
        Ok(self.with_frame(frame).settle_column(name))
    }

    /// Appends a column named `title`.
    ///
    /// # Errors
    ///
    /// Fails when the number of values differs from the row count, when
    /// `title` is already a column, or when the values mix types.
    pub fn add_column<I, C>(&self, title: &str, values: I) -> Result<Self>
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        let Some(df) = self.require_frame("add_column") else {
            return Ok(self.clone());
        };
        let cells: Vec<Cell> = values.into_iter().map(Into::into).collect();
        if cells.len() != df.height() {
            return Err(TransformError::LengthMismatch {
                column: title.to_string(),
                expected: df.height(),
                actual: cells.len(),
            });
        }
        if df.column(title).is_ok() {
            return Err(TransformError::DuplicateColumn {
                column: title.to_string(),
            });
        }
        let column = rebuild_column(title, &cells, &DataType::Null)?;
        let mut frame = df.clone();
        frame.with_column(column)?;
        Ok(self.with_frame(frame))
    }

    /// Updates row `index` with `func(current)`: one cell when `col` is set,
    /// every cell of the row otherwise.
    ///
    /// `index` is a row position. An absent `col` passes the table through.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::InvalidRowIndex`] for a negative index,
    /// [`TransformError::RowOutOfBounds`] past the last row, and
    /// [`TransformError::MixedTypes`] when an updated cell no longer fits its
    /// column.
    pub fn add_row_event<F>(&self, index: i64, mut func: F, col: Option<&str>) -> Result<Self>
    where
        F: FnMut(Cell) -> Cell,
    {
        let Ok(position) = usize::try_from(index) else {
            tracing::error!(index, "row index must be a non-negative integer");
            return Err(TransformError::InvalidRowIndex { index });
        };
        let Some(df) = self.require_frame("add_row_event") else {
            return Ok(self.clone());
        };
        if position >= df.height() {
            return Err(TransformError::RowOutOfBounds {
                index: position,
                rows: df.height(),
            });
        }
        let targets = match col {
            Some(name) if !self.check_column(name) => return Ok(self.clone()),
            Some(name) => vec![name.to_string()],
            None => self.column_names(),
        };
        let mut rebuilt = Vec::with_capacity(targets.len());
        for name in &targets {
            let column = df.column(name)?;
            let mut cells = column_cells(column);
            let current = std::mem::take(&mut cells[position]);
            cells[position] = func(current);
            rebuilt.push(rebuild_column(name, &cells, column.dtype())?);
        }
        let mut frame = df.clone();
        for column in rebuilt {
            frame.with_column(column)?;
        }
        Ok(self.with_frame(frame))
    }

    /// Appends the columns of another table, matched row by row.
    ///
    /// Exactly one source is used: `data` as given, or the table at `path`
    /// read with default options.
    ///
    /// # Errors
    ///
    /// Fails when both or neither source is given, when the source cannot be
    /// loaded, when row counts differ, or when a merged name already exists.
    pub fn merge_column(&self, data: Option<&DataFrame>, path: Option<&Path>) -> Result<Self> {
        let LoadedTable {
            frame: other,
            mixed,
        } = match (data, path) {
            (None, None) => return Err(TransformError::MissingMergeSource),
            (Some(_), Some(_)) => return Err(TransformError::AmbiguousMergeSource),
            (Some(df), None) => LoadedTable::from(df.clone()),
            (None, Some(path)) => read_table(path, &ReadOptions::default())?,
        };
        let Some(df) = self.require_frame("merge_column") else {
            return Ok(self.clone());
        };
        if other.height() != df.height() {
            let column = other
                .get_column_names()
                .first()
                .map(|name| name.to_string())
                .unwrap_or_default();
            return Err(TransformError::LengthMismatch {
                column,
                expected: df.height(),
                actual: other.height(),
            });
        }
        for name in other.get_column_names() {
            if df.column(name.as_str()).is_ok() {
                return Err(TransformError::DuplicateColumn {
                    column: name.to_string(),
                });
            }
        }
        let frame = df.hstack(other.get_columns())?;
        tracing::info!(
            merged = other.width(),
            columns = frame.width(),
            "merged columns"
        );
        Ok(self.with_frame(frame).with_mixed(mixed))
    }
}
