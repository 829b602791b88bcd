//! The dataset handle every chain operation consumes and returns.
//!
//! A [`Dataset`] wraps an optional Polars DataFrame plus its row index.
//! Operations borrow the handle and return a new one, so the prior handle is
//! never changed underneath its holder. Column buffers are reference counted
//! by Polars, which keeps the copies cheap.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::*;
use tabprep_ingest::{cells_to_column, column_cells, column_kind, read_table};
use tabprep_model::{Cell, ColumnKind, ReadOptions};

use crate::error::{Result, TransformError};

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    frame: Option<DataFrame>,
    /// Original row labels; survives deduplication and sampling.
    index: Vec<usize>,
    /// Columns loaded from cells of more than one type, held as text.
    mixed: BTreeSet<String>,
}

impl Dataset {
    /// A handle with no table loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps a DataFrame with a fresh `0..height` row index.
    pub fn from_frame(frame: DataFrame) -> Self {
        let index = (0..frame.height()).collect();
        Self {
            frame: Some(frame),
            index,
            mixed: BTreeSet::new(),
        }
    }

    /// Loads a table from disk.
    ///
    /// # Errors
    ///
    /// Returns an error for unsupported formats, unreadable files, absent drop
    /// fields and name collisions after normalization.
    pub fn read(path: &Path, options: &ReadOptions) -> Result<Self> {
        let table = read_table(path, options)?;
        tracing::info!(
            path = %path.display(),
            rows = table.frame.height(),
            columns = table.frame.width(),
            "loaded table"
        );
        Ok(Self::from_frame(table.frame).with_mixed(table.mixed))
    }

    pub fn is_loaded(&self) -> bool {
        self.frame.is_some()
    }

    pub fn frame(&self) -> Option<&DataFrame> {
        self.frame.as_ref()
    }

    pub fn height(&self) -> usize {
        self.frame.as_ref().map_or(0, DataFrame::height)
    }

    pub fn width(&self) -> usize {
        self.frame.as_ref().map_or(0, DataFrame::width)
    }

    pub fn row_index(&self) -> &[usize] {
        &self.index
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .as_ref()
            .map(|df| {
                df.get_column_names()
                    .iter()
                    .map(|name| name.to_string())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.frame.as_ref()?.column(name).ok()
    }

    pub fn column_kind(&self, name: &str) -> Option<ColumnKind> {
        self.column(name).map(|column| column_kind(column.dtype()))
    }

    /// Whether `name` was loaded from values of more than one type.
    ///
    /// Such a column reads as text, but cannot be ordinal-encoded.
    pub fn is_mixed(&self, name: &str) -> bool {
        self.mixed.contains(name)
    }

    /// The table itself; an empty DataFrame when nothing is loaded.
    pub fn to_df(&self) -> DataFrame {
        self.frame.clone().unwrap_or_else(DataFrame::empty)
    }

    /// Row-major matrix of cells.
    pub fn to_matrix(&self) -> Vec<Vec<Cell>> {
        let Some(df) = &self.frame else {
            return Vec::new();
        };
        let columns: Vec<Vec<Cell>> = df.get_columns().iter().map(column_cells).collect();
        (0..df.height())
            .map(|row| {
                columns
                    .iter()
                    .map(|cells| cells.get(row).cloned().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    /// The table with its columns ordered by name. Does not change the handle.
    pub fn only_maximum(&self) -> DataFrame {
        let Some(df) = &self.frame else {
            return DataFrame::empty();
        };
        let mut names = self.column_names();
        names.sort();
        df.select(names).unwrap_or_else(|_| df.clone())
    }

    /// Reports whether `name` is exactly one column of the loaded table.
    ///
    /// Never fails: absence is logged and the caller passes the table through.
    pub(crate) fn check_column(&self, name: &str) -> bool {
        let Some(df) = &self.frame else {
            tracing::warn!("data is not loaded");
            return false;
        };
        let matches = df
            .get_column_names()
            .iter()
            .filter(|column| column.as_str() == name)
            .count();
        if matches != 1 {
            tracing::warn!(column = %name, "column is not in data");
            return false;
        }
        true
    }

    /// Logs and reports a missing table for operations that need one.
    pub(crate) fn require_frame(&self, operation: &str) -> Option<&DataFrame> {
        if self.frame.is_none() {
            tracing::warn!(operation, "data is not loaded");
        }
        self.frame.as_ref()
    }

    /// A handle over `frame` that keeps this handle's row index and the
    /// mixed marks of columns still present.
    pub(crate) fn with_frame(&self, frame: DataFrame) -> Self {
        let mixed = self
            .mixed
            .iter()
            .filter(|name| frame.column(name.as_str()).is_ok())
            .cloned()
            .collect();
        Self {
            frame: Some(frame),
            index: self.index.clone(),
            mixed,
        }
    }

    /// Adds mixed marks, e.g. for columns merged from a loaded file.
    pub(crate) fn with_mixed(mut self, names: impl IntoIterator<Item = String>) -> Self {
        self.mixed.extend(names);
        self
    }

    /// Clears the mixed mark of a column whose values were rewritten as one type.
    pub(crate) fn settle_column(mut self, name: &str) -> Self {
        self.mixed.remove(name);
        self
    }

    /// A handle over the rows of this one selected by `keep`.
    pub(crate) fn filter_rows(&self, keep: &[bool]) -> Result<Self> {
        let Some(df) = &self.frame else {
            return Ok(self.clone());
        };
        let mask = BooleanChunked::from_slice("keep".into(), keep);
        let frame = df.filter(&mask)?;
        let index = self
            .index
            .iter()
            .zip(keep)
            .filter_map(|(label, keep)| keep.then_some(*label))
            .collect();
        Ok(Self {
            frame: Some(frame),
            index,
            mixed: self.mixed.clone(),
        })
    }
}

/// Rebuilds a column from edited cells, keeping it homogeneous.
pub(crate) fn rebuild_column(name: &str, cells: &[Cell], fallback: &DataType) -> Result<Column> {
    cells_to_column(name, cells, fallback).ok_or_else(|| TransformError::MixedTypes {
        column: name.to_string(),
    })
}

/// Names and kinds of every column, in table order.
pub(crate) fn column_kinds(df: &DataFrame) -> Vec<(String, ColumnKind)> {
    df.get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column_kind(column.dtype())))
        .collect()
}

impl From<DataFrame> for Dataset {
    fn from(frame: DataFrame) -> Self {
        Self::from_frame(frame)
    }
}
