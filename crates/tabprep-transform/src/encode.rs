//! Categorical encoding: explicit mappings and derived ordinal codes.

use std::collections::{BTreeMap, BTreeSet};

use polars::prelude::*;
use tabprep_ingest::{cells_to_column_lenient, column_cells, column_kind};
use tabprep_model::{Cell, ColumnKind};

use crate::dataset::{Dataset, column_kinds, rebuild_column};
use crate::error::{Result, TransformError};

impl Dataset {
    /// Replaces text values of `column` found in `mapping` with numbers.
    ///
    /// Unmapped values stay as they are. The column becomes numeric only when
    /// every present value was mapped; otherwise mapped values are kept as
    /// their text rendering.
    pub fn str_to_num(&self, column: &str, mapping: &BTreeMap<String, f64>) -> Result<Self> {
        if !self.check_column(column) {
            return Ok(self.clone());
        }
        let Some(df) = self.frame() else {
            return Ok(self.clone());
        };
        let source = df.column(column)?;
        let mut replaced = 0usize;
        let cells: Vec<Cell> = column_cells(source)
            .into_iter()
            .map(|cell| {
                let mapped = cell.as_text().and_then(|text| mapping.get(text)).copied();
                match mapped {
                    Some(value) => {
                        replaced += 1;
                        Cell::number(value)
                    }
                    None => cell,
                }
            })
            .collect();
        if replaced == 0 {
            return Ok(self.clone());
        }
        let rebuilt = cells_to_column_lenient(column, &cells);
        let numeric = column_kind(rebuilt.dtype()).is_numeric();
        let mut frame = df.clone();
        frame.with_column(rebuilt)?;
        tracing::debug!(column, replaced, numeric, "mapped text values to numbers");
        let out = self.with_frame(frame);
        Ok(if numeric { out.settle_column(column) } else { out })
    }

    /// Encodes every text column not listed in `except` as ordinal codes.
    ///
    /// Distinct values are sorted and numbered from 1, so the smallest value
    /// gets 1 and the largest gets the number of distinct values. Missing
    /// cells stay missing.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::MixedTypes`] for a column whose values cannot
    /// be ordered as plain scalars: one loaded from text mixed with numbers or
    /// booleans, or a nested column. No column is encoded in that case.
    pub fn str_to_num_all(&self, except: &[String]) -> Result<Self> {
        let Some(df) = self.require_frame("str_to_num_all") else {
            return Ok(self.clone());
        };
        let targets: Vec<(String, ColumnKind)> = column_kinds(df)
            .into_iter()
            .filter(|(name, _)| !except.contains(name))
            .filter(|(_, kind)| kind.is_categorical() || *kind == ColumnKind::Nested)
            .collect();
        let unordered = targets
            .iter()
            .find(|(name, kind)| *kind == ColumnKind::Nested || self.is_mixed(name));
        if let Some((name, _)) = unordered {
            return Err(TransformError::MixedTypes {
                column: name.clone(),
            });
        }

        let mut frame = df.clone();
        for (name, _) in targets {
            let cells = column_cells(df.column(&name)?);
            let codes = ordinal_codes(&cells);
            let encoded: Vec<Cell> = cells
                .iter()
                .map(|cell| match cell.as_text() {
                    Some(text) => codes.get(text).map_or(Cell::Missing, |code| Cell::Int(*code)),
                    None => Cell::Missing,
                })
                .collect();
            tracing::debug!(column = %name, distinct = codes.len(), "encoded text column");
            frame.with_column(rebuild_column(&name, &encoded, &DataType::Int64)?)?;
        }
        Ok(self.with_frame(frame))
    }
}

/// Distinct text values in byte order, numbered from 1.
pub(crate) fn ordinal_codes(cells: &[Cell]) -> BTreeMap<String, i64> {
    let distinct: BTreeSet<&str> = cells.iter().filter_map(Cell::as_text).collect();
    distinct
        .into_iter()
        .zip(1..)
        .map(|(value, code)| (value.to_string(), code))
        .collect()
}
