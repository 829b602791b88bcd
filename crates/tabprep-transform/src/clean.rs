//! Text sanitizing for categorical columns.

use std::sync::LazyLock;

use polars::prelude::*;
use regex::Regex;
use tabprep_ingest::column_cells;
use tabprep_model::Cell;

use crate::dataset::{Dataset, column_kinds, rebuild_column};
use crate::error::Result;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W").expect("valid non-word regex"));

impl Dataset {
    /// Reduces every text cell outside `except` to its word characters.
    ///
    /// Punctuation becomes a space first, then all whitespace is removed, so
    /// `"New-York City"` becomes `"NewYorkCity"`.
    pub fn clean_fields(&self, except: &[String]) -> Result<Self> {
        let Some(df) = self.require_frame("clean_fields") else {
            return Ok(self.clone());
        };
        let mut frame = df.clone();
        for (name, kind) in column_kinds(df) {
            if !kind.is_categorical() || except.contains(&name) {
                continue;
            }
            let cells: Vec<Cell> = column_cells(df.column(&name)?)
                .into_iter()
                .map(|cell| match cell {
                    Cell::Text(text) => Cell::Text(clean_token(&text)),
                    other => other,
                })
                .collect();
            frame.with_column(rebuild_column(&name, &cells, &DataType::String)?)?;
        }
        Ok(self.with_frame(frame))
    }
}

pub(crate) fn clean_token(value: &str) -> String {
    NON_WORD
        .replace_all(value, " ")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}
