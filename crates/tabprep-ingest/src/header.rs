//! Column-name handling applied after parsing: drop, normalize, sort.

use std::collections::BTreeSet;
use std::path::Path;

use polars::prelude::DataFrame;
use tabprep_model::ReadOptions;

use crate::error::{IngestError, Result};

/// Lower-cases a header and removes every whitespace character.
///
/// A leading byte-order mark is discarded.
pub fn normalize_column_name(raw: &str) -> String {
    raw.trim_matches('\u{feff}')
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Removes the named columns from a freshly parsed frame.
///
/// Each name is matched against the raw header first, then against the
/// normalized form of every header.
pub fn drop_fields(df: DataFrame, fields: &[String], path: &Path) -> Result<DataFrame> {
    let mut df = df;
    for field in fields {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let wanted = normalize_column_name(field);
        let target = names
            .iter()
            .find(|name| *name == field)
            .or_else(|| {
                names
                    .iter()
                    .find(|name| normalize_column_name(name) == wanted)
            })
            .ok_or_else(|| IngestError::ColumnNotFound {
                column: field.clone(),
                path: path.to_path_buf(),
            })?;
        df = df.drop(target)?;
    }
    Ok(df)
}

/// Normalizes every column name, then orders the columns by name.
pub fn normalize_and_sort(df: DataFrame, path: &Path) -> Result<DataFrame> {
    let mut df = df;
    let normalized: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| normalize_column_name(name))
        .collect();
    let mut seen = BTreeSet::new();
    for name in &normalized {
        if !seen.insert(name.as_str()) {
            return Err(IngestError::DuplicateColumn {
                column: name.clone(),
                path: path.to_path_buf(),
            });
        }
    }
    df.set_column_names(normalized.iter().map(String::as_str))?;
    let mut sorted = normalized;
    sorted.sort();
    Ok(df.select(sorted)?)
}

/// Reports expected fields that did not survive loading.
pub fn report_missing_fields(df: &DataFrame, options: &ReadOptions, path: &Path) {
    for field in &options.fields {
        let wanted = normalize_column_name(field);
        let present = df
            .get_column_names()
            .iter()
            .any(|name| name.as_str() == wanted);
        if !present {
            tracing::warn!(
                path = %path.display(),
                field = %field,
                "expected field is not in the loaded table"
            );
        }
    }
}
