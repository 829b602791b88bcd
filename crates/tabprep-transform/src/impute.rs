//! Missing-value imputation.
//!
//! Dispatches per column on its [`ColumnKind`]: numeric columns follow the
//! [`NumericFill`] policy, categorical columns get a literal fill.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabprep_ingest::column_cells;
use tabprep_model::{Cell, ColumnKind, NumericFill, PreprocessOptions};

use crate::dataset::{Dataset, column_kinds, rebuild_column};
use crate::error::{Result, TransformError};

impl Dataset {
    /// Fills missing values, then optionally normalizes and scales float
    /// columns.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnsupportedPolicy`] for `em`, `predict` and
    /// `remove` before any column is touched.
    pub fn preprocess(&self, options: &PreprocessOptions) -> Result<Self> {
        if !options.numeric_fill.is_implemented() {
            return Err(TransformError::UnsupportedPolicy {
                policy: options.numeric_fill.to_string(),
            });
        }
        let Some(df) = self.require_frame("preprocess") else {
            return Ok(self.clone());
        };
        let mut rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut frame = df.clone();
        for (name, kind) in column_kinds(df) {
            let fill = match kind {
                ColumnKind::Numeric { .. } => numeric_fill(
                    options.numeric_fill,
                    &column_cells(df.column(&name)?),
                    &mut rng,
                ),
                ColumnKind::Categorical if !options.text_fill.is_empty() => {
                    Some(Cell::Text(options.text_fill.clone()))
                }
                _ => None,
            };
            let Some(fill) = fill else {
                continue;
            };
            let column = df.column(&name)?;
            let mut cells = column_cells(column);
            let mut filled = 0usize;
            for cell in cells.iter_mut().filter(|cell| cell.is_missing()) {
                *cell = fill.clone();
                filled += 1;
            }
            if filled == 0 {
                continue;
            }
            tracing::debug!(column = %name, kind = kind.label(), filled, "filled missing values");
            frame.with_column(rebuild_column(&name, &cells, column.dtype())?)?;
        }
        let mut out = self.with_frame(frame);
        if options.normalize {
            out = out.normalize()?;
        }
        if options.scale {
            out = out.scale()?;
        }
        Ok(out)
    }
}

/// The replacement value for a numeric column under `policy`.
///
/// `None` when the policy leaves the column alone or there is nothing to
/// derive the value from.
fn numeric_fill(policy: NumericFill, cells: &[Cell], rng: &mut StdRng) -> Option<Cell> {
    match policy {
        NumericFill::Mean => mean(cells).map(Cell::number),
        // One draw per column, shared by all of its missing cells.
        NumericFill::Random => Some(Cell::Float(rng.gen_range(0.0..1.0))),
        NumericFill::Freq => most_frequent(cells),
        NumericFill::None | NumericFill::Em | NumericFill::Predict | NumericFill::Remove => None,
    }
}

pub(crate) fn mean(cells: &[Cell]) -> Option<f64> {
    let values: Vec<f64> = cells.iter().filter_map(Cell::as_f64).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Most frequent present value; ties go to the smallest value.
fn most_frequent(cells: &[Cell]) -> Option<Cell> {
    let mut counts: HashMap<String, (&Cell, usize)> = HashMap::new();
    for cell in cells.iter().filter(|cell| cell.is_numeric()) {
        counts.entry(cell.identity()).or_insert((cell, 0)).1 += 1;
    }
    counts
        .into_values()
        .max_by(|(a, a_count), (b, b_count)| {
            a_count.cmp(b_count).then_with(|| {
                let a = a.as_f64().unwrap_or(f64::NAN);
                let b = b.as_f64().unwrap_or(f64::NAN);
                b.total_cmp(&a)
            })
        })
        .map(|(cell, _)| cell.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_ignores_missing() {
        let cells = vec![Cell::Int(1), Cell::Missing, Cell::Int(4)];
        assert_eq!(mean(&cells), Some(2.5));
        assert_eq!(mean(&[Cell::Missing]), None);
    }

    #[test]
    fn most_frequent_breaks_ties_low() {
        let cells = vec![Cell::Int(3), Cell::Int(1), Cell::Int(3), Cell::Int(1), Cell::Missing];
        assert_eq!(most_frequent(&cells), Some(Cell::Int(1)));
        let cells = vec![Cell::Float(2.5), Cell::Float(2.5), Cell::Float(0.5)];
        assert_eq!(most_frequent(&cells), Some(Cell::Float(2.5)));
    }

    #[test]
    fn random_policy_draws_once_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        let Some(Cell::Float(v)) = numeric_fill(NumericFill::Random, &[], &mut rng) else {
            panic!("random fill must be a float");
        };
        assert!((0.0..1.0).contains(&v));
    }
}
