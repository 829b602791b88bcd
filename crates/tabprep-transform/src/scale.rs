//! Column-wise rescaling of float columns.

use polars::prelude::*;
use tabprep_ingest::column_cells;
use tabprep_model::Cell;

use crate::dataset::{Dataset, column_kinds, rebuild_column};
use crate::error::Result;

impl Dataset {
    /// Centers every float column on its mean: `(v - mean) / (max - min)`.
    pub fn normalize(&self) -> Result<Self> {
        self.rescale("normalize", |stats, v| (v - stats.mean) / stats.range())
    }

    /// Maps every float column onto `[0, 1]`: `(v - min) / (max - min)`.
    pub fn scale(&self) -> Result<Self> {
        self.rescale("scale", |stats, v| (v - stats.min) / stats.range())
    }

    fn rescale(&self, operation: &str, f: impl Fn(&Stats, f64) -> f64) -> Result<Self> {
        let Some(df) = self.require_frame(operation) else {
            return Ok(self.clone());
        };
        let mut frame = df.clone();
        for (name, kind) in column_kinds(df) {
            if !kind.is_float() {
                continue;
            }
            let column = df.column(&name)?;
            let cells = column_cells(column);
            let Some(stats) = Stats::of(&cells) else {
                continue;
            };
            let cells: Vec<Cell> = cells
                .iter()
                .map(|cell| match cell.as_f64() {
                    // A constant column has no spread; it collapses to zero.
                    Some(_) if stats.range() == 0.0 => Cell::Float(0.0),
                    Some(v) => Cell::Float(f(&stats, v)),
                    None => Cell::Missing,
                })
                .collect();
            frame.with_column(rebuild_column(&name, &cells, &DataType::Float64)?)?;
        }
        tracing::debug!(operation, "rescaled float columns");
        Ok(self.with_frame(frame))
    }
}

#[derive(Debug, Clone, Copy)]
struct Stats {
    min: f64,
    max: f64,
    mean: f64,
}

impl Stats {
    fn of(cells: &[Cell]) -> Option<Self> {
        let values: Vec<f64> = cells.iter().filter_map(Cell::as_f64).collect();
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { min, max, mean })
    }

    fn range(&self) -> f64 {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("x".into(), vec![Some(1.0f64), Some(3.0), None, Some(5.0)]),
            Column::new("n".into(), vec![1i64, 2, 3, 4]),
            Column::new("c".into(), vec![2.5f64, 2.5, 2.5, 2.5]),
        ])
        .unwrap()
    }

    fn floats(ds: &Dataset, name: &str) -> Vec<Option<f64>> {
        ds.column(name)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .collect()
    }

    #[test]
    fn scale_maps_to_unit_interval() {
        let ds = Dataset::from_frame(frame()).scale().unwrap();
        assert_eq!(floats(&ds, "x"), vec![Some(0.0), Some(0.5), None, Some(1.0)]);
        // Integer columns are left alone.
        assert_eq!(ds.column("n").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn normalize_centers_on_mean() {
        let ds = Dataset::from_frame(frame()).normalize().unwrap();
        assert_eq!(floats(&ds, "x"), vec![Some(-0.5), Some(0.0), None, Some(0.5)]);
    }

    #[test]
    fn constant_column_collapses_to_zero() {
        let ds = Dataset::from_frame(frame()).scale().unwrap();
        assert_eq!(floats(&ds, "c"), vec![Some(0.0); 4]);
    }
}
