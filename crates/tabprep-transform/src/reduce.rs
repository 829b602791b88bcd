//! Row-set reduction: deduplication and sampling.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tabprep_ingest::column_cells;

use crate::dataset::Dataset;
use crate::error::Result;

impl Dataset {
    /// Drops rows equal to an earlier row across all columns.
    ///
    /// The first occurrence is kept and surviving rows keep their order.
    pub fn remove_duplicates(&self) -> Result<Self> {
        let Some(df) = self.require_frame("remove_duplicates") else {
            return Ok(self.clone());
        };
        let columns: Vec<Vec<String>> = df
            .get_columns()
            .iter()
            .map(|column| column_cells(column).iter().map(|cell| cell.identity()).collect())
            .collect();
        let mut seen = HashSet::new();
        let keep: Vec<bool> = (0..df.height())
            .map(|row| {
                let key: Vec<&str> = columns.iter().map(|cells| cells[row].as_str()).collect();
                seen.insert(key)
            })
            .collect();
        let dropped = keep.iter().filter(|keep| !**keep).count();
        if dropped == 0 {
            return Ok(self.clone());
        }
        tracing::debug!(dropped, "removed duplicate rows");
        self.filter_rows(&keep)
    }

    /// Draws `n` distinct rows uniformly, keeping them in table order.
    ///
    /// Returns `None` and logs an error unless `n` is below the row count.
    pub fn sample(&self, n: usize) -> Option<Self> {
        self.sample_with(n, StdRng::from_entropy())
    }

    /// [`Dataset::sample`] with a reproducible draw.
    pub fn sample_seeded(&self, n: usize, seed: u64) -> Option<Self> {
        self.sample_with(n, StdRng::seed_from_u64(seed))
    }

    fn sample_with(&self, n: usize, mut rng: StdRng) -> Option<Self> {
        let rows = self.require_frame("sample")?.height();
        if n >= rows {
            tracing::error!(requested = n, rows, "sample size must be smaller than the row count");
            return None;
        }
        let mut keep = vec![false; rows];
        for row in rand::seq::index::sample(&mut rng, rows, n) {
            keep[row] = true;
        }
        match self.filter_rows(&keep) {
            Ok(sampled) => Some(sampled),
            Err(err) => {
                tracing::error!(error = %err, "failed to sample rows");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use polars::prelude::*;

    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("a".into(), vec![Some(1i64), Some(1), None, None, Some(2)]),
            Column::new("b".into(), vec!["x", "x", "y", "y", "x"]),
        ])
        .unwrap()
    }

    #[test]
    fn duplicates_keep_first_occurrence() {
        let ds = Dataset::from_frame(frame()).remove_duplicates().unwrap();
        assert_eq!(ds.height(), 3);
        assert_eq!(ds.row_index(), &[0, 2, 4]);
    }

    #[test]
    fn sample_rejects_full_table() {
        let ds = Dataset::from_frame(frame());
        assert!(ds.sample(5).is_none());
        assert!(ds.sample(9).is_none());
        assert!(Dataset::empty().sample(0).is_none());
    }

    #[test]
    fn seeded_sample_is_reproducible() {
        let ds = Dataset::from_frame(frame());
        let first = ds.sample_seeded(3, 11).unwrap();
        let second = ds.sample_seeded(3, 11).unwrap();
        assert_eq!(first.row_index(), second.row_index());
        assert!(first.row_index().windows(2).all(|w| w[0] < w[1]));
    }
}
