//! Runs a [`Recipe`] as one chain over a loaded table.

use std::path::Path;

use tabprep_model::{Recipe, Step};

use crate::dataset::Dataset;
use crate::error::{Result, TransformError};

/// Loads `input` with the recipe's read options and applies every step in
/// order.
///
/// When `read.replace_strings` is set, every text column is encoded as the
/// last stage.
///
/// # Errors
///
/// Returns the first hard failure of the load or of any step.
pub fn run_recipe(recipe: &Recipe, input: &Path) -> Result<Dataset> {
    let mut dataset = Dataset::read(input, &recipe.read)?;
    for (position, step) in recipe.steps.iter().enumerate() {
        let _span = tracing::info_span!("step", position, op = step.name()).entered();
        dataset = apply_step(&dataset, step)?;
        tracing::debug!(
            rows = dataset.height(),
            columns = dataset.width(),
            "step finished"
        );
    }
    if recipe.read.replace_strings {
        dataset = dataset.str_to_num_all(&[])?;
    }
    Ok(dataset)
}

/// Applies one recipe step to `dataset`.
///
/// # Errors
///
/// Returns the step's hard failure. A `sample` step that cannot draw yields
/// [`TransformError::SampleTooLarge`].
pub fn apply_step(dataset: &Dataset, step: &Step) -> Result<Dataset> {
    match step {
        Step::Preprocess(options) => dataset.preprocess(options),
        Step::StrToNum { column, mapping } => dataset.str_to_num(column, mapping),
        Step::StrToNumAll { except } => dataset.str_to_num_all(except),
        Step::CleanFields { except } => dataset.clean_fields(except),
        Step::RemoveDuplicates => dataset.remove_duplicates(),
        Step::Sample { n, seed } => {
            let sampled = match seed {
                Some(seed) => dataset.sample_seeded(*n, *seed),
                None => dataset.sample(*n),
            };
            sampled.ok_or(TransformError::SampleTooLarge {
                requested: *n,
                rows: dataset.height(),
            })
        }
        Step::Normalize => dataset.normalize(),
        Step::Scale => dataset.scale(),
        Step::MergeColumn { path } => dataset.merge_column(None, Some(path)),
        Step::AddColumn { title, values } => dataset.add_column(title, values.iter().cloned()),
    }
}
