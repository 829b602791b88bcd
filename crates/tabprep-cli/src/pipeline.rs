//! Load, run and write: the stages behind `tabprep run`.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, SerWriter};
use tabprep_model::Recipe;
use tabprep_transform::{Dataset, run_recipe};

/// Inputs for one preparation run.
#[derive(Debug, Clone, Default)]
pub struct PrepareConfig {
    pub recipe: Option<PathBuf>,
    /// Seed for every random step that does not set its own.
    pub seed: Option<u64>,
    /// Extra fields to drop on load, after the recipe's own.
    pub drop_fields: Vec<String>,
}

/// Loads the recipe (or an empty one) and applies the config overrides.
pub fn build_recipe(config: &PrepareConfig) -> Result<Recipe> {
    let mut recipe = match &config.recipe {
        Some(path) => Recipe::load(path)?,
        None => Recipe::default(),
    };
    for field in &config.drop_fields {
        if !recipe.read.drop_fields.contains(field) {
            recipe.read.drop_fields.push(field.clone());
        }
    }
    if let Some(seed) = config.seed {
        recipe = recipe.with_default_seed(seed);
    }
    Ok(recipe)
}

/// Runs the configured recipe over `input`.
pub fn prepare(input: &Path, config: &PrepareConfig) -> Result<Dataset> {
    let recipe = build_recipe(config)?;
    tracing::info!(
        input = %input.display(),
        steps = recipe.steps.len(),
        "running recipe"
    );
    run_recipe(&recipe, input).with_context(|| format!("prepare {}", input.display()))
}

/// `<dir>/<stem>.prepared.csv` next to the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "output".to_string(), |stem| stem.to_string_lossy().into_owned());
    input.with_file_name(format!("{stem}.prepared.csv"))
}

/// Writes the dataset as CSV with a header row.
pub fn write_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut df = dataset.to_df();
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "wrote table"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_lands_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("data/people.csv")),
            PathBuf::from("data/people.prepared.csv")
        );
        assert_eq!(
            default_output_path(Path::new("book.xlsx")),
            PathBuf::from("book.prepared.csv")
        );
    }

    #[test]
    fn drop_overrides_are_not_duplicated() {
        let config = PrepareConfig {
            drop_fields: vec!["id".to_string(), "id".to_string()],
            ..PrepareConfig::default()
        };
        let recipe = build_recipe(&config).unwrap();
        assert_eq!(recipe.read.drop_fields, vec!["id".to_string()]);
    }
}
