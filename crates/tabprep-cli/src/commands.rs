use anyhow::{Context, Result};
use tabprep_model::ReadOptions;
use tabprep_transform::Dataset;
use tracing::info_span;

use tabprep_cli::pipeline::{PrepareConfig, default_output_path, prepare, write_csv};
use tabprep_cli::summary::print_summary;

use crate::cli::{InspectArgs, RunArgs};

pub fn run_prepare(args: &RunArgs) -> Result<()> {
    let _span = info_span!("run", input = %args.input.display()).entered();
    let config = PrepareConfig {
        recipe: args.recipe.clone(),
        seed: args.seed,
        drop_fields: args.drop.clone(),
    };
    let dataset = prepare(&args.input, &config)?;
    print_summary(&dataset);
    if args.dry_run {
        println!("Dry run: nothing written");
        return Ok(());
    }
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.input));
    write_csv(&dataset, &output)?;
    println!("Output: {}", output.display());
    Ok(())
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let dataset = Dataset::read(&args.input, &ReadOptions::default())
        .with_context(|| format!("load {}", args.input.display()))?;
    print_summary(&dataset);
    Ok(())
}
