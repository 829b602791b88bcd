//! CLI argument definitions for tabprep.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabprep",
    version,
    about = "Prepare tabular data for analysis",
    long_about = "Load a CSV, JSON or spreadsheet table and run a preparation recipe over it.\n\n\
                  Recipes fill missing values, encode text columns, rescale, deduplicate\n\
                  and sample rows, then the result is written as CSV."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a recipe over a table and write the result.
    Run(RunArgs),

    /// Print the column summary of a table.
    Inspect(InspectArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Table to prepare (.csv, .json, .xlsx, .xls, .ods).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// JSON recipe with read options and steps (default: load only).
    #[arg(long = "recipe", value_name = "PATH")]
    pub recipe: Option<PathBuf>,

    /// Output CSV path (default: <INPUT stem>.prepared.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Report without writing the output file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Seed for random steps that do not set one.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,

    /// Field to drop on load (repeatable).
    #[arg(long = "drop", value_name = "FIELD")]
    pub drop: Vec<String>,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Table to inspect.
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
