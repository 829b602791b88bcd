//! Table loading for tabprep.
//!
//! This crate turns a file into a Polars DataFrame ready for the pipeline:
//!
//! - **Format detection**: by format marker in the absolute path (csv, json, spreadsheet)
//! - **Parsing**: Polars for CSV, `serde_json` for JSON, `calamine` for workbooks
//! - **Header handling**: optional column drops, lower-cased whitespace-free names, sorted columns
//! - **Mixed columns**: source columns mixing text with other values are held as text and listed
//! - **Cell conversion**: moving column values to and from [`tabprep_model::Cell`]
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabprep_ingest::read_table;
//! use tabprep_model::ReadOptions;
//!
//! let options = ReadOptions::new().with_drop_fields(vec!["Id".to_string()]);
//! let table = read_table(Path::new("data/patients.csv"), &options)?;
//! println!("{} rows", table.frame.height());
//! ```

mod error;
mod format;
mod header;
mod reader;

pub mod polars_utils;

// === Error Types ===
pub use error::{IngestError, Result};

// === Loading ===
pub use format::FileFormat;
pub use header::normalize_column_name;
pub use reader::{
    LoadedTable, read_csv, read_json, read_raw_table, read_spreadsheet, read_table,
};

// === Cell Conversion ===
pub use polars_utils::{
    any_to_cell, cells_to_column, cells_to_column_lenient, column_cells, column_kind,
};
