//! Shared data model for tabprep.
//!
//! Holds the polars-free vocabulary every other crate speaks:
//!
//! - **cell**: a single table value ([`Cell`]) and its text rendering
//! - **kind**: the semantic type of a column ([`ColumnKind`])
//! - **options**: imputation policies and loader/preprocess options
//! - **recipe**: a serializable, ordered list of pipeline steps

pub mod cell;
pub mod error;
pub mod kind;
pub mod options;
pub mod recipe;

pub use cell::{Cell, format_numeric};
pub use error::{ModelError, Result};
pub use kind::ColumnKind;
pub use options::{NumericFill, PreprocessOptions, ReadOptions};
pub use recipe::{Recipe, Step};
