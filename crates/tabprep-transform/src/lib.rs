//! Chainable table preparation.
//!
//! A [`Dataset`] is loaded once and then passed through a chain of
//! operations, each of which returns a new handle:
//!
//! - **Editing**: [`Dataset::apply_column_event`], [`Dataset::add_column`],
//!   [`Dataset::add_row_event`], [`Dataset::merge_column`]
//! - **Imputation**: [`Dataset::preprocess`]
//! - **Encoding**: [`Dataset::str_to_num`], [`Dataset::str_to_num_all`]
//! - **Rescaling**: [`Dataset::normalize`], [`Dataset::scale`]
//! - **Row reduction**: [`Dataset::remove_duplicates`], [`Dataset::sample`]
//! - **Sanitizing**: [`Dataset::clean_fields`]
//!
//! Operations that find no table or an absent column log a warning and pass
//! the table through. Everything else that cannot proceed returns a
//! [`TransformError`].
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tabprep_model::{PreprocessOptions, ReadOptions};
//! use tabprep_transform::Dataset;
//!
//! let prepared = Dataset::read(Path::new("data/patients.csv"), &ReadOptions::default())?
//!     .preprocess(&PreprocessOptions::default())?
//!     .str_to_num_all(&[])?
//!     .remove_duplicates()?;
//! let matrix = prepared.to_matrix();
//! ```

mod clean;
mod dataset;
mod editor;
mod encode;
mod error;
mod impute;
mod recipe;
mod reduce;
mod scale;

pub use dataset::Dataset;
pub use error::{Result, TransformError};
pub use recipe::{apply_step, run_recipe};
