//! Serializable pipeline recipes.
//!
//! A recipe is the on-disk form of a chain: how to read the input, then the
//! ordered steps to run over it.
//!
//! ```json
//! {
//!   "read": { "drop_fields": ["Id"] },
//!   "steps": [
//!     { "op": "preprocess", "numeric_fill": "freq" },
//!     { "op": "str_to_num_all", "except": ["name"] },
//!     { "op": "remove_duplicates" }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::{ModelError, Result};
use crate::options::{PreprocessOptions, ReadOptions};

/// One stage of a recipe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Step {
    Preprocess(PreprocessOptions),
    StrToNum {
        column: String,
        mapping: BTreeMap<String, f64>,
    },
    StrToNumAll {
        #[serde(default)]
        except: Vec<String>,
    },
    CleanFields {
        #[serde(default)]
        except: Vec<String>,
    },
    RemoveDuplicates,
    Sample {
        n: usize,
        #[serde(default)]
        seed: Option<u64>,
    },
    Normalize,
    Scale,
    MergeColumn {
        path: PathBuf,
    },
    AddColumn {
        title: String,
        values: Vec<Cell>,
    },
}

impl Step {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Preprocess(_) => "preprocess",
            Self::StrToNum { .. } => "str_to_num",
            Self::StrToNumAll { .. } => "str_to_num_all",
            Self::CleanFields { .. } => "clean_fields",
            Self::RemoveDuplicates => "remove_duplicates",
            Self::Sample { .. } => "sample",
            Self::Normalize => "normalize",
            Self::Scale => "scale",
            Self::MergeColumn { .. } => "merge_column",
            Self::AddColumn { .. } => "add_column",
        }
    }
}

/// A read configuration plus an ordered list of steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Recipe {
    pub read: ReadOptions,
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Load a recipe from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid recipe.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::RecipeRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ModelError::RecipeParse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    /// Gives every random step that has no seed of its own `seed`.
    #[must_use]
    pub fn with_default_seed(mut self, seed: u64) -> Self {
        for step in &mut self.steps {
            match step {
                Step::Preprocess(options) => {
                    options.seed.get_or_insert(seed);
                }
                Step::Sample { seed: step_seed, .. } => {
                    step_seed.get_or_insert(seed);
                }
                _ => {}
            }
        }
        self
    }
}
