use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// Imputation policy name that is not part of the policy set.
    #[error("unknown missing-value policy '{name}'")]
    UnknownPolicy { name: String },

    #[error("failed to read recipe {path}: {source}")]
    RecipeRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse recipe {path}: {source}")]
    RecipeParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
