//! Loader and preprocessing options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Policy for filling missing values in numeric columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericFill {
    /// Arithmetic mean of the present values.
    #[default]
    Mean,
    /// One draw in `[0, 1)` shared by every missing cell of the column.
    Random,
    /// Most frequent present value; ties go to the smallest value.
    Freq,
    /// Leave missing values in place.
    None,
    /// Expectation-maximization. Declared, not implemented.
    Em,
    /// Model-based prediction. Declared, not implemented.
    Predict,
    /// Drop incomplete rows. Declared, not implemented.
    Remove,
}

impl NumericFill {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mean => "mean",
            Self::Random => "random",
            Self::Freq => "freq",
            Self::None => "none",
            Self::Em => "em",
            Self::Predict => "predict",
            Self::Remove => "remove",
        }
    }

    pub fn is_implemented(self) -> bool {
        matches!(self, Self::Mean | Self::Random | Self::Freq | Self::None)
    }
}

impl fmt::Display for NumericFill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NumericFill {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "random" => Ok(Self::Random),
            "freq" => Ok(Self::Freq),
            "none" => Ok(Self::None),
            "em" => Ok(Self::Em),
            "predict" => Ok(Self::Predict),
            "remove" => Ok(Self::Remove),
            _ => Err(ModelError::UnknownPolicy {
                name: s.to_string(),
            }),
        }
    }
}

/// Options for the missing-value imputer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessOptions {
    /// Policy for numeric columns.
    pub numeric_fill: NumericFill,

    /// Literal written into missing text cells. Empty leaves them missing.
    pub text_fill: String,

    /// Min-max scale float columns to `[0, 1]` after imputation.
    pub scale: bool,

    /// Mean-center float columns over their range after imputation.
    pub normalize: bool,

    /// Seed for the `random` policy. Entropy when unset.
    pub seed: Option<u64>,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            numeric_fill: NumericFill::Mean,
            text_fill: " ".to_string(),
            scale: false,
            normalize: false,
            seed: None,
        }
    }
}

impl PreprocessOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_numeric_fill(mut self, policy: NumericFill) -> Self {
        self.numeric_fill = policy;
        self
    }

    #[must_use]
    pub fn with_text_fill(mut self, text: impl Into<String>) -> Self {
        self.text_fill = text.into();
        self
    }

    #[must_use]
    pub fn with_scale(mut self, enable: bool) -> Self {
        self.scale = enable;
        self
    }

    #[must_use]
    pub fn with_normalize(mut self, enable: bool) -> Self {
        self.normalize = enable;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Options for loading a table from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Column names the caller expects; absent ones are reported, not enforced.
    pub fields: Vec<String>,

    /// Encode every text column as integer codes once the recipe finishes.
    /// The loader itself never encodes.
    pub replace_strings: bool,

    /// Columns removed before names are normalized.
    pub drop_fields: Vec<String>,
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    #[must_use]
    pub fn with_replace_strings(mut self, enable: bool) -> Self {
        self.replace_strings = enable;
        self
    }

    #[must_use]
    pub fn with_drop_fields(mut self, fields: Vec<String>) -> Self {
        self.drop_fields = fields;
        self
    }
}
