//! Semantic column types.

use serde::{Deserialize, Serialize};

/// The semantic type of a column, as seen by the imputer and encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Integer or floating-point values.
    Numeric { integer: bool },
    /// Text values; imputed with a literal, encoded to integer codes.
    Categorical,
    Boolean,
    /// A column with no values at all.
    Empty,
    /// Lists, structs, temporal values and other types that cannot be
    /// compared as plain scalars.
    Nested,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Numeric { .. })
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Numeric { integer: false })
    }

    pub fn is_categorical(self) -> bool {
        matches!(self, Self::Categorical)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Numeric { integer: true } => "integer",
            Self::Numeric { integer: false } => "float",
            Self::Categorical => "text",
            Self::Boolean => "boolean",
            Self::Empty => "empty",
            Self::Nested => "nested",
        }
    }
}
