//! Single table values.
//!
//! A [`Cell`] is what user-supplied column and row events see and return.
//! Conversions to and from polars columns live in `tabprep-ingest`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One value of a table.
///
/// `Missing` is the missing-marker: a null, an empty CSV field, or a NaN.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Missing,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Cell {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Numeric value of the cell; text and booleans are not coerced.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Builds a numeric cell, keeping integral values as `Int`.
    pub fn number(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else if value.fract() == 0.0 && value.abs() < 9.0e15 {
            Self::Int(value as i64)
        } else {
            Self::Float(value)
        }
    }

    /// Type-tagged rendering used to compare whole rows.
    ///
    /// `Missing` equals `Missing`; `Int(1)` and `Text("1")` differ.
    pub fn identity(&self) -> String {
        match self {
            Self::Missing => "n:".to_string(),
            Self::Bool(v) => format!("b:{v}"),
            Self::Int(v) => format!("i:{v}"),
            Self::Float(v) => format!("f:{:016x}", v.to_bits()),
            Self::Text(s) => format!("s:{s}"),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => f.write_str(&format_numeric(*v)),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Self::Missing
        } else {
            Self::Float(value)
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

/// Formats a floating-point number as a string without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keeps_integral_values_as_int() {
        assert_eq!(Cell::number(3.0), Cell::Int(3));
        assert_eq!(Cell::number(2.5), Cell::Float(2.5));
        assert_eq!(Cell::number(f64::NAN), Cell::Missing);
    }

    #[test]
    fn identity_distinguishes_types() {
        assert_ne!(Cell::Int(1).identity(), Cell::Text("1".into()).identity());
        assert_eq!(Cell::Missing.identity(), Cell::Missing.identity());
    }

    #[test]
    fn display_renders_numbers_compactly() {
        assert_eq!(Cell::Float(1.50).to_string(), "1.5");
        assert_eq!(Cell::Float(100.0).to_string(), "100");
        assert_eq!(Cell::Missing.to_string(), "");
        assert_eq!(format_numeric(10.0), "10");
    }

    #[test]
    fn option_conversion_maps_none_to_missing() {
        assert_eq!(Cell::from(None::<i64>), Cell::Missing);
        assert_eq!(Cell::from(Some("x")), Cell::Text("x".into()));
    }
}
