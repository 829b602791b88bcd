//! Input format detection.
//!
//! The format is chosen by searching the absolute path for a format marker,
//! not by inspecting the suffix: `/data/x.csv.d/table.txt` reads as CSV.

use std::fmt;
use std::path::Path;

use crate::error::{IngestError, Result};

/// Markers that identify a workbook, checked after CSV and JSON.
const SPREADSHEET_MARKERS: &[&str] = &[".xlsx", ".xlsm", ".xlsb", ".xls", ".ods"];

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
    Spreadsheet,
}

impl FileFormat {
    /// Resolve the format of `path`; first matching marker wins.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::UnsupportedFormat`] when no marker occurs in the path.
    pub fn detect(path: &Path) -> Result<Self> {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let text = absolute.to_string_lossy();
        if text.contains(".csv") {
            Ok(Self::Csv)
        } else if text.contains(".json") {
            Ok(Self::Json)
        } else if SPREADSHEET_MARKERS.iter().any(|marker| text.contains(marker)) {
            Ok(Self::Spreadsheet)
        } else {
            Err(IngestError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Spreadsheet => "spreadsheet",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
