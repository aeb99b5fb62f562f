//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors raised while reading CSV files into sheets
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed record or encoding problem
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A file path whose stem cannot name a sheet
    #[error("Cannot derive a sheet name from '{0}'")]
    SheetName(String),

    /// Records could not be placed in the workbook
    #[error("Workbook error: {0}")]
    Core(#[from] sheetdoc_core::Error),
}
