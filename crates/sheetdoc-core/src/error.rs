//! Error types for sheetdoc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while addressing or filling a workbook
#[derive(Debug, Error)]
pub enum Error {
    /// Text that is not an `A1`-style reference
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Row past the last row a sheet can hold
    #[error("Row {0} is past the last row ({1})")]
    RowOutOfBounds(u32, u32),

    /// Column past the last column a sheet can hold
    #[error("Column {0} is past the last column ({1})")]
    ColumnOutOfBounds(u16, u16),

    /// A sheet name a spreadsheet application would reject
    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// A second sheet with the same name, ignoring case
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),
}
