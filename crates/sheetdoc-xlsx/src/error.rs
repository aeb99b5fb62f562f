//! XLSX error types

use thiserror::Error;

/// Result type for XLSX operations
pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

/// Errors raised while decoding an XLSX package
#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a readable ZIP archive, or a part is damaged
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The package is not laid out as a spreadsheet
    #[error("Not an XLSX package: {0}")]
    InvalidFormat(String),

    /// A part every workbook needs is absent
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// A part holds a value that cannot be decoded
    #[error("Malformed content: {0}")]
    Parse(String),

    /// Decoded cells could not be placed in the workbook
    #[error("Workbook error: {0}")]
    Core(#[from] sheetdoc_core::Error),
}
