//! Error types for the sheet reader

use std::path::PathBuf;

use thiserror::Error;

use crate::hooks::HookError;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed header cell, duplicate key, unknown type, bad reference arguments
    Schema,
    /// A sheet named by the caller or by a reference field does not exist
    SheetNotFound,
    /// A data cell could not become a value, or the value could not be placed
    Value,
    /// A reference field could not be compared against its target sheet
    Reference,
    /// A caller-supplied hook failed
    Hook,
    /// Sheets reference each other in a loop
    Cycle,
    /// The workbook could not be opened or decoded
    Source,
}

/// Errors that can occur while reading sheets into documents.
///
/// Rows and columns are zero-based.
#[derive(Debug, Error)]
pub enum Error {
    /// A header cell is not a valid field specification
    #[error("field '{text}' is invalid on {sheet},{row},{col}: {reason}")]
    Schema {
        sheet: String,
        row: u32,
        col: u16,
        text: String,
        reason: String,
    },

    /// Two header cells declare the same key
    #[error(
        "field '{text}' on {sheet},{row},{col} duplicates key '{key}' of the field on {sheet},{first_row},{first_col}"
    )]
    DuplicateKey {
        sheet: String,
        key: String,
        text: String,
        row: u32,
        col: u16,
        first_row: u32,
        first_col: u16,
    },

    /// Sheet not found by name
    #[error("Sheet not found: {0}")]
    SheetNotFound(String),

    /// A required field has no content
    #[error("field '{key}' is required but empty on {sheet},{row},{col}")]
    EmptyValue {
        sheet: String,
        key: String,
        row: u32,
        col: u16,
    },

    /// A cell cannot be read as the field's type
    #[error("field '{key}' expects {expected} on {sheet},{row},{col}, found '{text}'")]
    InvalidValue {
        sheet: String,
        key: String,
        row: u32,
        col: u16,
        expected: &'static str,
        text: String,
    },

    /// A dotted key walks through a value that is not a document
    #[error("field '{key}' on {sheet},{row} cannot be nested under '{prefix}', which is not a document")]
    PathConflict {
        sheet: String,
        key: String,
        row: u32,
        prefix: String,
    },

    /// A reference field could not be matched against its target sheet
    #[error("field '{key}' on {sheet},{row},{col} cannot reference sheet '{target}': {reason}")]
    Reference {
        sheet: String,
        key: String,
        row: u32,
        col: u16,
        target: String,
        reason: String,
    },

    /// A time or file hook returned an error
    #[error("hook for field '{key}' failed on {sheet},{row},{col}: {source}")]
    Hook {
        sheet: String,
        key: String,
        row: u32,
        col: u16,
        #[source]
        source: HookError,
    },

    /// A sheet is reached again while its own references are being loaded
    #[error("cyclic sheet reference: {}", .chain.join(" -> "))]
    CyclicReference { chain: Vec<String> },

    /// Workbook model error
    #[error("Workbook error: {0}")]
    Workbook(#[from] sheetdoc_core::Error),

    /// XLSX decoding error
    #[error("XLSX error: {0}")]
    Xlsx(#[from] sheetdoc_xlsx::XlsxError),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] sheetdoc_csv::CsvError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A path that is neither a known workbook format nor a directory
    #[error("Unsupported source: {}", .0.display())]
    UnsupportedSource(PathBuf),
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Schema { .. } | Error::DuplicateKey { .. } => ErrorKind::Schema,
            Error::SheetNotFound(_) => ErrorKind::SheetNotFound,
            Error::EmptyValue { .. } | Error::InvalidValue { .. } | Error::PathConflict { .. } => {
                ErrorKind::Value
            }
            Error::Reference { .. } => ErrorKind::Reference,
            Error::Hook { .. } => ErrorKind::Hook,
            Error::CyclicReference { .. } => ErrorKind::Cycle,
            Error::Workbook(_)
            | Error::Xlsx(_)
            | Error::Csv(_)
            | Error::Io(_)
            | Error::UnsupportedSource(_) => ErrorKind::Source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_messages_carry_coordinates() {
        let err = Error::DuplicateKey {
            sheet: "user0".into(),
            key: "id".into(),
            text: "id:o,string".into(),
            row: 1,
            col: 3,
            first_row: 1,
            first_col: 0,
        };
        assert_eq!(
            err.to_string(),
            "field 'id:o,string' on user0,1,3 duplicates key 'id' of the field on user0,1,0"
        );
        assert_eq!(err.kind(), ErrorKind::Schema);

        let err = Error::CyclicReference {
            chain: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(err.to_string(), "cyclic sheet reference: a -> b -> a");
        assert_eq!(err.kind(), ErrorKind::Cycle);
    }

    #[test]
    fn test_hook_error_keeps_source() {
        let err = Error::Hook {
            sheet: "s".into(),
            key: "at".into(),
            row: 2,
            col: 1,
            source: "bad clock".into(),
        };
        assert_eq!(err.kind(), ErrorKind::Hook);
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("bad clock"));
    }
}
