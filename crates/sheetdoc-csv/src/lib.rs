//! # sheetdoc-csv
//!
//! CSV reader for sheetdoc. Each CSV file becomes one worksheet; a set of
//! files becomes a workbook whose sheet names are the file stems.

mod error;
mod options;
mod reader;

pub use error::{CsvError, CsvResult};
pub use options::CsvReadOptions;
pub use reader::CsvReader;
