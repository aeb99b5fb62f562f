//! # sheetdoc-xlsx
//!
//! XLSX (Office Open XML) reader for sheetdoc.
//!
//! Only cell contents are decoded: shared and inline strings, numbers,
//! booleans, error values and cached formula results, plus the workbook's
//! date system. Styles, comments and other sheet decorations are skipped.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
