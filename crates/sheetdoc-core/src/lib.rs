//! # sheetdoc-core
//!
//! The in-memory workbook that file sources fill and the sheetdoc engine
//! reads. Cells are stored sparsely and addressed either `A1`-style or by
//! zero-based `(row, col)`.
//!
//! ```rust
//! use sheetdoc_core::{CellValue, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.worksheet_mut(0).unwrap();
//! sheet.set_cell_value("A2", "id,int64").unwrap();
//! sheet.set_cell_value_at(2, 0, CellValue::Number(43.0)).unwrap();
//!
//! assert_eq!(sheet.get_value("A3").unwrap().as_number(), Some(43.0));
//! assert_eq!(sheet.cell_at(1, 0).and_then(CellValue::as_string), Some("id,int64"));
//! ```

pub mod cell;
pub mod date;
pub mod error;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellError, CellStorage, CellValue, SharedString};
pub use error::{Error, Result};
pub use workbook::{Workbook, WorkbookSettings};
pub use worksheet::Worksheet;

/// Rows per sheet in the XLSX format
pub const MAX_ROWS: u32 = 1_048_576;

/// Columns per sheet in the XLSX format
pub const MAX_COLS: u16 = 16_384;

/// Longest sheet name a workbook accepts, in characters
pub const MAX_SHEET_NAME_LEN: usize = 31;
