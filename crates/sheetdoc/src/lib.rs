//! # sheetdoc
//!
//! Turn spreadsheet sheets into nested, typed documents.
//!
//! A header row in each sheet declares the fields, one per column, as
//! `key[:o],type[,args]`. Every row below it becomes a [`Document`]:
//! dotted keys build nested documents, and `ref` fields pull in the matching
//! rows of another sheet.
//!
//! ## Example
//!
//! ```rust
//! use sheetdoc::{ReadOptions, SheetReader, Value, Workbook, Worksheet};
//!
//! let mut workbook = Workbook::empty();
//!
//! let mut users = Worksheet::new("user0");
//! users.set_row_values(0, ["Users"]).unwrap();
//! users.set_row_values(1, ["id,int64", "name,string", "products:o,ref,product0,user_id"]).unwrap();
//! users.set_row_values(2, ["1", "Ann", "1"]).unwrap();
//! workbook.add_existing_worksheet(users).unwrap();
//!
//! let mut products = Worksheet::new("product0");
//! products.set_row_values(0, ["Products"]).unwrap();
//! products.set_row_values(1, ["user_id,int64", "name,string"]).unwrap();
//! products.set_row_values(2, ["1", "Pen"]).unwrap();
//! workbook.add_existing_worksheet(products).unwrap();
//!
//! let documents = SheetReader::new(&workbook)
//!     .read("user0", &ReadOptions::default())
//!     .unwrap();
//!
//! assert_eq!(documents[0]["id"], Value::Integer(1));
//! let bought = documents[0]["products"].as_documents().unwrap();
//! assert_eq!(bought[0]["name"], Value::from("Pen"));
//! ```
//!
//! ## Field types
//!
//! | tag | value |
//! |---|---|
//! | `int64` | [`Value::Integer`] |
//! | `float64` | [`Value::Float`] |
//! | `string` | [`Value::String`], trimmed |
//! | `file` | [`Value::String`], or whatever the file hook returns |
//! | `time` | [`Value::Timestamp`] in the local zone, or whatever the time hook returns |
//! | `ref` | [`Value::Documents`], rows of `args[0]` selected by `args[1]` |

mod cell;
mod coerce;
mod document;
mod error;
mod field;
mod hooks;
mod materialize;
mod reader;
mod reference;
mod source;

pub use cell::Cell;
pub use coerce::local_timestamp;
pub use document::{get_path, insert_path, Document, PathConflict, Value};
pub use error::{Error, ErrorKind, Result};
pub use field::{FieldDescriptor, FieldType, ReferenceFilter, Schema};
pub use hooks::{CellHook, HookError};
pub use reader::{ReadOptions, SheetReader};
pub use source::{open_workbook, open_workbook_with};

// Re-export the workbook model and readers
pub use sheetdoc_core::{CellValue, Workbook, WorkbookSettings, Worksheet};
pub use sheetdoc_csv::{CsvError, CsvReadOptions, CsvReader};
pub use sheetdoc_xlsx::{XlsxError, XlsxReader};
