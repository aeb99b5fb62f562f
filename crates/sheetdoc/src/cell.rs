//! Read-only view of one worksheet cell

use chrono::{NaiveDate, NaiveDateTime};
use sheetdoc_core::{date::serial_to_datetime, CellValue, Worksheet};

static BLANK: CellValue = CellValue::Empty;

/// Text layouts accepted for `time` cells that hold text instead of a serial
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// A cell being read, with its position and the workbook's date system.
///
/// Handed to [`CellHook`](crate::CellHook)s.
#[derive(Debug, Clone, Copy)]
pub struct Cell<'a> {
    sheet: &'a str,
    row: u32,
    col: u16,
    value: &'a CellValue,
    date_1904: bool,
}

impl<'a> Cell<'a> {
    pub(crate) fn new(worksheet: &'a Worksheet, row: u32, col: u16, date_1904: bool) -> Self {
        Self {
            sheet: worksheet.name(),
            row,
            col,
            value: worksheet.cell_at(row, col).unwrap_or(&BLANK),
            date_1904,
        }
    }

    /// Name of the sheet holding the cell
    pub fn sheet(&self) -> &'a str {
        self.sheet
    }

    /// Zero-based row
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column
    pub fn col(&self) -> u16 {
        self.col
    }

    /// The stored value (formulas resolve to their cached result)
    pub fn value(&self) -> &'a CellValue {
        self.value.effective_value()
    }

    /// Displayed text with surrounding whitespace removed
    pub fn text(&self) -> String {
        self.value.to_string().trim().to_string()
    }

    /// Whether the trimmed text is empty
    pub fn is_blank(&self) -> bool {
        match self.value() {
            CellValue::Empty => true,
            CellValue::String(s) => s.as_str().trim().is_empty(),
            _ => false,
        }
    }

    /// Read as a whole number.
    ///
    /// Numbers must be integral and in range; text must parse as an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self.value() {
            CellValue::Number(n) => {
                if n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64 {
                    Some(*n as i64)
                } else {
                    None
                }
            }
            CellValue::String(s) => s.as_str().trim().parse().ok(),
            _ => None,
        }
    }

    /// Read as a floating point number
    pub fn as_f64(&self) -> Option<f64> {
        match self.value() {
            CellValue::Number(n) => Some(*n),
            CellValue::String(s) => s.as_str().trim().parse().ok(),
            _ => None,
        }
    }

    /// Decode a date-time: a serial number in the workbook's date system, or
    /// text in `YYYY-mm-dd[ HH:MM[:SS]]` form.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self.value() {
            CellValue::Number(n) => serial_to_datetime(*n, self.date_1904),
            CellValue::String(s) => parse_datetime(s.as_str().trim()),
            _ => None,
        }
    }
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
