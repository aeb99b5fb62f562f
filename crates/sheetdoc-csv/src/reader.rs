//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use sheetdoc_core::{CellValue, Workbook, Worksheet};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a worksheet named after the file stem
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| CsvError::SheetName(path.display().to_string()))?;
        let file = File::open(path)?;
        Self::read(file, name, options)
    }

    /// Read several CSV files into one workbook, one sheet per file, in the given order
    pub fn read_workbook<I, P>(paths: I, options: &CsvReadOptions) -> CsvResult<Workbook>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut workbook = Workbook::empty();
        for path in paths {
            let worksheet = Self::read_file(path.as_ref(), options)?;
            log::debug!(
                "read csv sheet '{}' from {} ({} cells)",
                worksheet.name(),
                path.as_ref().display(),
                worksheet.cells().cell_count()
            );
            workbook.add_existing_worksheet(worksheet)?;
        }
        Ok(workbook)
    }

    /// Read CSV from a reader into a worksheet.
    ///
    /// Every record is stored, the first one included: header rows are data
    /// to the caller.
    pub fn read<R: Read>(reader: R, name: &str, options: &CsvReadOptions) -> CsvResult<Worksheet> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut worksheet = Worksheet::new(name);

        for (row_idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = u32::try_from(row_idx).map_err(|_| {
                sheetdoc_core::Error::RowOutOfBounds(u32::MAX, sheetdoc_core::MAX_ROWS - 1)
            })?;

            for (col, field) in record.iter().enumerate() {
                let value = if options.auto_detect_types {
                    Self::detect_type(field)
                } else if field.is_empty() {
                    CellValue::Empty
                } else {
                    CellValue::string(field)
                };

                let col = u16::try_from(col).map_err(|_| {
                    sheetdoc_core::Error::ColumnOutOfBounds(u16::MAX, sheetdoc_core::MAX_COLS - 1)
                })?;
                worksheet.set_cell_value_at(row, col, value)?;
            }
        }

        Ok(worksheet)
    }

    /// Detect whether a field holds a number.
    ///
    /// Text that only looks numeric to a float parser ("inf", "NaN") and
    /// zero-padded codes ("007") stay text.
    fn detect_type(field: &str) -> CellValue {
        let trimmed = field.trim();

        if trimmed.is_empty() {
            return CellValue::Empty;
        }

        let digits = trimmed.trim_start_matches(['-', '+']);
        let looks_numeric = digits
            .chars()
            .next()
            .map_or(false, |c| c.is_ascii_digit() || c == '.');
        let zero_padded = digits.len() > 1
            && digits.starts_with('0')
            && digits.as_bytes()[1].is_ascii_digit();

        if looks_numeric && !zero_padded {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return CellValue::Number(n);
                }
            }
        }

        CellValue::string(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const USERS: &str = "ID,Name\n\"id,int64\",\"name,string\"\n1, Alice \n2,Bob\n";

    #[test]
    fn test_read_keeps_every_row() {
        let sheet = CsvReader::read(USERS.as_bytes(), "user0", &CsvReadOptions::default()).unwrap();

        assert_eq!(sheet.name(), "user0");
        assert_eq!(sheet.get_value("A2").unwrap().as_string(), Some("id,int64"));
        assert_eq!(sheet.get_value("A3").unwrap(), CellValue::Number(1.0));
        assert_eq!(sheet.get_value("B3").unwrap().as_string(), Some(" Alice "));
        assert_eq!(sheet.dimensions(), Some((3, 1)));
    }

    #[test]
    fn test_detect_type() {
        assert_eq!(CsvReader::detect_type("42"), CellValue::Number(42.0));
        assert_eq!(CsvReader::detect_type("-1.5"), CellValue::Number(-1.5));
        assert_eq!(CsvReader::detect_type(".5"), CellValue::Number(0.5));
        assert_eq!(CsvReader::detect_type("0"), CellValue::Number(0.0));
        assert_eq!(CsvReader::detect_type("0.25"), CellValue::Number(0.25));
        assert_eq!(CsvReader::detect_type("007"), CellValue::string("007"));
        assert_eq!(CsvReader::detect_type("inf"), CellValue::string("inf"));
        assert_eq!(CsvReader::detect_type("NaN"), CellValue::string("NaN"));
        assert_eq!(CsvReader::detect_type("   "), CellValue::Empty);
        assert_eq!(CsvReader::detect_type("abc"), CellValue::string("abc"));
    }

    #[test]
    fn test_without_detection_everything_is_text() {
        let options = CsvReadOptions {
            auto_detect_types: false,
            ..Default::default()
        };
        let sheet = CsvReader::read("1,,x".as_bytes(), "raw", &options).unwrap();

        assert_eq!(sheet.get_value("A1").unwrap().as_string(), Some("1"));
        assert!(sheet.get_value("B1").unwrap().is_empty());
        assert_eq!(sheet.get_value("C1").unwrap().as_string(), Some("x"));
    }

    #[test]
    fn test_read_workbook_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let users = dir.path().join("user0.csv");
        let products = dir.path().join("product0.csv");
        File::create(&users)
            .unwrap()
            .write_all(USERS.as_bytes())
            .unwrap();
        File::create(&products)
            .unwrap()
            .write_all(b"User\n\"user_id,int64\"\n1\n")
            .unwrap();

        let workbook =
            CsvReader::read_workbook([&users, &products], &CsvReadOptions::default()).unwrap();

        assert_eq!(workbook.sheet_names(), vec!["user0", "product0"]);
        let product = workbook.worksheet_by_name("product0").unwrap();
        assert_eq!(product.get_value("A3").unwrap().as_number(), Some(1.0));
    }
}
