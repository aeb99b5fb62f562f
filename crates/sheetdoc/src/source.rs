//! Opening workbooks from disk

use std::path::{Path, PathBuf};

use sheetdoc_core::Workbook;
use sheetdoc_csv::{CsvReadOptions, CsvReader};
use sheetdoc_xlsx::XlsxReader;

use crate::error::{Error, Result};

/// Open a workbook: an `.xlsx`/`.xlsm` file, a `.csv` file, or a directory
/// of `.csv` files (one sheet per file, sorted by file name).
///
/// CSV fields are kept as text; each field's declared type decides how its
/// text is read, so long integers and number-like strings survive intact.
pub fn open_workbook<P: AsRef<Path>>(path: P) -> Result<Workbook> {
    let csv_options = CsvReadOptions {
        auto_detect_types: false,
        ..CsvReadOptions::default()
    };
    open_workbook_with(path, &csv_options)
}

/// Open a workbook, reading CSV input with `csv_options`
pub fn open_workbook_with<P: AsRef<Path>>(path: P, csv_options: &CsvReadOptions) -> Result<Workbook> {
    let path = path.as_ref();

    if path.is_dir() {
        let files = csv_files(path)?;
        tracing::debug!(dir = %path.display(), files = files.len(), "opening csv directory");
        return Ok(CsvReader::read_workbook(&files, csv_options)?);
    }

    match extension(path).as_deref() {
        Some("xlsx") | Some("xlsm") => Ok(XlsxReader::read_file(path)?),
        Some("csv") => {
            let worksheet = CsvReader::read_file(path, csv_options)?;
            let mut workbook = Workbook::empty();
            workbook.add_existing_worksheet(worksheet)?;
            Ok(workbook)
        }
        _ => Err(Error::UnsupportedSource(path.to_path_buf())),
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

fn csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && extension(&path).as_deref() == Some("csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
