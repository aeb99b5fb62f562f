//! Sheet reader

use ahash::AHashMap;
use sheetdoc_core::{Workbook, Worksheet};

use crate::cell::Cell;
use crate::document::Document;
use crate::error::{Error, Result};
use crate::field::Schema;
use crate::hooks::{CellHook, Hooks};
use crate::materialize::RowContext;

/// Documents of the sheets already read during one top-level read
pub(crate) type SheetCache = AHashMap<String, Vec<Document>>;

/// Where the header and the data sit in a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Zero-based header row (default: 1, below a title row)
    pub header_row: u32,
    /// Rows between the header and the first data row (default: 0)
    pub skip: u32,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            header_row: 1,
            skip: 0,
        }
    }
}

/// Reads sheets of a workbook into documents.
///
/// Referenced sheets are read with the same header row and skip as the sheet
/// that references them, once per top-level read.
#[derive(Debug)]
pub struct SheetReader<'wb> {
    workbook: &'wb Workbook,
    hooks: Hooks,
}

impl<'wb> SheetReader<'wb> {
    /// Create a reader with the built-in conversions
    pub fn new(workbook: &'wb Workbook) -> Self {
        Self {
            workbook,
            hooks: Hooks::default(),
        }
    }

    /// Convert `time` cells with `hook` instead of the native date decoding
    pub fn with_time_hook<H: CellHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.time = Some(Box::new(hook));
        self
    }

    /// Convert `file` cells with `hook` instead of passing the text through
    pub fn with_file_hook<H: CellHook + 'static>(mut self, hook: H) -> Self {
        self.hooks.file = Some(Box::new(hook));
        self
    }

    /// The workbook being read
    pub fn workbook(&self) -> &'wb Workbook {
        self.workbook
    }

    /// Parse the field specifications in `row` of `sheet`
    pub fn parse_header(&self, sheet: &str, row: u32) -> Result<Schema> {
        let worksheet = self.worksheet(sheet)?;
        Self::header(worksheet, row)
    }

    /// Read `sheet` with the given options
    pub fn read(&self, sheet: &str, options: &ReadOptions) -> Result<Vec<Document>> {
        self.read_sheet(sheet, options.header_row, options.skip)
    }

    /// Read `sheet` into one document per data row.
    ///
    /// Data starts `skip` rows below `header_row` and ends before the first
    /// row whose first cell is blank.
    pub fn read_sheet(&self, sheet: &str, header_row: u32, skip: u32) -> Result<Vec<Document>> {
        let mut cache = SheetCache::default();
        let mut in_progress = Vec::new();
        self.read_cached(sheet, header_row, skip, &mut cache, &mut in_progress)
    }

    fn read_cached(
        &self,
        sheet: &str,
        header_row: u32,
        skip: u32,
        cache: &mut SheetCache,
        in_progress: &mut Vec<String>,
    ) -> Result<Vec<Document>> {
        if let Some(pos) = in_progress.iter().position(|name| name == sheet) {
            let mut chain = in_progress[pos..].to_vec();
            chain.push(sheet.to_string());
            return Err(Error::CyclicReference { chain });
        }

        let worksheet = self.worksheet(sheet)?;
        let schema = Self::header(worksheet, header_row)?;
        tracing::debug!(sheet, header_row, skip, fields = schema.len(), "reading sheet");

        in_progress.push(sheet.to_string());
        for target in schema.reference_targets() {
            if cache.contains_key(target) {
                tracing::debug!(sheet, target, "referenced sheet already read");
                continue;
            }
            tracing::debug!(sheet, target, "reading referenced sheet");
            let documents = self.read_cached(target, header_row, skip, cache, in_progress)?;
            cache.insert(target.to_string(), documents);
        }
        in_progress.pop();

        let context = RowContext {
            worksheet,
            schema: &schema,
            cache,
            hooks: &self.hooks,
            date_1904: self.workbook.settings().date_1904,
        };

        let mut documents = Vec::new();
        let first = header_row.saturating_add(skip).saturating_add(1);
        for row in first..sheetdoc_core::MAX_ROWS {
            if Cell::new(worksheet, row, 0, context.date_1904).is_blank() {
                break;
            }
            documents.push(context.materialize(row)?);
        }

        tracing::debug!(sheet, documents = documents.len(), "sheet read");
        Ok(documents)
    }

    fn worksheet(&self, sheet: &str) -> Result<&'wb Worksheet> {
        self.workbook
            .worksheet_by_name(sheet)
            .ok_or_else(|| Error::SheetNotFound(sheet.to_string()))
    }

    fn header(worksheet: &Worksheet, row: u32) -> Result<Schema> {
        let cells = worksheet
            .row_cells(row)
            .map(|(col, value)| (col, value.to_string()));
        Schema::parse(worksheet.name(), row, cells)
    }
}
