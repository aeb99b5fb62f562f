//! Building one document per data row

use sheetdoc_core::Worksheet;

use crate::cell::Cell;
use crate::coerce;
use crate::document::{insert_path, Document};
use crate::error::{Error, Result};
use crate::field::{FieldType, Schema};
use crate::hooks::Hooks;
use crate::reader::SheetCache;
use crate::reference;

/// Everything a row needs besides its index
pub(crate) struct RowContext<'a> {
    pub(crate) worksheet: &'a Worksheet,
    pub(crate) schema: &'a Schema,
    pub(crate) cache: &'a SheetCache,
    pub(crate) hooks: &'a Hooks,
    pub(crate) date_1904: bool,
}

impl RowContext<'_> {
    /// Build the document for `row`, stopping at the first failing field
    pub(crate) fn materialize(&self, row: u32) -> Result<Document> {
        let mut document = Document::new();

        for field in self.schema.fields() {
            let cell = Cell::new(self.worksheet, row, field.col, self.date_1904);

            let value = match field.field_type {
                FieldType::Reference => {
                    let candidates = field
                        .target_sheet()
                        .and_then(|target| self.cache.get(target))
                        .map(Vec::as_slice)
                        .unwrap_or_default();
                    reference::resolve(field, &cell, candidates, &document)?
                }
                _ if cell.is_blank() => {
                    if field.required {
                        return Err(Error::EmptyValue {
                            sheet: self.worksheet.name().to_string(),
                            key: field.key.clone(),
                            row,
                            col: field.col,
                        });
                    }
                    continue;
                }
                FieldType::Integer => coerce::integer(field, &cell)?,
                FieldType::Float => coerce::float(field, &cell)?,
                FieldType::String => coerce::string(&cell),
                FieldType::File => coerce::file(field, &cell, self.hooks)?,
                FieldType::Time => coerce::time(field, &cell, self.hooks)?,
            };

            insert_path(&mut document, &field.key, value).map_err(|conflict| {
                Error::PathConflict {
                    sheet: self.worksheet.name().to_string(),
                    key: field.key.clone(),
                    row,
                    prefix: conflict.prefix,
                }
            })?;
        }

        tracing::trace!(sheet = self.worksheet.name(), row, fields = document.len(), "row read");
        Ok(document)
    }
}
