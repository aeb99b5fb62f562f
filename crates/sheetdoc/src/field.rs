//! Header-row field specifications.
//!
//! Each non-empty header cell declares one field:
//!
//! ```text
//! key[:o|:optional],type[,arg...]
//! ```
//!
//! `key` may contain `.` to place the value in a nested document. The type is
//! one of `int64`, `float64`, `string`, `file`, `time` or `ref`. A `ref` field
//! takes two arguments: the target sheet and a filter, either `field` (match
//! the target's `field` against this cell) or `field=path` (match it against
//! the value already placed at `path` in the current row's document).

use std::fmt;

use ahash::AHashMap;
use serde::Serialize;

use crate::error::{Error, Result};

/// The type of a field, as written in the header cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FieldType {
    /// `int64`
    #[serde(rename = "int64")]
    Integer,
    /// `float64`
    #[serde(rename = "float64")]
    Float,
    /// `string`
    #[serde(rename = "string")]
    String,
    /// `file`
    #[serde(rename = "file")]
    File,
    /// `time`
    #[serde(rename = "time")]
    Time,
    /// `ref`
    #[serde(rename = "ref")]
    Reference,
}

impl FieldType {
    /// Parse a header type tag. Tags are case-sensitive.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "int64" => Some(FieldType::Integer),
            "float64" => Some(FieldType::Float),
            "string" => Some(FieldType::String),
            "file" => Some(FieldType::File),
            "time" => Some(FieldType::Time),
            "ref" => Some(FieldType::Reference),
            _ => None,
        }
    }

    /// The header tag for this type
    pub fn tag(self) -> &'static str {
        match self {
            FieldType::Integer => "int64",
            FieldType::Float => "float64",
            FieldType::String => "string",
            FieldType::File => "file",
            FieldType::Time => "time",
            FieldType::Reference => "ref",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// How a reference field selects rows of its target sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceFilter<'a> {
    /// Target rows whose `field` equals this field's own cell
    Implicit { field: &'a str },
    /// Target rows whose `field` equals the current document's value at `path`
    Explicit { field: &'a str, path: &'a str },
}

/// One parsed header cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Output key, possibly a dotted path
    pub key: String,
    /// Whether an empty cell is an error
    #[serde(rename = "req")]
    pub required: bool,
    /// Value type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Tokens after the type
    pub args: Vec<String>,
    /// Zero-based header row
    pub row: u32,
    /// Zero-based column
    pub col: u16,
}

impl FieldDescriptor {
    /// Parse the text of one header cell.
    ///
    /// Returns `Ok(None)` for a blank cell.
    pub fn parse(sheet: &str, row: u32, col: u16, text: &str) -> Result<Option<Self>> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let invalid = |reason: &str| Error::Schema {
            sheet: sheet.to_string(),
            row,
            col,
            text: text.to_string(),
            reason: reason.to_string(),
        };

        // Only the key segment is trimmed; the type tag and arguments are
        // taken as written
        let mut parts = text.split(',');
        let (name, tag) = match (parts.next(), parts.next()) {
            (Some(name), Some(tag)) => (name.trim(), tag),
            _ => return Err(invalid("expected 'key,type[,args]'")),
        };

        let (key, required) = match name.split_once(':') {
            Some((key, modifier)) => {
                let modifier = modifier.trim().to_ascii_lowercase();
                (key.trim(), !(modifier == "o" || modifier == "optional"))
            }
            None => (name, true),
        };
        if key.is_empty() {
            return Err(invalid("key is empty"));
        }

        let field_type = FieldType::from_tag(tag)
            .ok_or_else(|| invalid(&format!("unsupported type '{tag}'")))?;

        let args: Vec<String> = parts.map(str::to_string).collect();
        if field_type == FieldType::Reference && args.len() < 2 {
            return Err(invalid("ref needs a target sheet and a filter"));
        }

        Ok(Some(FieldDescriptor {
            key: key.to_string(),
            required,
            field_type,
            args,
            row,
            col,
        }))
    }

    /// Whether this is a `ref` field
    pub fn is_reference(&self) -> bool {
        self.field_type == FieldType::Reference
    }

    /// The sheet a `ref` field points at
    pub fn target_sheet(&self) -> Option<&str> {
        if !self.is_reference() {
            return None;
        }
        self.args.first().map(String::as_str)
    }

    /// The row filter of a `ref` field
    pub fn filter(&self) -> Option<ReferenceFilter<'_>> {
        if !self.is_reference() {
            return None;
        }
        let arg = self.args.get(1)?;
        Some(match arg.split_once('=') {
            Some((field, path)) => ReferenceFilter::Explicit {
                field: field.trim(),
                path,
            },
            None => ReferenceFilter::Implicit { field: arg.trim() },
        })
    }
}

/// The fields declared by one header row, in column order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Parse a header row given as `(column, text)` pairs in column order
    pub fn parse<I, S>(sheet: &str, row: u32, cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u16, S)>,
        S: AsRef<str>,
    {
        let mut fields: Vec<FieldDescriptor> = Vec::new();
        let mut seen: AHashMap<String, u16> = AHashMap::new();

        for (col, text) in cells {
            let Some(field) = FieldDescriptor::parse(sheet, row, col, text.as_ref())? else {
                continue;
            };
            if let Some(&first_col) = seen.get(&field.key) {
                return Err(Error::DuplicateKey {
                    sheet: sheet.to_string(),
                    text: text.as_ref().trim().to_string(),
                    key: field.key,
                    row,
                    col,
                    first_row: row,
                    first_col,
                });
            }
            seen.insert(field.key.clone(), col);
            fields.push(field);
        }

        Ok(Schema { fields })
    }

    /// All fields in column order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// The `ref` fields in column order
    pub fn references(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter().filter(|f| f.is_reference())
    }

    /// Distinct target sheets of the `ref` fields, first mention first
    pub fn reference_targets(&self) -> Vec<&str> {
        let mut targets: Vec<&str> = Vec::new();
        for target in self.references().filter_map(FieldDescriptor::target_sheet) {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }
        targets
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the header row declared no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
