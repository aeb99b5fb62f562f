//! Output documents

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// One materialized row: field keys in header order
pub type Document = IndexMap<String, Value>;

/// A value placed in a [`Document`]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `int64` field
    Integer(i64),
    /// `float64` field
    Float(f64),
    /// `string` and `file` fields
    String(String),
    /// `time` field
    Timestamp(DateTime<FixedOffset>),
    /// Intermediate document created by a dotted key
    Document(Document),
    /// Rows matched by a `ref` field
    Documents(Vec<Document>),
}

impl Value {
    /// Get as integer if this is an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as float if this is a float
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as timestamp if this is a timestamp
    pub fn as_timestamp(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// Get as nested document
    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(d) => Some(d),
            _ => None,
        }
    }

    /// Get as list of referenced documents
    pub fn as_documents(&self) -> Option<&[Document]> {
        match self {
            Value::Documents(d) => Some(d),
            _ => None,
        }
    }

    /// Get the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Timestamp(_) => "timestamp",
            Value::Document(_) => "document",
            Value::Documents(_) => "documents",
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(t: DateTime<FixedOffset>) -> Self {
        Value::Timestamp(t)
    }
}

impl From<Document> for Value {
    fn from(d: Document) -> Self {
        Value::Document(d)
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Integer(n) => serializer.serialize_i64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Timestamp(t) => serializer.serialize_str(&t.to_rfc3339()),
            Value::Document(d) => d.serialize(serializer),
            Value::Documents(docs) => serializer.collect_seq(docs),
        }
    }
}

/// A dotted key that would descend through a value that is not a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathConflict {
    /// The leading segments that hold the non-document value
    pub prefix: String,
}

/// Place `value` at the dotted `key`, creating intermediate documents.
///
/// An existing value at the final segment is replaced.
pub fn insert_path(
    document: &mut Document,
    key: &str,
    value: Value,
) -> std::result::Result<(), PathConflict> {
    let (parents, last) = match key.rsplit_once('.') {
        Some((parents, last)) => (Some(parents), last),
        None => (None, key),
    };

    let mut current = document;
    if let Some(parents) = parents {
        let mut end = 0;
        for segment in parents.split('.') {
            end += segment.len();
            let entry = current
                .entry(segment.to_string())
                .or_insert_with(|| Value::Document(Document::new()));
            current = match entry {
                Value::Document(child) => child,
                _ => {
                    return Err(PathConflict {
                        prefix: key[..end].to_string(),
                    })
                }
            };
            end += 1;
        }
    }

    current.insert(last.to_string(), value);
    Ok(())
}

/// Look up the value at a dotted `path`
pub fn get_path<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_document()?.get(segment)?;
    }
    Some(current)
}
