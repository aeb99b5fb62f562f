//! Matching `ref` fields against the rows of their target sheet

use crate::cell::Cell;
use crate::document::{get_path, Document, Value};
use crate::error::{Error, Result};
use crate::field::{FieldDescriptor, ReferenceFilter};

/// Collect the `candidates` that match the current row, in candidate order.
///
/// `document` is the current row as assembled so far; explicit filters read
/// from it, so the fields they name must sit to the left of the `ref` column.
pub(crate) fn resolve(
    field: &FieldDescriptor,
    cell: &Cell<'_>,
    candidates: &[Document],
    document: &Document,
) -> Result<Value> {
    let target = field.target_sheet().unwrap_or_default();
    let fail = |reason: String| Error::Reference {
        sheet: cell.sheet().to_string(),
        key: field.key.clone(),
        row: cell.row(),
        col: cell.col(),
        target: target.to_string(),
        reason,
    };

    let filter = field
        .filter()
        .ok_or_else(|| fail("missing target sheet or filter".to_string()))?;

    let mut matches = Vec::new();
    match filter {
        ReferenceFilter::Explicit { field: name, path } => {
            // Absent on both sides counts as equal
            let wanted = get_path(document, path);
            for candidate in candidates {
                if candidate.get(name) == wanted {
                    matches.push(candidate.clone());
                }
            }
        }
        ReferenceFilter::Implicit { field: name } => {
            let text = cell.text();
            for candidate in candidates {
                let matched = match candidate.get(name) {
                    Some(Value::Integer(n)) => {
                        let own = cell.as_i64().ok_or_else(|| {
                            fail(format!("'{text}' is not an int64 to compare with '{name}'"))
                        })?;
                        *n == own
                    }
                    Some(Value::Float(n)) => {
                        let own = cell.as_f64().ok_or_else(|| {
                            fail(format!("'{text}' is not a float64 to compare with '{name}'"))
                        })?;
                        *n == own
                    }
                    Some(Value::String(s)) => *s == text,
                    _ => false,
                };
                if matched {
                    matches.push(candidate.clone());
                }
            }
        }
    }

    Ok(Value::Documents(matches))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::insert_path;
    use crate::error::ErrorKind;
    use crate::field::FieldType;
    use pretty_assertions::assert_eq;
    use sheetdoc_core::{CellValue, Worksheet};

    fn reference(filter: &str) -> FieldDescriptor {
        FieldDescriptor {
            key: "products".into(),
            required: false,
            field_type: FieldType::Reference,
            args: vec!["product0".into(), filter.into()],
            row: 1,
            col: 1,
        }
    }

    fn product(user: Value, name: &str) -> Document {
        let mut doc = Document::new();
        doc.insert("user".into(), user);
        doc.insert("name".into(), name.into());
        doc
    }

    fn names(value: &Value) -> Vec<&str> {
        value
            .as_documents()
            .unwrap()
            .iter()
            .map(|d| d["name"].as_str().unwrap())
            .collect()
    }

    fn row(value: CellValue) -> Worksheet {
        let mut ws = Worksheet::new("user0");
        ws.set_cell_value_at(2, 1, value).unwrap();
        ws
    }

    #[test]
    fn test_implicit_compares_by_candidate_type() {
        let candidates = vec![
            product(Value::Integer(1), "pen"),
            product(Value::Integer(2), "ink"),
            product(Value::String("1".into()), "pad"),
            product(Value::Float(1.0), "cup"),
            product(Value::Document(Document::new()), "box"),
            product(Value::Integer(1), "nib"),
        ];
        let ws = row(CellValue::Number(1.0));
        let cell = Cell::new(&ws, 2, 1, false);

        let value = resolve(&reference("user"), &cell, &candidates, &Document::new()).unwrap();
        assert_eq!(names(&value), vec!["pen", "pad", "cup", "nib"]);
    }

    #[test]
    fn test_implicit_numeric_parse_failure_aborts() {
        let candidates = vec![product(Value::String("x".into()), "pen"), product(Value::Integer(1), "ink")];
        let ws = row(CellValue::string("x"));
        let cell = Cell::new(&ws, 2, 1, false);

        let err = resolve(&reference("user"), &cell, &candidates, &Document::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Reference);
        assert!(err.to_string().contains("sheet 'product0'"), "{err}");
    }

    #[test]
    fn test_implicit_without_comparable_candidates_is_empty() {
        let candidates = vec![product(Value::Document(Document::new()), "pen")];
        let ws = row(CellValue::string("x"));
        let cell = Cell::new(&ws, 2, 1, false);

        let value = resolve(&reference("user"), &cell, &candidates, &Document::new()).unwrap();
        assert_eq!(value, Value::Documents(vec![]));
    }

    #[test]
    fn test_explicit_reads_current_document() {
        let candidates = vec![
            product(Value::Integer(1), "pen"),
            product(Value::Integer(2), "ink"),
            product(Value::Float(2.0), "cup"),
        ];
        let ws = row(CellValue::Empty);
        let cell = Cell::new(&ws, 2, 1, false);

        let mut current = Document::new();
        insert_path(&mut current, "owner.id", Value::Integer(2)).unwrap();

        let value = resolve(&reference("user=owner.id"), &cell, &candidates, &current).unwrap();
        assert_eq!(names(&value), vec!["ink"]);

        let value = resolve(&reference("user=owner.name"), &cell, &candidates, &current).unwrap();
        assert_eq!(value, Value::Documents(vec![]));

        let value = resolve(&reference("missing=owner.id"), &cell, &candidates, &current).unwrap();
        assert_eq!(value, Value::Documents(vec![]));
    }

    #[test]
    fn test_explicit_absent_on_both_sides_matches() {
        let mut unlabeled = Document::new();
        unlabeled.insert("name".into(), "pen".into());
        let candidates = vec![unlabeled, product(Value::from("x"), "ink")];
        let ws = row(CellValue::Empty);
        let cell = Cell::new(&ws, 2, 1, false);

        let value = resolve(&reference("user=tag"), &cell, &candidates, &Document::new()).unwrap();
        assert_eq!(names(&value), vec!["pen"]);

        let mut tagged = Document::new();
        tagged.insert("tag".into(), "x".into());
        let value = resolve(&reference("user=tag"), &cell, &candidates, &tagged).unwrap();
        assert_eq!(names(&value), vec!["ink"]);
    }
}
