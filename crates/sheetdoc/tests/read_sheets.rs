//! End-to-end tests for reading sheets into documents (workbook -> reader -> documents)

use pretty_assertions::assert_eq;
use sheetdoc::{
    CellValue, Error, ErrorKind, ReadOptions, SheetReader, Value, Workbook, Worksheet,
};

fn add_sheet(workbook: &mut Workbook, name: &str, header: &[&str], rows: &[Vec<CellValue>]) {
    let mut sheet = Worksheet::new(name);
    sheet.set_row_values(0, [name]).unwrap();
    sheet.set_row_values(1, header.iter().copied()).unwrap();
    for (i, values) in rows.iter().enumerate() {
        sheet
            .set_row_values(i as u32 + 2, values.iter().cloned())
            .unwrap();
    }
    workbook.add_existing_worksheet(sheet).unwrap();
}

fn users_and_products() -> Workbook {
    let mut workbook = Workbook::empty();
    add_sheet(
        &mut workbook,
        "user0",
        &["id,int64", "name,string", "products:o,ref,product0,user_id"],
        &[
            vec![1.into(), "Ann".into(), 1.into()],
            vec![2.into(), "Bo".into(), 2.into()],
            vec![3.into(), "Cy".into(), 3.into()],
        ],
    );
    add_sheet(
        &mut workbook,
        "product0",
        &["user_id,int64", "name,string"],
        &[
            vec![1.into(), "pen".into()],
            vec![2.into(), "ink".into()],
            vec![1.into(), "pad".into()],
            vec![3.into(), "cup".into()],
        ],
    );
    workbook
}

fn names(value: &Value) -> Vec<&str> {
    value
        .as_documents()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect()
}

/// Every user row picks up its products in product-sheet order
#[test]
fn test_users_with_products() {
    let workbook = users_and_products();
    let documents = SheetReader::new(&workbook)
        .read("user0", &ReadOptions::default())
        .unwrap();

    assert_eq!(documents.len(), 3);
    assert_eq!(names(&documents[0]["products"]), vec!["pen", "pad"]);
    assert_eq!(names(&documents[1]["products"]), vec!["ink"]);
    assert_eq!(names(&documents[2]["products"]), vec!["cup"]);
    assert_eq!(
        documents[0].keys().collect::<Vec<_>>(),
        vec!["id", "name", "products"]
    );
}

/// Reading twice gives the same documents; nothing is kept between reads
#[test]
fn test_repeated_reads_are_independent() {
    let workbook = users_and_products();
    let reader = SheetReader::new(&workbook);

    let first = reader.read_sheet("user0", 1, 0).unwrap();
    let second = reader.read_sheet("user0", 1, 0).unwrap();
    assert_eq!(first, second);
}

/// A reference with no matching rows is kept as an empty list
#[test]
fn test_unmatched_reference_is_empty_list() {
    let mut workbook = users_and_products();
    add_sheet(
        &mut workbook,
        "user1",
        &["id,int64", "products:o,ref,product0,user_id"],
        &[vec![9.into(), 9.into()]],
    );
    let documents = SheetReader::new(&workbook)
        .read("user1", &ReadOptions::default())
        .unwrap();

    assert_eq!(documents[0]["products"], Value::Documents(vec![]));
}

/// Products keyed by user name, matched through an explicit path
#[test]
fn test_explicit_filter_uses_nested_path() {
    let mut workbook = Workbook::empty();
    add_sheet(
        &mut workbook,
        "orders",
        &["buyer.name,string", "buyer.items:o,ref,items,owner=buyer.name"],
        &[vec!["Ann".into()], vec!["Bo".into()]],
    );
    add_sheet(
        &mut workbook,
        "items",
        &["owner,string", "sku,string"],
        &[
            vec!["Ann".into(), "A-1".into()],
            vec!["Bo".into(), "B-1".into()],
            vec!["Ann".into(), "A-2".into()],
        ],
    );
    let documents = SheetReader::new(&workbook)
        .read("orders", &ReadOptions::default())
        .unwrap();

    let buyer = documents[0]["buyer"].as_document().unwrap();
    let skus: Vec<_> = buyer["items"]
        .as_documents()
        .unwrap()
        .iter()
        .map(|d| d["sku"].as_str().unwrap())
        .collect();
    assert_eq!(skus, vec!["A-1", "A-2"]);
}

/// A non-numeric float cell fails the whole read with its coordinates
#[test]
fn test_invalid_float_fails_read() {
    let mut workbook = Workbook::empty();
    add_sheet(
        &mut workbook,
        "prices",
        &["sku,string", "price,float64"],
        &[
            vec!["A-1".into(), 1.5.into()],
            vec!["A-2".into(), "abc".into()],
        ],
    );
    let err = SheetReader::new(&workbook)
        .read("prices", &ReadOptions::default())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Value);
    match err {
        Error::InvalidValue {
            sheet,
            row,
            col,
            text,
            ..
        } => {
            assert_eq!((sheet.as_str(), row, col, text.as_str()), ("prices", 3, 1, "abc"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// Data after the first blank leading cell is never read, even if invalid
#[test]
fn test_rows_after_end_marker_are_ignored() {
    let mut workbook = Workbook::empty();
    add_sheet(
        &mut workbook,
        "prices",
        &["sku,string", "price,float64"],
        &[
            vec!["A-1".into(), 1.5.into()],
            vec![CellValue::Empty, 2.into()],
            vec!["A-3".into(), "abc".into()],
        ],
    );
    let documents = SheetReader::new(&workbook)
        .read("prices", &ReadOptions::default())
        .unwrap();

    assert_eq!(documents.len(), 1);
}

/// The referenced sheet's schema errors surface from the referencing read
#[test]
fn test_schema_error_in_referenced_sheet() {
    let mut workbook = Workbook::empty();
    add_sheet(
        &mut workbook,
        "user0",
        &["id,int64", "products:o,ref,product0,user_id"],
        &[vec![1.into(), 1.into()]],
    );
    add_sheet(&mut workbook, "product0", &["user_id,integer"], &[]);

    let err = SheetReader::new(&workbook)
        .read("user0", &ReadOptions::default())
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
    assert!(err.to_string().contains("product0,1,0"), "{err}");
}

/// Hooks replace the built-in time and file conversions
#[test]
fn test_hooks() {
    use sheetdoc::{Cell, FieldDescriptor, HookError};

    let mut workbook = Workbook::empty();
    add_sheet(
        &mut workbook,
        "media",
        &["id,int64", "at,time", "image:o,file"],
        &[
            vec![1.into(), 45292.into(), "a.png".into()],
            vec![2.into(), 45293.into()],
        ],
    );

    let documents = SheetReader::new(&workbook)
        .with_time_hook(
            |_: &FieldDescriptor, cell: &Cell<'_>| -> Result<Value, HookError> {
                let at = cell.as_datetime().ok_or("not a date")?;
                Ok(Value::String(at.format("%Y-%m-%d").to_string()))
            },
        )
        .with_file_hook(
            |field: &FieldDescriptor, cell: &Cell<'_>| -> Result<Value, HookError> {
                Ok(Value::String(format!("/{}/{}", field.key, cell.text())))
            },
        )
        .read("media", &ReadOptions::default())
        .unwrap();

    assert_eq!(documents[0]["at"], Value::from("2024-01-01"));
    assert_eq!(documents[0]["image"], Value::from("/image/a.png"));
    assert_eq!(documents[1]["at"], Value::from("2024-01-02"));
    assert!(!documents[1].contains_key("image"));
}

/// Documents serialize to plain JSON
#[test]
fn test_documents_to_json() {
    let workbook = users_and_products();
    let documents = SheetReader::new(&workbook)
        .read("product0", &ReadOptions::default())
        .unwrap();

    let json = serde_json::to_value(&documents).unwrap();
    assert_eq!(
        json[0],
        serde_json::json!({"user_id": 1, "name": "pen"})
    );
    assert_eq!(json.as_array().unwrap().len(), 4);
}
