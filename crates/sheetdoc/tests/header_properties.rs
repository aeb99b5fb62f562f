//! Property tests for header-row parsing

use proptest::prelude::*;
use sheetdoc::{ErrorKind, FieldDescriptor, FieldType, Schema};

fn field_type() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["int64", "float64", "string", "file", "time"])
}

fn header_cell() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9_]{0,6}(\\.[a-z][a-z0-9_]{0,6}){0,2}",
        prop::sample::select(vec!["", ":o", ":optional", ":O"]),
        field_type(),
    )
        .prop_map(|(key, modifier, tag)| format!("{key}{modifier},{tag}"))
}

proptest! {
    /// Parsing the same header twice gives equal schemas
    #[test]
    fn parse_is_idempotent(cells in prop::collection::vec(header_cell(), 0..8)) {
        let mut seen = std::collections::HashSet::new();
        let row: Vec<(u16, String)> = cells
            .into_iter()
            .filter(|c| seen.insert(c.split([':', ',']).next().unwrap_or_default().to_string()))
            .enumerate()
            .map(|(col, text)| (col as u16, text))
            .collect();

        let first = Schema::parse("s", 1, row.clone()).unwrap();
        let second = Schema::parse("s", 1, row.clone()).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.len(), row.len());
    }

    /// A cell without a comma is always a schema error
    #[test]
    fn single_segment_fails(text in "[^,\\s][^,]{0,20}", row in 0u32..1000, col in 0u16..500) {
        let err = FieldDescriptor::parse("s", row, col, &text).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Schema);
        let expected = format!("s,{row},{col}");
        prop_assert!(err.to_string().contains(&expected));
    }

    /// A key declared twice is always a schema error naming both columns
    #[test]
    fn duplicate_key_fails(cell in header_cell(), gap in 1u16..20) {
        let row = vec![(0u16, cell.clone()), (gap, cell)];
        let err = Schema::parse("s", 1, row).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Schema);
        let message = err.to_string();
        let expected = format!("s,1,{gap} duplicates key");
        prop_assert!(message.contains(&expected));
        prop_assert!(message.contains("of the field on s,1,0"));
    }

    /// Reference fields need both a target sheet and a filter
    #[test]
    fn reference_arguments(target in "[a-z]{1,8}", filter in "[a-z]{1,8}") {
        let short = FieldDescriptor::parse("s", 1, 0, &format!("r,ref,{target}")).unwrap_err();
        prop_assert_eq!(short.kind(), ErrorKind::Schema);

        let field = FieldDescriptor::parse("s", 1, 0, &format!("r,ref,{target},{filter}"))
            .unwrap()
            .unwrap();
        prop_assert_eq!(field.field_type, FieldType::Reference);
        prop_assert_eq!(field.target_sheet(), Some(target.as_str()));
    }
}
