use expense_core::ledger::decode_records;
use expense_core::ExpenseRecord;
use uuid::Uuid;

#[test]
fn new_generates_distinct_ids() {
    let first = ExpenseRecord::new("Coffee", "Food", 4.5);
    let second = ExpenseRecord::new("Coffee", "Food", 4.5);

    assert!(!first.id.is_nil());
    assert_ne!(first.id, second.id);
    assert_ne!(first, second);
}

#[test]
fn permissive_fields_are_kept_as_given() {
    let record = ExpenseRecord::new("", "", -12.5);

    assert_eq!(record.name, "");
    assert_eq!(record.category, "");
    assert_eq!(record.amount, -12.5);
}

#[test]
fn decodes_snapshot_written_by_the_ios_app() {
    let stored = br#"[
        {"id":"E621E1F8-C36C-495A-93FC-0C247A3E6E5F","name":"Coffee","type":"Food","amount":4.5},
        {"id":"1D4B6A52-2C1E-4B8F-9B0A-6F3E5C2D1A00","name":"Bus","type":"Transport","amount":2.25}
    ]"#;

    let records = decode_records(stored).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].id,
        Uuid::parse_str("e621e1f8-c36c-495a-93fc-0c247a3e6e5f").unwrap()
    );
    assert_eq!(records[0].category, "Food");
    assert_eq!(records[1].name, "Bus");
    assert_eq!(records[1].amount, 2.25);
}

#[test]
fn decode_rejects_record_missing_amount() {
    let stored = br#"[{"id":"E621E1F8-C36C-495A-93FC-0C247A3E6E5F","name":"Coffee","type":"Food"}]"#;
    assert!(decode_records(stored).is_err());
}
