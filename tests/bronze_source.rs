use std::fs;
use std::path::Path;

use gold_loader::source::{BronzeSource, OrderSource, SourceError};
use gold_loader::test_utils::{guest_check_payload, menu_item_line};
use serde_json::{json, Value};
use tempfile::tempdir;

fn write_json(path: &Path, value: &Value) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(path, value.to_string()).expect("write json");
}

fn envelope(loc_ref: &str, ids: &[i64]) -> Value {
    let checks: Vec<Value> = ids
        .iter()
        .map(|id| {
            let mut check = guest_check_payload(*id, loc_ref, 42, vec![menu_item_line(1, 77)]);
            check
                .as_object_mut()
                .expect("object payload")
                .remove("locRef");
            check
        })
        .collect();
    json!({ "curUTC": "2024-01-01T12:00:00", "locRef": loc_ref, "guestChecks": checks })
}

#[test]
fn walks_nested_directories_in_path_order() {
    let dir = tempdir().expect("tempdir");
    let root = dir.path();
    write_json(&root.join("store_2/2024-01-02/checks.json"), &envelope("2", &[3]));
    write_json(&root.join("store_1/2024-01-01/checks.json"), &envelope("1", &[1, 2]));
    write_json(&root.join("store_1/2024-01-03/empty.json"), &json!({ "locRef": "1" }));
    fs::write(root.join("store_1/notes.txt"), "not json").expect("write txt");

    let source = BronzeSource::new(root);
    assert_eq!(source.files().expect("files").len(), 3);

    let records = source.records().expect("records");
    let ids: Vec<Option<i64>> = records.iter().map(|r| r.guest_check_id()).collect();
    assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    assert_eq!(records[2].loc_ref(), Some("2"));
}

#[test]
fn reads_a_single_file() {
    let dir = tempdir().expect("tempdir");
    let file = dir.path().join("checks.json");
    write_json(&file, &envelope("99 CB CB", &[500]));

    let records = BronzeSource::new(&file).records().expect("records");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].loc_ref(), Some("99 CB CB"));
    assert_eq!(records[0].decode().expect("decode").guest_check_id, 500);
}

#[test]
fn empty_directory_yields_nothing() {
    let dir = tempdir().expect("tempdir");

    let records = BronzeSource::new(dir.path()).records().expect("records");

    assert!(records.is_empty());
}

#[test]
fn malformed_document_fails_the_read() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("broken.json"), "{ \"guestChecks\": [").expect("write");

    let result = BronzeSource::new(dir.path()).records();

    assert!(matches!(result, Err(SourceError::Json { .. })));
}
