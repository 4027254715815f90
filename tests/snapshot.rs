use dubhash::{HashTable, SlotRecord, SnapshotError, VACANT};

use std::collections::HashSet;
use std::fs;

mod common;
use common::with_table;

fn read_records(path: &std::path::Path) -> Vec<SlotRecord> {
    let text = fs::read_to_string(path).unwrap();
    assert!(text.ends_with('\n'));
    assert_eq!(text.lines().count(), 1);
    serde_json::from_str(&text).unwrap()
}

#[test]
fn export_to_path() {
    with_table(|new| {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hash_table_data.json");

        let mut table = new();
        for i in 0..100 {
            table.insert(format!("key{i}"), format!("val{i}"));
        }
        for i in 0..10 {
            table.remove(&format!("key{i}"));
        }

        table.export_snapshot_to_path(&path).unwrap();
        let records = read_records(&path);

        assert_eq!(records.len(), table.capacity());
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.index, i);
        }

        let live: HashSet<_> = records
            .iter()
            .filter(|record| !record.is_vacant())
            .map(|record| (record.key.as_str(), record.value.as_str()))
            .collect();
        let expected: HashSet<_> = table.iter().collect();
        assert_eq!(live, expected);
        assert_eq!(live.len(), 90);
    });
}

#[test]
fn export_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let mut table = HashTable::new();
    table.insert("name", "Alice");
    table.export_snapshot_to_path(&path).unwrap();

    table.clear();
    table.export_snapshot_to_path(&path).unwrap();

    let records = read_records(&path);
    assert_eq!(records.len(), 53);
    assert!(records.iter().all(|r| r.key == VACANT && r.value == VACANT));
}

#[test]
fn export_to_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("snapshot.json");

    let mut table = HashTable::new();
    table.insert("name", "Alice");

    let err = table.export_snapshot_to_path(&path).unwrap_err();
    assert!(matches!(err, SnapshotError::Io(_)));
    assert!(err.to_string().starts_with("failed to write snapshot"));

    // the table is untouched
    assert_eq!(table.get("name"), Some("Alice"));
    assert_eq!(table.len(), 1);
}

#[test]
fn escapes_special_characters() {
    let mut table = HashTable::new();
    table.insert("quote\"key", "line\nbreak");
    table.insert("tab\t", "ünïcødé");

    let mut out = Vec::new();
    table.export_snapshot(&mut out).unwrap();
    assert_eq!(out.iter().filter(|&&b| b == b'\n').count(), 1);

    let records: Vec<SlotRecord> = serde_json::from_slice(&out).unwrap();
    assert!(records
        .iter()
        .any(|r| r.key == "quote\"key" && r.value == "line\nbreak"));
    assert!(records.iter().any(|r| r.key == "tab\t" && r.value == "ünïcødé"));
}

#[test]
fn tombstones_export_as_vacant() {
    let mut table = HashTable::new();
    table.insert("age", "25");
    let index = table
        .snapshot()
        .into_iter()
        .find(|r| r.key == "age")
        .unwrap()
        .index;

    table.remove("age");
    assert_eq!(table.tombstones(), 1);

    let record = &table.snapshot()[index];
    assert!(record.is_vacant());
    assert_eq!(record.index, index);
}
