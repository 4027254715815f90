#![no_main]

use libfuzzer_sys::fuzz_target;

use arbitrary::Arbitrary;
use dubhash::HashTable;
use std::collections::HashMap as StdHashMap;

#[derive(Debug, Arbitrary)]
enum Operation {
    Insert(String, String),
    Remove(String),
    Get(String),
    Contains(String),
    Clear,
    Len,
    IsEmpty,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    min_base_size: u8,
    operations: Vec<Operation>,
}

fn fuzz_table(input: FuzzInput) {
    let mut std_map = StdHashMap::new();
    let mut table = HashTable::builder()
        .min_base_size(usize::from(input.min_base_size).max(1))
        .build();
    let min = table.capacity();

    for op in input.operations {
        match op {
            Operation::Insert(k, v) => {
                let std_result = std_map.insert(k.clone(), v.clone());
                let table_result = table.insert(k, v);
                assert_eq!(std_result, table_result);
            }
            Operation::Remove(k) => {
                let std_result = std_map.remove(&k);
                let table_result = table.remove(&k);
                assert_eq!(std_result, table_result);
            }
            Operation::Get(k) => {
                let std_result = std_map.get(&k).map(String::as_str);
                let table_result = table.get(&k);
                assert_eq!(std_result, table_result);
            }
            Operation::Contains(k) => {
                assert_eq!(std_map.contains_key(&k), table.contains_key(&k));
            }
            Operation::Clear => {
                std_map.clear();
                table.clear();
            }
            Operation::Len => {
                assert_eq!(std_map.len(), table.len());
            }
            Operation::IsEmpty => {
                assert_eq!(std_map.is_empty(), table.is_empty());
            }
        }

        assert!(table.capacity() >= min);
        assert!(dubhash::is_prime(table.capacity()));
    }

    // Final consistency checks
    for (k, v) in std_map.iter() {
        assert_eq!(Some(v.as_str()), table.get(k));
    }
    assert_eq!(std_map.len(), table.len());
    assert_eq!(std_map.len(), table.iter().count());
}

fuzz_target!(|data: FuzzInput| {
    fuzz_table(data);
});
