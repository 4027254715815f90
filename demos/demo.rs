use dubhash::HashTable;

fn show(table: &HashTable, key: &str) {
    println!("Search for '{key}': {}", table.get(key).unwrap_or("(null)"));
}

fn main() -> Result<(), dubhash::SnapshotError> {
    let mut table = HashTable::new();

    table.insert("name", "Alice");
    table.insert("age", "25");
    table.insert("city", "Vancouver");

    show(&table, "name");
    show(&table, "age");
    show(&table, "city");
    show(&table, "country");

    table.remove("age");
    println!("After deleting 'age':");
    show(&table, "age");

    table.insert("abc", "123");
    table.insert("acb", "321");
    show(&table, "abc");
    show(&table, "acb");

    let capacity = table.capacity();
    for i in 0..100 {
        table.insert(format!("key{i}"), format!("val{i}"));
    }
    println!(
        "Inserted 100 keys, capacity {capacity} -> {} ({} entries)",
        table.capacity(),
        table.len()
    );

    show(&table, "key0");
    show(&table, "key99");

    table.export_snapshot_to_path("hash_table_data.json")?;
    println!("Wrote hash_table_data.json");

    Ok(())
}
