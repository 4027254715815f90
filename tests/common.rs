#![allow(dead_code)]

use dubhash::HashTable;

// Run the test on different configurations of a `HashTable`.
pub fn with_table(mut test: impl FnMut(&dyn Fn() -> HashTable)) {
    // The default configuration.
    test(&HashTable::new);

    // A tiny minimum size to stress resizing in both directions.
    test(
        &(|| {
            HashTable::builder()
                .min_base_size(2)
                .grow_threshold(70)
                .shrink_threshold(10)
                .build()
        }),
    );

    // Eager growth with no shrinking, leaving tombstones to pile up.
    test(
        &(|| {
            HashTable::builder()
                .min_base_size(8)
                .grow_threshold(50)
                .shrink_threshold(0)
                .build()
        }),
    );

    // Lazy growth, keeping the table dense.
    test(&(|| HashTable::builder().grow_threshold(95).build()));
}

// Prints a log message if `RUST_LOG=debug` is set.
#[macro_export]
macro_rules! debug {
    ($($x:tt)*) => {
        if std::env::var("RUST_LOG").as_deref() == Ok("debug") {
            println!($($x)*);
        }
    };
}

// Returns the minimum capacity of a freshly built table.
pub fn min_capacity(table: &dyn Fn() -> HashTable) -> usize {
    table().capacity()
}
