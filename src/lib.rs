#![doc = include_str!("../README.md")]

mod map;
mod raw;
mod serde_impls;
mod snapshot;

pub use map::{HashTable, HashTableBuilder, Iter, Keys, Values};
pub use raw::prime::{is_prime, next_prime};
pub use raw::{
    Slot, GROW_THRESHOLD, HASH_PRIME_A, HASH_PRIME_B, INITIAL_BASE_SIZE, SHRINK_THRESHOLD,
};
pub use snapshot::{SlotRecord, SnapshotError, VACANT};
