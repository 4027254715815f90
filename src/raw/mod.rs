pub mod prime;
mod probe;

use std::mem;

use self::probe::Probe;

pub use self::probe::{HASH_PRIME_A, HASH_PRIME_B};

/// The default minimum base size of a table.
///
/// A table never shrinks below `next_prime(INITIAL_BASE_SIZE)` slots.
pub const INITIAL_BASE_SIZE: usize = 50;

/// The default load percentage above which an insert grows the table.
pub const GROW_THRESHOLD: usize = 70;

/// The default load percentage below which a removal shrinks the table.
pub const SHRINK_THRESHOLD: usize = 10;

/// A slot in the backing array of a [`HashTable`](crate::HashTable).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Slot {
    /// The slot has not been occupied since the table was last resized.
    #[default]
    Empty,
    /// The slot held an entry that was removed.
    ///
    /// Lookups continue probing past a tombstone, and inserts may reclaim it.
    Tombstone,
    /// The slot holds a live entry.
    Occupied { key: String, value: String },
}

impl Slot {
    /// Returns `true` if the slot holds a live entry.
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }

    /// Returns the entry in this slot, if any.
    pub fn entry(&self) -> Option<(&str, &str)> {
        match self {
            Slot::Occupied { key, value } => Some((key.as_str(), value.as_str())),
            _ => None,
        }
    }
}

// Sizing and resizing parameters of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    // The smallest base size the table is created with or resized to.
    pub min_base_size: usize,
    // Inserts grow the table when the load percentage is above this value.
    pub grow_threshold: usize,
    // Removals shrink the table when the load percentage is below this value.
    pub shrink_threshold: usize,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            min_base_size: INITIAL_BASE_SIZE,
            grow_threshold: GROW_THRESHOLD,
            shrink_threshold: SHRINK_THRESHOLD,
        }
    }
}

// The result of probing for a key that is about to be inserted.
enum Lookup {
    // The key is live at this index.
    Occupied(usize),
    // The key is absent and can be placed at this index.
    Vacant(usize),
    // Every slot was visited without finding the key or a free slot.
    Full,
}

// An open-addressing table of string entries.
#[derive(Clone)]
pub struct Table {
    slots: Box<[Slot]>,
    // The logical size the slot count is derived from.
    base_size: usize,
    // The number of occupied slots.
    count: usize,
    // The number of tombstones.
    tombstones: usize,
    config: Config,
}

impl Table {
    // Create an empty table at the minimum base size.
    pub fn new(config: Config) -> Table {
        Table::with_base_size(config.min_base_size, config)
    }

    // Create an empty table with `next_prime(base_size)` slots.
    pub fn with_base_size(base_size: usize, config: Config) -> Table {
        let base_size = base_size.max(config.min_base_size);
        let capacity = prime::next_prime(base_size);

        Table {
            slots: vec![Slot::Empty; capacity].into_boxed_slice(),
            base_size,
            count: 0,
            tombstones: 0,
            config,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn base_size(&self) -> usize {
        self.base_size
    }

    #[inline]
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    // The percentage of slots holding live entries, rounded down.
    #[inline]
    pub fn load(&self) -> usize {
        self.count * 100 / self.capacity()
    }

    // Returns the index of the live entry for `key`.
    pub fn find(&self, key: &str) -> Option<usize> {
        let mut probe = Probe::start(key, self.capacity());

        while !probe.exhausted() {
            match &self.slots[probe.i] {
                // the key would have been placed here or earlier
                Slot::Empty => return None,
                Slot::Occupied { key: found, .. } if found == key => return Some(probe.i),
                // a tombstone or a different key, keep searching
                _ => {}
            }

            probe.next();
        }

        None
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_key_value(key).map(|(_, value)| value)
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&str, &str)> {
        let i = self.find(key)?;
        self.slots[i].entry()
    }

    // Probe for the slot `key` should be written to.
    fn lookup(&self, key: &str) -> Lookup {
        let mut probe = Probe::start(key, self.capacity());
        let mut tombstone = None;

        while !probe.exhausted() {
            match &self.slots[probe.i] {
                // the key is absent, prefer reusing the first tombstone on the path
                Slot::Empty => return Lookup::Vacant(tombstone.unwrap_or(probe.i)),
                Slot::Tombstone => {
                    tombstone.get_or_insert(probe.i);
                }
                Slot::Occupied { key: found, .. } if found == key => {
                    return Lookup::Occupied(probe.i)
                }
                Slot::Occupied { .. } => {}
            }

            probe.next();
        }

        match tombstone {
            Some(i) => Lookup::Vacant(i),
            None => Lookup::Full,
        }
    }

    // Insert an entry, returning the previous value for the key.
    pub fn insert(&mut self, key: String, value: String) -> Option<String> {
        if self.load() > self.config.grow_threshold {
            self.grow();
        }

        let i = loop {
            match self.lookup(&key) {
                Lookup::Occupied(i) => {
                    return match &mut self.slots[i] {
                        Slot::Occupied { value: current, .. } => {
                            Some(mem::replace(current, value))
                        }
                        _ => unreachable!(),
                    };
                }
                Lookup::Vacant(i) => break i,
                // every slot is live, which a grow threshold below 100% rules out
                Lookup::Full => self.grow(),
            }
        };

        if let Slot::Tombstone = self.slots[i] {
            self.tombstones -= 1;
        }

        self.slots[i] = Slot::Occupied { key, value };
        self.count += 1;
        None
    }

    // Remove the entry for `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        if self.load() < self.config.shrink_threshold {
            self.shrink();
        }

        let i = self.find(key)?;

        match mem::replace(&mut self.slots[i], Slot::Tombstone) {
            Slot::Occupied { value, .. } => {
                self.count -= 1;
                self.tombstones += 1;
                Some(value)
            }
            _ => unreachable!(),
        }
    }

    // Drop every entry and return to the minimum base size.
    pub fn clear(&mut self) {
        *self = Table::new(self.config);
    }

    fn grow(&mut self) {
        let base_size = self.base_size.checked_mul(2).expect("capacity overflow");
        self.resize(base_size);
    }

    fn shrink(&mut self) {
        self.resize(self.base_size / 2);
    }

    // Rebuild the table around a new base size.
    //
    // Every live entry is rehashed into a fresh slot array and tombstones are
    // dropped. Resizing below the minimum base size, or to fewer slots than
    // there are live entries, is ignored.
    pub fn resize(&mut self, base_size: usize) {
        if base_size < self.config.min_base_size {
            log::debug!(
                "skipping resize to base size {base_size}, below the minimum of {}",
                self.config.min_base_size
            );
            return;
        }

        // the new table needs at least one empty slot to terminate probes
        if prime::next_prime(base_size) <= self.count {
            log::debug!(
                "skipping resize to base size {base_size}, too small for {} entries",
                self.count
            );
            return;
        }

        let mut new = Table::with_base_size(base_size, self.config);
        let capacity = self.capacity();
        let old = mem::take(&mut self.slots);

        for slot in old.into_vec() {
            if let Slot::Occupied { key, value } = slot {
                new.place(key, value);
            }
        }

        log::debug!(
            "resized table from {} to {} slots ({} entries, {} tombstones purged)",
            capacity,
            new.capacity(),
            new.count,
            self.tombstones
        );

        *self = new;
    }

    // Place an entry known to be absent into a table without tombstones.
    fn place(&mut self, key: String, value: String) {
        let mut probe = Probe::start(&key, self.capacity());

        while self.slots[probe.i].is_occupied() {
            probe.next();
        }

        self.slots[probe.i] = Slot::Occupied { key, value };
        self.count += 1;
    }
}
