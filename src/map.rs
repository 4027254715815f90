use crate::raw::{self, Config, Slot};

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// An open-addressing hash table from string keys to string values.
///
/// Collisions are resolved with double hashing over a prime number of slots.
/// Removed entries leave tombstones behind, which are purged whenever the
/// table is resized. The table grows when an insert finds it more than 70%
/// full and shrinks when a removal finds it less than 10% full, but never
/// below its minimum size.
///
/// The table owns a copy of every key and value. Dropping it releases all of
/// them along with the backing array.
///
/// # Examples
///
/// ```
/// use dubhash::HashTable;
///
/// let mut table = HashTable::new();
/// table.insert("name", "Alice");
/// table.insert("city", "Vancouver");
///
/// assert_eq!(table.get("name"), Some("Alice"));
/// assert_eq!(table.get("country"), None);
///
/// table.remove("name");
/// assert_eq!(table.get("name"), None);
/// ```
#[derive(Clone)]
pub struct HashTable {
    raw: raw::Table,
}

/// A builder for a [`HashTable`].
///
/// # Examples
///
/// ```rust
/// use dubhash::HashTable;
///
/// let table = HashTable::builder()
///     // Never shrink below 101 slots.
///     .min_base_size(100)
///     // Grow once more than 60% of the slots are live.
///     .grow_threshold(60)
///     // Shrink once fewer than 5% of the slots are live.
///     .shrink_threshold(5)
///     // Construct the hash table.
///     .build();
///
/// assert_eq!(table.capacity(), 101);
/// ```
pub struct HashTableBuilder {
    capacity: usize,
    config: Config,
}

impl HashTableBuilder {
    /// Set the initial base size of the table.
    ///
    /// The table starts with the smallest prime number of slots at or above
    /// `capacity`, or at the minimum base size if that is larger.
    pub fn capacity(self, capacity: usize) -> HashTableBuilder {
        HashTableBuilder { capacity, ..self }
    }

    /// Set the minimum base size of the table.
    ///
    /// New tables start at this size, and removals never shrink the table
    /// below it. Defaults to [`INITIAL_BASE_SIZE`](crate::INITIAL_BASE_SIZE).
    pub fn min_base_size(mut self, min_base_size: usize) -> HashTableBuilder {
        self.config.min_base_size = min_base_size;
        self
    }

    /// Set the load percentage above which an insert grows the table.
    ///
    /// Defaults to [`GROW_THRESHOLD`](crate::GROW_THRESHOLD).
    pub fn grow_threshold(mut self, percent: usize) -> HashTableBuilder {
        self.config.grow_threshold = percent;
        self
    }

    /// Set the load percentage below which a removal shrinks the table.
    ///
    /// Must be below half the grow threshold.
    ///
    /// Defaults to [`SHRINK_THRESHOLD`](crate::SHRINK_THRESHOLD).
    pub fn shrink_threshold(mut self, percent: usize) -> HashTableBuilder {
        self.config.shrink_threshold = percent;
        self
    }

    /// Construct a [`HashTable`] from the builder, using the configured options.
    ///
    /// # Panics
    ///
    /// Panics if the minimum base size is zero, if the grow threshold is not
    /// below 100, or if the shrink threshold is not below half the grow
    /// threshold. Shrinking halves the table, so a higher shrink threshold
    /// could leave it fuller than the grow threshold allows.
    pub fn build(self) -> HashTable {
        let Config {
            min_base_size,
            grow_threshold,
            shrink_threshold,
        } = self.config;

        assert!(min_base_size > 0, "minimum base size must be non-zero");
        assert!(grow_threshold < 100, "grow threshold must be below 100%");
        assert!(
            shrink_threshold * 2 < grow_threshold,
            "shrink threshold must be below half the grow threshold"
        );

        HashTable {
            raw: raw::Table::with_base_size(self.capacity, self.config),
        }
    }
}

impl fmt::Debug for HashTableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTableBuilder")
            .field("capacity", &self.capacity)
            .field("min_base_size", &self.config.min_base_size)
            .field("grow_threshold", &self.config.grow_threshold)
            .field("shrink_threshold", &self.config.shrink_threshold)
            .finish()
    }
}

impl HashTable {
    /// Creates an empty `HashTable` at the minimum size.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    /// let table = HashTable::new();
    /// assert_eq!(table.capacity(), 53);
    /// ```
    pub fn new() -> HashTable {
        HashTable {
            raw: raw::Table::new(Config::default()),
        }
    }

    /// Creates an empty `HashTable` with a base size of at least `capacity`.
    ///
    /// The minimum size of the table is unaffected, so removals may later
    /// shrink it below `capacity`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    /// let table = HashTable::with_capacity(1000);
    /// assert_eq!(table.capacity(), 1009);
    /// ```
    pub fn with_capacity(capacity: usize) -> HashTable {
        HashTable::builder().capacity(capacity).build()
    }

    /// Returns a builder for a `HashTable`.
    ///
    /// The builder can be used to configure the minimum size and the resize
    /// thresholds of the table.
    pub fn builder() -> HashTableBuilder {
        HashTableBuilder {
            capacity: 0,
            config: Config::default(),
        }
    }

    /// Returns the number of entries in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("a", "1");
    /// table.insert("a", "2");
    /// assert_eq!(table.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the table contains no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the backing array.
    ///
    /// This is always a prime number.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }

    /// Returns the base size the current capacity was derived from.
    #[inline]
    pub fn base_size(&self) -> usize {
        self.raw.base_size()
    }

    /// Returns the percentage of slots holding live entries, rounded down.
    #[inline]
    pub fn load_factor(&self) -> usize {
        self.raw.load()
    }

    /// Returns the number of removed entries whose slots have not been
    /// reclaimed yet.
    #[inline]
    pub fn tombstones(&self) -> usize {
        self.raw.tombstones()
    }

    /// Returns the slots of the backing array, in index order.
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        self.raw.slots()
    }

    /// Returns `true` if the table contains a value for the specified key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("name", "Alice");
    /// assert!(table.contains_key("name"));
    /// assert!(!table.contains_key("age"));
    /// ```
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.raw.find(key).is_some()
    }

    /// Returns the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("name", "Alice");
    /// assert_eq!(table.get("name"), Some("Alice"));
    /// assert_eq!(table.get("country"), None);
    /// ```
    #[inline]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.raw.get(key)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    #[inline]
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &str)> {
        self.raw.get_key_value(key)
    }

    /// Inserts a key-value pair into the table.
    ///
    /// If the table did not have this key present, `None` is returned. If it
    /// did, the value is replaced in place and the old value is returned.
    ///
    /// The table grows before inserting if it is more than 70% full.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// assert_eq!(table.insert("age", "25"), None);
    /// assert_eq!(table.insert("age", "26").as_deref(), Some("25"));
    /// assert_eq!(table.get("age"), Some("26"));
    /// ```
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.raw.insert(key.into(), value.into())
    }

    /// Removes a key from the table, returning its value if it was present.
    ///
    /// Removing a missing key is a no-op. The table shrinks before removing
    /// if it is less than 10% full.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("age", "25");
    /// assert_eq!(table.remove("age").as_deref(), Some("25"));
    /// assert_eq!(table.remove("age"), None);
    /// ```
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.raw.remove(key)
    }

    /// Clears the table, removing all entries and returning to the minimum
    /// size.
    pub fn clear(&mut self) {
        self.raw.clear()
    }

    /// An iterator visiting all key-value pairs in arbitrary order.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("a", "1");
    /// table.insert("b", "2");
    ///
    /// let mut entries: Vec<_> = table.iter().collect();
    /// entries.sort();
    /// assert_eq!(entries, [("a", "1"), ("b", "2")]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.raw.slots().iter(),
            remaining: self.len(),
        }
    }

    /// An iterator visiting all keys in arbitrary order.
    #[inline]
    pub fn keys(&self) -> Keys<'_> {
        Keys { iter: self.iter() }
    }

    /// An iterator visiting all values in arbitrary order.
    #[inline]
    pub fn values(&self) -> Values<'_> {
        Values { iter: self.iter() }
    }
}

impl Default for HashTable {
    fn default() -> Self {
        HashTable::new()
    }
}

impl PartialEq for HashTable {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }

        self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl Eq for HashTable {}

impl fmt::Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Extend<(K, V)> for HashTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut table = HashTable::new();
        table.extend(iter);
        table
    }
}

impl<'a> IntoIterator for &'a HashTable {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An iterator over a table's entries.
///
/// This struct is created by the [`iter`](HashTable::iter) method on [`HashTable`].
pub struct Iter<'a> {
    slots: slice::Iter<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(entry)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

impl Clone for Iter<'_> {
    fn clone(&self) -> Self {
        Iter {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a table's keys.
///
/// This struct is created by the [`keys`](HashTable::keys) method on [`HashTable`].
#[derive(Clone)]
pub struct Keys<'a> {
    iter: Iter<'a>,
}

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}
impl FusedIterator for Keys<'_> {}

impl fmt::Debug for Keys<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over a table's values.
///
/// This struct is created by the [`values`](HashTable::values) method on [`HashTable`].
#[derive(Clone)]
pub struct Values<'a> {
    iter: Iter<'a>,
}

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl ExactSizeIterator for Values<'_> {}
impl FusedIterator for Values<'_> {}

impl fmt::Debug for Values<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
