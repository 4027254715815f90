use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use crate::raw::Slot;
use crate::HashTable;

/// The text written as both the key and value of a vacant slot.
///
/// A live entry whose key and value are both `"empty"` produces the same
/// record. Use [`HashTable::slots`] to tell them apart in-process.
pub const VACANT: &str = "empty";

/// A record in a table snapshot, describing one slot of the backing array.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotRecord {
    /// The index of the slot.
    pub index: usize,
    /// The key in the slot, or [`VACANT`].
    pub key: String,
    /// The value in the slot, or [`VACANT`].
    pub value: String,
}

impl SlotRecord {
    /// Returns `true` if this record carries the vacant sentinel.
    pub fn is_vacant(&self) -> bool {
        self.key == VACANT && self.value == VACANT
    }
}

// The borrowed form of `SlotRecord` used while exporting.
#[derive(Serialize)]
struct Record<'a> {
    index: usize,
    key: &'a str,
    value: &'a str,
}

impl<'a> Record<'a> {
    fn new(index: usize, slot: &'a Slot) -> Record<'a> {
        let (key, value) = slot.entry().unwrap_or((VACANT, VACANT));
        Record { index, key, value }
    }
}

/// An error encountered while exporting a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The destination could not be opened or written to.
    #[error("failed to write snapshot: {0}")]
    Io(#[from] io::Error),
    /// The snapshot could not be encoded.
    #[error("failed to encode snapshot: {0}")]
    Encode(serde_json::Error),
}

impl From<serde_json::Error> for SnapshotError {
    fn from(err: serde_json::Error) -> SnapshotError {
        if err.is_io() {
            SnapshotError::Io(err.into())
        } else {
            SnapshotError::Encode(err)
        }
    }
}

impl HashTable {
    /// Returns one record per slot of the backing array, in index order.
    ///
    /// Empty slots and tombstones are both reported with [`VACANT`] as key
    /// and value.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("name", "Alice");
    ///
    /// let records = table.snapshot();
    /// assert_eq!(records.len(), table.capacity());
    /// assert_eq!(records.iter().filter(|r| !r.is_vacant()).count(), 1);
    /// ```
    pub fn snapshot(&self) -> Vec<SlotRecord> {
        self.slots()
            .iter()
            .enumerate()
            .map(|(index, slot)| {
                let record = Record::new(index, slot);
                SlotRecord {
                    index,
                    key: record.key.to_owned(),
                    value: record.value.to_owned(),
                }
            })
            .collect()
    }

    /// Writes a snapshot of the table to `writer`.
    ///
    /// The snapshot is a single line of JSON: an array with one
    /// `{"index", "key", "value"}` object per slot, in index order, followed
    /// by a newline. See [`HashTable::snapshot`] for how vacant slots are
    /// encoded.
    ///
    /// # Examples
    ///
    /// ```
    /// use dubhash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("city", "Vancouver");
    ///
    /// let mut out = Vec::new();
    /// table.export_snapshot(&mut out).unwrap();
    /// assert!(out.ends_with(b"\n"));
    /// ```
    pub fn export_snapshot<W: Write>(&self, mut writer: W) -> Result<(), SnapshotError> {
        let records = self
            .slots()
            .iter()
            .enumerate()
            .map(|(index, slot)| Record::new(index, slot));

        let mut serializer = serde_json::Serializer::new(&mut writer);
        Serializer::collect_seq(&mut serializer, records)?;

        writer.write_all(b"\n")?;
        writer.flush()?;

        log::trace!(
            "exported snapshot of {} slots ({} entries)",
            self.capacity(),
            self.len()
        );

        Ok(())
    }

    /// Writes a snapshot of the table to the file at `path`, replacing it if
    /// it exists.
    ///
    /// If writing fails part way, the file is left as is.
    pub fn export_snapshot_to_path(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        let file = File::create(path)?;
        self.export_snapshot(BufWriter::new(file))
    }
}
