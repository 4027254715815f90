use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt::{self, Formatter};

use crate::HashTable;

struct MapVisitor;

impl Serialize for HashTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self)
    }
}

impl<'de> Deserialize<'de> for HashTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(MapVisitor)
    }
}

impl<'de> Visitor<'de> for MapVisitor {
    type Value = HashTable;

    fn expecting(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "a map of strings to strings")
    }

    fn visit_map<M>(self, mut access: M) -> Result<Self::Value, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut table = match access.size_hint() {
            Some(size) => HashTable::with_capacity(size.min(4096) * 2),
            None => HashTable::new(),
        };

        while let Some((key, value)) = access.next_entry::<String, String>()? {
            table.insert(key, value);
        }

        Ok(table)
    }
}

#[cfg(test)]
mod test {
    use crate::HashTable;

    #[test]
    fn test_table() {
        let mut table = HashTable::new();
        table.insert("name", "Alice");
        table.insert("age", "25");
        table.insert("city", "Vancouver");

        let serialized = serde_json::to_string(&table).unwrap();
        let deserialized: HashTable = serde_json::from_str(&serialized).unwrap();

        assert_eq!(table, deserialized);
    }

    #[test]
    fn test_duplicate_keys() {
        let table: HashTable = serde_json::from_str(r#"{"a":"1","b":"2","a":"3"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a"), Some("3"));
    }

    #[test]
    fn test_rejects_non_strings() {
        assert!(serde_json::from_str::<HashTable>(r#"{"a":1}"#).is_err());
        assert!(serde_json::from_str::<HashTable>(r#"["a","b"]"#).is_err());
    }
}
