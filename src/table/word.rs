//! Persistent word tables with named columns.

use std::borrow::Cow;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::table::RecordId;

/// A value stored in a word table column.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnValue {
    /// Unsigned integer, e.g. a per-word frequency limit
    UInt(u64),
    /// Text, e.g. a synonym replacement
    Text(String),
}

impl ColumnValue {
    /// The value as an unsigned integer, if it is one.
    pub fn as_uint(&self) -> Option<u64> {
        match self {
            ColumnValue::UInt(value) => Some(*value),
            ColumnValue::Text(_) => None,
        }
    }

    /// The value rendered as bytes.
    pub fn as_bytes(&self) -> Cow<'_, [u8]> {
        match self {
            ColumnValue::UInt(value) => Cow::Owned(value.to_string().into_bytes()),
            ColumnValue::Text(text) => Cow::Borrowed(text.as_bytes()),
        }
    }
}

impl From<u64> for ColumnValue {
    fn from(value: u64) -> Self {
        ColumnValue::UInt(value)
    }
}

impl From<&str> for ColumnValue {
    fn from(value: &str) -> Self {
        ColumnValue::Text(value.to_string())
    }
}

/// A named column of a [`WordTable`], indexed by record id.
#[derive(Clone, Debug, Default)]
pub struct Column {
    name: String,
    values: Vec<Option<ColumnValue>>,
}

impl Column {
    fn new(name: &str) -> Self {
        Column {
            name: name.to_string(),
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of a record, if one was stored.
    pub fn value(&self, id: RecordId) -> Option<&ColumnValue> {
        self.values.get(id as usize).and_then(Option::as_ref)
    }

    fn set(&mut self, id: RecordId, value: ColumnValue) {
        let index = id as usize;
        if self.values.len() <= index {
            self.values.resize(index + 1, None);
        }
        self.values[index] = Some(value);
    }
}

/// A named key table shared read-only by tokenization sessions.
///
/// Built out-of-band (see [`MemoryTableStore`](crate::table::MemoryTableStore))
/// and handed to filters behind an `Arc`.
#[derive(Clone, Debug, Default)]
pub struct WordTable {
    name: String,
    ids: AHashMap<Vec<u8>, RecordId>,
    columns: AHashMap<String, Column>,
}

impl WordTable {
    /// Create an empty table.
    pub fn new<S: Into<String>>(name: S) -> Self {
        WordTable {
            name: name.into(),
            ids: AHashMap::new(),
            columns: AHashMap::new(),
        }
    }

    /// Create a key-only table from a list of words.
    pub fn from_words<S, I, W>(name: S, words: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = W>,
        W: AsRef<[u8]>,
    {
        let mut table = Self::new(name);
        for word in words {
            table.add(word.as_ref());
        }
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Add a key, returning its record id. Existing keys keep their id.
    pub fn add(&mut self, key: &[u8]) -> RecordId {
        if let Some(&id) = self.ids.get(key) {
            return id;
        }
        let id = self.ids.len() as RecordId;
        self.ids.insert(key.to_vec(), id);
        id
    }

    /// Look up a key.
    pub fn get(&self, key: &[u8]) -> Option<RecordId> {
        self.ids.get(key).copied()
    }

    pub fn contains(&self, key: &[u8]) -> bool {
        self.ids.contains_key(key)
    }

    /// Store a column value for a key, adding the key and column as needed.
    pub fn set_value<V: Into<ColumnValue>>(&mut self, key: &[u8], column: &str, value: V) {
        let id = self.add(key);
        self.columns
            .entry(column.to_string())
            .or_insert_with(|| Column::new(column))
            .set(id, value.into());
    }

    /// Declare a column without values.
    pub fn add_column(&mut self, column: &str) {
        self.columns
            .entry(column.to_string())
            .or_insert_with(|| Column::new(column));
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Value of `column` for `id`.
    pub fn value(&self, id: RecordId, column: &str) -> Option<&ColumnValue> {
        self.column(column).and_then(|c| c.value(id))
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_words() {
        let table = WordTable::from_words("ignore_words", ["the", "a", "the"]);
        assert_eq!(table.name(), "ignore_words");
        assert_eq!(table.len(), 2);
        assert!(table.contains(b"the"));
        assert!(!table.contains(b"an"));
    }

    #[test]
    fn test_columns() {
        let mut table = WordTable::new("synonyms");
        table.set_value(b"ny", "synonym", "New York");
        table.add(b"la");

        let ny = table.get(b"ny").unwrap();
        let la = table.get(b"la").unwrap();
        assert_eq!(
            table.value(ny, "synonym"),
            Some(&ColumnValue::Text("New York".to_string()))
        );
        assert_eq!(table.value(la, "synonym"), None);
        assert_eq!(table.value(ny, "missing"), None);
        assert!(table.has_column("synonym"));
    }

    #[test]
    fn test_column_value_rendering() {
        assert_eq!(ColumnValue::UInt(10).as_uint(), Some(10));
        assert_eq!(ColumnValue::UInt(10).as_bytes().as_ref(), b"10");
        assert_eq!(ColumnValue::from("x").as_uint(), None);
        assert_eq!(ColumnValue::from("x").as_bytes().as_ref(), b"x");
    }
}
