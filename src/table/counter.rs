//! Ephemeral counter tables.

use ahash::AHashMap;

use crate::table::{KeyType, RecordId};

/// A session-local key → counter table.
///
/// Created fresh for every tokenization session by the frequency-limiting
/// filters and dropped with the session. Never visible outside it.
#[derive(Debug, Clone)]
pub struct CounterTable {
    key_type: KeyType,
    ids: AHashMap<Vec<u8>, RecordId>,
    counters: Vec<u64>,
}

impl CounterTable {
    /// Create an empty counter table.
    pub fn new(key_type: KeyType) -> Self {
        CounterTable {
            key_type,
            ids: AHashMap::new(),
            counters: Vec::new(),
        }
    }

    pub fn key_type(&self) -> KeyType {
        self.key_type
    }

    /// Look up `key`, adding it with a zero counter if absent.
    ///
    /// Returns `None` when the key cannot be stored under this table's key
    /// type.
    pub fn add_or_get(&mut self, key: &[u8]) -> Option<RecordId> {
        if let Some(&id) = self.ids.get(key) {
            return Some(id);
        }
        if !self.key_type.accepts(key) {
            return None;
        }
        let id = self.counters.len() as RecordId;
        self.counters.push(0);
        self.ids.insert(key.to_vec(), id);
        Some(id)
    }

    /// Look up `key` without adding it.
    pub fn get(&self, key: &[u8]) -> Option<RecordId> {
        self.ids.get(key).copied()
    }

    /// Counter value of a record; 0 for unknown ids.
    pub fn counter(&self, id: RecordId) -> u64 {
        self.counters.get(id as usize).copied().unwrap_or(0)
    }

    /// Store a counter value. Unknown ids are ignored.
    pub fn set_counter(&mut self, id: RecordId, value: u64) {
        if let Some(counter) = self.counters.get_mut(id as usize) {
            *counter = value;
        }
    }

    /// Add-if-absent, fetch, increment and store. Returns the new count.
    pub fn increment(&mut self, key: &[u8]) -> Option<u64> {
        let id = self.add_or_get(key)?;
        let count = self.counter(id).saturating_add(1);
        self.set_counter(id, count);
        Some(count)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.counters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_or_get() {
        let mut table = CounterTable::new(KeyType::ShortText);
        let a = table.add_or_get(b"a").unwrap();
        let b = table.add_or_get(b"b").unwrap();
        assert_ne!(a, b);
        assert_eq!(table.add_or_get(b"a"), Some(a));
        assert_eq!(table.len(), 2);
        assert_eq!(table.counter(a), 0);
    }

    #[test]
    fn test_counter_roundtrip() {
        let mut table = CounterTable::new(KeyType::ShortText);
        let id = table.add_or_get(b"word").unwrap();
        table.set_counter(id, 41);
        assert_eq!(table.counter(id), 41);
        assert_eq!(table.increment(b"word"), Some(42));
        assert_eq!(table.counter(999), 0);
    }

    #[test]
    fn test_increment() {
        let mut table = CounterTable::new(KeyType::Text);
        assert_eq!(table.increment(b"x"), Some(1));
        assert_eq!(table.increment(b"x"), Some(2));
        assert_eq!(table.increment(b"y"), Some(1));
        assert_eq!(table.get(b"z"), None);
    }

    #[test]
    fn test_short_text_rejects_long_keys() {
        let mut table = CounterTable::new(KeyType::ShortText);
        let long_key = vec![b'a'; KeyType::SHORT_TEXT_MAX_LEN + 1];
        assert_eq!(table.add_or_get(&long_key), None);
        assert_eq!(table.increment(&long_key), None);
        assert!(table.is_empty());

        let mut table = CounterTable::new(KeyType::Text);
        assert!(table.add_or_get(&long_key).is_some());
    }
}
