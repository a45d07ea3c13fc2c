//! Table store abstraction and the in-memory implementation.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use log::debug;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::error::{Result, YatofError};
use crate::table::counter::CounterTable;
use crate::table::word::{ColumnValue, WordTable};
use crate::table::KeyType;

/// A source of lookup tables for token filters.
///
/// Persistent tables are opened by name and shared read-only across
/// sessions. Ephemeral counter tables are created per session.
pub trait TableStore: Send + Sync + fmt::Debug {
    /// Open an existing persistent table.
    fn open_table(&self, name: &str) -> Option<Arc<WordTable>>;

    /// Names of all persistent tables.
    fn table_names(&self) -> Vec<String>;

    /// Create a session-local counter table.
    fn create_ephemeral(&self, key_type: KeyType) -> CounterTable {
        CounterTable::new(key_type)
    }
}

/// Open a table by its configured name, falling back to a default and then
/// a legacy name when no name is configured.
///
/// An explicitly configured name must exist; it does not fall back.
pub fn resolve_table(
    store: &dyn TableStore,
    configured: Option<&str>,
    default_name: &str,
    legacy_name: &str,
) -> Result<Arc<WordTable>> {
    if let Some(name) = configured {
        return store
            .open_table(name)
            .ok_or_else(|| YatofError::table_not_found(name));
    }

    if let Some(table) = store.open_table(default_name) {
        return Ok(table);
    }

    match store.open_table(legacy_name) {
        Some(table) => {
            debug!("table '{default_name}' not found, using legacy table '{legacy_name}'");
            Ok(table)
        }
        None => Err(YatofError::table_not_found(format!(
            "{default_name} (or legacy {legacy_name})"
        ))),
    }
}

/// Definition of one table in the JSON table format.
///
/// ```json
/// {
///   "ignore_words": { "keys": ["the", "a"] },
///   "synonyms": { "columns": { "synonym": { "ny": "New York" } } },
///   "tf_limit_words": { "columns": { "tf_limit": { "the": 10 } } }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TableDefinition {
    /// Keys without column values
    #[serde(default)]
    pub keys: Vec<String>,

    /// Column name → key → value; keys are added to the table
    #[serde(default)]
    pub columns: BTreeMap<String, BTreeMap<String, ColumnValue>>,
}

impl TableDefinition {
    /// Build the table this definition describes.
    pub fn build(&self, name: &str) -> WordTable {
        let mut table = WordTable::from_words(name, &self.keys);
        for (column, values) in &self.columns {
            table.add_column(column);
            for (key, value) in values {
                table.set_value(key.as_bytes(), column, value.clone());
            }
        }
        table
    }
}

/// An in-memory table store.
///
/// Registration happens out-of-band; sessions only read through
/// [`TableStore::open_table`], which hands out shared `Arc`s.
#[derive(Debug, Default)]
pub struct MemoryTableStore {
    tables: RwLock<AHashMap<String, Arc<WordTable>>>,
}

impl MemoryTableStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryTableStore {
            tables: RwLock::new(AHashMap::new()),
        }
    }

    /// Register a table under its own name, replacing any previous one.
    pub fn register(&self, table: WordTable) -> Arc<WordTable> {
        let table = Arc::new(table);
        self.tables
            .write()
            .insert(table.name().to_string(), Arc::clone(&table));
        table
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_table(self, table: WordTable) -> Self {
        self.register(table);
        self
    }

    /// Remove a table. Sessions already holding it keep their reference.
    pub fn remove(&self, name: &str) -> Option<Arc<WordTable>> {
        self.tables.write().remove(name)
    }

    /// Build a store from table definitions.
    pub fn from_definitions(definitions: &BTreeMap<String, TableDefinition>) -> Self {
        let store = Self::new();
        for (name, definition) in definitions {
            store.register(definition.build(name));
        }
        store
    }

    /// Load a store from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let definitions: BTreeMap<String, TableDefinition> = serde_json::from_str(json)?;
        Ok(Self::from_definitions(&definitions))
    }

    /// Load a store from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            YatofError::table(format!(
                "Failed to read table file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let store = Self::from_json_str(&content)?;
        debug!(
            "loaded {} tables from '{}'",
            store.tables.read().len(),
            path.display()
        );
        Ok(store)
    }
}

impl TableStore for MemoryTableStore {
    fn open_table(&self, name: &str) -> Option<Arc<WordTable>> {
        self.tables.read().get(name).cloned()
    }

    fn table_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tables.read().keys().cloned().collect();
        names.sort();
        names
    }
}
