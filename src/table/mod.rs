//! Lookup tables used by token filters.
//!
//! Two flavors exist:
//!
//! - [`CounterTable`]: ephemeral key → counter tables created per session by
//!   the frequency-limiting filters.
//! - [`WordTable`]: persistent, named key tables with optional columns (word
//!   lists, synonyms, per-word limits), opened through a [`TableStore`] and
//!   shared read-only across sessions.

pub mod counter;
pub mod store;
pub mod word;

use serde::{Deserialize, Serialize};

pub use counter::CounterTable;
pub use store::{MemoryTableStore, TableDefinition, TableStore, resolve_table};
pub use word::{Column, ColumnValue, WordTable};

/// Identifier of a record within one table.
pub type RecordId = u32;

/// Key type of a table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyType {
    /// Keys of at most [`KeyType::SHORT_TEXT_MAX_LEN`] bytes
    #[default]
    ShortText,
    /// Keys of any length
    Text,
}

impl KeyType {
    /// Maximum key size of a `ShortText` table.
    pub const SHORT_TEXT_MAX_LEN: usize = 4095;

    /// True when `key` can be stored under this key type.
    pub fn accepts(&self, key: &[u8]) -> bool {
        match self {
            KeyType::ShortText => key.len() <= Self::SHORT_TEXT_MAX_LEN,
            KeyType::Text => true,
        }
    }
}
