//! Token filter implementations.
//!
//! A token filter has a two-level lifecycle:
//!
//! - [`Filter`] is the registered, shareable description of a filter. Its
//!   [`create`](Filter::create) call resolves configuration and lookup tables
//!   once per tokenization session and returns a [`FilterState`].
//! - [`FilterState`] is owned exclusively by one session. It sees every token
//!   through [`apply`](FilterState::apply) and is destroyed by dropping it.
//!
//! `apply` receives the token as it entered the filter (`current`) and a
//! `next` handle that starts as a copy of it. A filter rewrites `next.data`
//! or adds status flags to `next`; it never clears a flag.
//!
//! # Available Filters
//!
//! - [`length::MaxLengthFilter`] / [`length::MinLengthFilter`] - Byte-length bounds
//! - [`purity::SymbolFilter`] / [`purity::DigitFilter`] - Skip all-symbol / all-digit tokens
//! - [`prolong::ProlongFilter`] - Strip a trailing katakana prolonged sound mark
//! - [`atgc::AtgcFilter`] - Skip nucleotide sequences
//! - [`unmatured::UnmaturedOneCharFilter`] - Skip unmatured single characters
//! - [`tf_limit::TfLimitFilter`] - Cap per-session term frequency
//! - [`phrase_limit::PhraseLimitFilter`] - Cap per-session token-pair frequency
//! - [`word_list::WordListFilter`] - Ignore / remove / through / white word lists
//! - [`synonym::SynonymFilter`] - Replace tokens by synonyms
//!
//! # Examples
//!
//! ```
//! use yatof::analysis::token::{Token, TokenStatus};
//! use yatof::analysis::token_filter::{Filter, FilterContext, FilterState};
//! use yatof::analysis::token_filter::length::MinLengthFilter;
//!
//! let context = FilterContext::default();
//! let mut state = MinLengthFilter::new().create(&context).unwrap();
//!
//! let current = Token::new("ab", 0);
//! let mut next = current.clone();
//! state.apply(&current, &mut next);
//! assert!(next.status().contains(TokenStatus::SKIP_WITH_POSITION));
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::char_class::Encoding;
use crate::analysis::token::{Token, TokenStatus};
use crate::config::FilterConfig;
use crate::error::Result;
use crate::table::{MemoryTableStore, TableStore};

/// A registered token filter.
///
/// The trait requires `Send + Sync` so one chain can open sessions on many
/// threads.
pub trait Filter: Send + Sync {
    /// Create the per-session state of this filter.
    ///
    /// Fails when a required lookup table or column is missing; the
    /// surrounding session is aborted.
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>>;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// The per-session state of a token filter.
///
/// Dropping the state destroys it.
pub trait FilterState: Send {
    /// Inspect `current` and record the filter's decision on `next`.
    fn apply(&mut self, current: &Token, next: &mut Token);
}

/// Everything a filter may consult while creating its state.
#[derive(Clone)]
pub struct FilterContext {
    config: Arc<FilterConfig>,
    tables: Arc<dyn TableStore>,
    encoding: Encoding,
}

impl FilterContext {
    /// Create a context over a configuration and a table store.
    pub fn new(config: FilterConfig, tables: Arc<dyn TableStore>) -> Self {
        FilterContext {
            config: Arc::new(config),
            tables,
            encoding: Encoding::default(),
        }
    }

    /// Set the session encoding.
    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn tables(&self) -> &dyn TableStore {
        self.tables.as_ref()
    }

    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new(FilterConfig::default(), Arc::new(MemoryTableStore::new()))
    }
}

impl fmt::Debug for FilterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterContext")
            .field("config", &self.config)
            .field("tables", &self.tables.table_names())
            .field("encoding", &self.encoding)
            .finish()
    }
}

/// Flag `next` with the status of `current` plus `flag`.
pub(crate) fn mark(current: &Token, next: &mut Token, flag: TokenStatus) {
    next.set_status(next.status() | current.status() | flag);
}

// Individual filter modules
pub mod atgc;
pub mod length;
pub mod phrase_limit;
pub mod prolong;
pub mod purity;
pub mod registry;
pub mod synonym;
pub mod tf_limit;
pub mod unmatured;
pub mod word_list;

// Re-export all filters for convenient access
pub use atgc::AtgcFilter;
pub use length::{MaxLengthFilter, MinLengthFilter};
pub use phrase_limit::PhraseLimitFilter;
pub use prolong::ProlongFilter;
pub use purity::{DigitFilter, SymbolFilter};
pub use registry::FilterKind;
pub use synonym::SynonymFilter;
pub use tf_limit::TfLimitFilter;
pub use unmatured::UnmaturedOneCharFilter;
pub use word_list::{WordListFilter, WordListMode};
