//! Word-list filters.
//!
//! Four filters share one shape: a persistent word table is opened at
//! creation and every token is looked up in it. They differ in which side of
//! the lookup is skipped, and in how:
//!
//! | mode    | skips tokens | flag                 | position  |
//! |---------|--------------|----------------------|-----------|
//! | Ignore  | in the list  | `SKIP_WITH_POSITION` | reserved  |
//! | Remove  | in the list  | `SKIP`               | dropped   |
//! | Through | not in list  | `SKIP_WITH_POSITION` | reserved  |
//! | White   | not in list  | `SKIP`               | dropped   |
//!
//! The table is resolved from the configured name, else the mode's default
//! name, else its legacy name. A missing table fails filter creation.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use yatof::analysis::token::{Token, TokenStatus};
//! use yatof::analysis::token_filter::{Filter, FilterContext, FilterState, WordListFilter};
//! use yatof::config::FilterConfig;
//! use yatof::table::{MemoryTableStore, WordTable};
//!
//! let store = MemoryTableStore::new()
//!     .with_table(WordTable::from_words("remove_words", ["the"]));
//! let context = FilterContext::new(FilterConfig::default(), Arc::new(store));
//! let mut state = WordListFilter::remove().create(&context).unwrap();
//!
//! let current = Token::new("the", 0);
//! let mut next = current.clone();
//! state.apply(&current, &mut next);
//! assert!(next.status().contains(TokenStatus::SKIP));
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use super::{Filter, FilterContext, FilterState, mark};

use crate::analysis::token::{Token, TokenStatus};
use crate::config::FilterConfig;
use crate::error::Result;
use crate::table::{WordTable, resolve_table};

/// Which tokens a word-list filter skips, and how.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WordListMode {
    /// Skip listed words, keeping their position
    Ignore,
    /// Remove listed words entirely
    Remove,
    /// Skip unlisted words, keeping their position
    Through,
    /// Remove unlisted words entirely
    White,
}

impl WordListMode {
    /// Default table name.
    pub fn default_table(&self) -> &'static str {
        match self {
            WordListMode::Ignore => "ignore_words",
            WordListMode::Remove => "remove_words",
            WordListMode::Through => "through_words",
            WordListMode::White => "white_words",
        }
    }

    /// Table name used by earlier releases, tried when the default is absent.
    pub fn legacy_table(&self) -> &'static str {
        match self {
            WordListMode::Ignore => "IgnoreWords",
            WordListMode::Remove => "RemoveWords",
            WordListMode::Through => "ThroughWords",
            WordListMode::White => "WhiteWords",
        }
    }

    /// The configured table name for this mode, if any.
    pub fn configured_table<'a>(&self, config: &'a FilterConfig) -> Option<&'a str> {
        match self {
            WordListMode::Ignore => config.ignore_word_table.as_deref(),
            WordListMode::Remove => config.remove_word_table.as_deref(),
            WordListMode::Through => config.through_word_table.as_deref(),
            WordListMode::White => config.white_word_table.as_deref(),
        }
    }

    /// True when listed words are skipped; false when unlisted words are.
    pub fn skips_listed(&self) -> bool {
        matches!(self, WordListMode::Ignore | WordListMode::Remove)
    }

    /// The flag set on skipped tokens.
    pub fn flag(&self) -> TokenStatus {
        match self {
            WordListMode::Ignore | WordListMode::Through => TokenStatus::SKIP_WITH_POSITION,
            WordListMode::Remove | WordListMode::White => TokenStatus::SKIP,
        }
    }

    fn filter_name(&self) -> &'static str {
        match self {
            WordListMode::Ignore => "ignore_word",
            WordListMode::Remove => "remove_word",
            WordListMode::Through => "through_word",
            WordListMode::White => "white_word",
        }
    }
}

impl fmt::Display for WordListMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.filter_name())
    }
}

/// Skips tokens by membership in a word table.
#[derive(Clone, Debug)]
pub struct WordListFilter {
    mode: WordListMode,
    table_name: Option<String>,
}

impl WordListFilter {
    /// Create a word-list filter of the given mode.
    pub fn new(mode: WordListMode) -> Self {
        WordListFilter {
            mode,
            table_name: None,
        }
    }

    pub fn ignore() -> Self {
        Self::new(WordListMode::Ignore)
    }

    pub fn remove() -> Self {
        Self::new(WordListMode::Remove)
    }

    pub fn through() -> Self {
        Self::new(WordListMode::Through)
    }

    pub fn white() -> Self {
        Self::new(WordListMode::White)
    }

    /// Use a fixed table name instead of the configured one.
    pub fn with_table_name<S: Into<String>>(mut self, name: S) -> Self {
        self.table_name = Some(name.into());
        self
    }

    pub fn mode(&self) -> WordListMode {
        self.mode
    }
}

impl Filter for WordListFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        let configured = self
            .table_name
            .as_deref()
            .or_else(|| self.mode.configured_table(context.config()));
        let table = resolve_table(
            context.tables(),
            configured,
            self.mode.default_table(),
            self.mode.legacy_table(),
        )?;
        debug!(
            "[token-filter][{}] using table '{}' ({} words)",
            self.mode,
            table.name(),
            table.len()
        );

        Ok(Box::new(WordListState {
            mode: self.mode,
            table,
        }))
    }

    fn name(&self) -> &'static str {
        self.mode.filter_name()
    }
}

struct WordListState {
    mode: WordListMode,
    table: Arc<WordTable>,
}

impl FilterState for WordListState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        if self.table.contains(current.data()) == self.mode.skips_listed() {
            mark(current, next, self.mode.flag());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YatofError;
    use crate::table::MemoryTableStore;

    fn context_with(tables: &[WordTable]) -> FilterContext {
        let store = MemoryTableStore::new();
        for table in tables {
            store.register(table.clone());
        }
        FilterContext::new(FilterConfig::default(), Arc::new(store))
    }

    fn statuses_of(
        filter: &WordListFilter,
        context: &FilterContext,
        words: &[&str],
    ) -> Vec<TokenStatus> {
        let mut state = filter.create(context).unwrap();
        words
            .iter()
            .map(|w| {
                let current = Token::new(*w, 0);
                let mut next = current.clone();
                state.apply(&current, &mut next);
                next.status()
            })
            .collect()
    }

    const WORDS: [&str; 3] = ["the", "quick", "fox"];

    #[test]
    fn test_ignore() {
        let context = context_with(&[WordTable::from_words("ignore_words", ["the"])]);
        let statuses = statuses_of(&WordListFilter::ignore(), &context, &WORDS);
        assert_eq!(
            statuses,
            vec![
                TokenStatus::SKIP_WITH_POSITION,
                TokenStatus::CONTINUE,
                TokenStatus::CONTINUE
            ]
        );
    }

    #[test]
    fn test_remove() {
        let context = context_with(&[WordTable::from_words("remove_words", ["the"])]);
        let statuses = statuses_of(&WordListFilter::remove(), &context, &WORDS);
        assert_eq!(
            statuses,
            vec![TokenStatus::SKIP, TokenStatus::CONTINUE, TokenStatus::CONTINUE]
        );
    }

    #[test]
    fn test_through() {
        let context = context_with(&[WordTable::from_words("through_words", ["the"])]);
        let statuses = statuses_of(&WordListFilter::through(), &context, &WORDS);
        assert_eq!(
            statuses,
            vec![
                TokenStatus::CONTINUE,
                TokenStatus::SKIP_WITH_POSITION,
                TokenStatus::SKIP_WITH_POSITION
            ]
        );
    }

    #[test]
    fn test_white() {
        let context = context_with(&[WordTable::from_words("white_words", ["the"])]);
        let statuses = statuses_of(&WordListFilter::white(), &context, &WORDS);
        assert_eq!(
            statuses,
            vec![TokenStatus::CONTINUE, TokenStatus::SKIP, TokenStatus::SKIP]
        );
    }

    #[test]
    fn test_ignore_and_through_partition() {
        let context = context_with(&[
            WordTable::from_words("ignore_words", ["the"]),
            WordTable::from_words("through_words", ["the"]),
        ]);
        let words = ["the", "a", "", "them", "The"];
        let ignored = statuses_of(&WordListFilter::ignore(), &context, &words);
        let through = statuses_of(&WordListFilter::through(), &context, &words);

        for (i, word) in words.iter().enumerate() {
            let by_ignore = ignored[i].contains(TokenStatus::SKIP_WITH_POSITION);
            let by_through = through[i].contains(TokenStatus::SKIP_WITH_POSITION);
            assert_ne!(by_ignore, by_through, "word {word:?}");
        }
    }

    #[test]
    fn test_legacy_table_name() {
        let context = context_with(&[WordTable::from_words("IgnoreWords", ["the"])]);
        let statuses = statuses_of(&WordListFilter::ignore(), &context, &["the"]);
        assert_eq!(statuses, vec![TokenStatus::SKIP_WITH_POSITION]);
    }

    #[test]
    fn test_configured_table_name() {
        let store = MemoryTableStore::new()
            .with_table(WordTable::from_words("ignore_words", ["the"]))
            .with_table(WordTable::from_words("stop", ["fox"]));
        let config = FilterConfig {
            ignore_word_table: Some("stop".to_string()),
            ..Default::default()
        };
        let context = FilterContext::new(config, Arc::new(store));

        let statuses = statuses_of(&WordListFilter::ignore(), &context, &["the", "fox"]);
        assert_eq!(
            statuses,
            vec![TokenStatus::CONTINUE, TokenStatus::SKIP_WITH_POSITION]
        );

        let fixed = WordListFilter::ignore().with_table_name("ignore_words");
        let statuses = statuses_of(&fixed, &context, &["the", "fox"]);
        assert_eq!(
            statuses,
            vec![TokenStatus::SKIP_WITH_POSITION, TokenStatus::CONTINUE]
        );
    }

    #[test]
    fn test_missing_table_fails_creation() {
        let context = context_with(&[]);
        for mode in [
            WordListMode::Ignore,
            WordListMode::Remove,
            WordListMode::Through,
            WordListMode::White,
        ] {
            let result = WordListFilter::new(mode).create(&context);
            assert!(matches!(result, Err(YatofError::TableNotFound(_))));
        }
    }

    #[test]
    fn test_filter_names() {
        assert_eq!(WordListFilter::ignore().name(), "ignore_word");
        assert_eq!(WordListFilter::white().name(), "white_word");
        assert_eq!(WordListMode::Through.to_string(), "through_word");
    }
}
