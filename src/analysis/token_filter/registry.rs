//! Filter registry.
//!
//! Maps the registered filter names (`TokenFilterMaxLength`, ...) to filter
//! kinds and builds filters with configuration-driven defaults.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use super::{
    AtgcFilter, DigitFilter, Filter, MaxLengthFilter, MinLengthFilter, PhraseLimitFilter,
    ProlongFilter, SymbolFilter, SynonymFilter, TfLimitFilter, UnmaturedOneCharFilter,
    WordListFilter,
};
use crate::error::{Result, YatofError};

/// Every registered token filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterKind {
    MaxLength,
    MinLength,
    Symbol,
    Digit,
    Prolong,
    Atgc,
    UnmaturedOneChar,
    TfLimit,
    PhraseLimit,
    IgnoreWord,
    RemoveWord,
    ThroughWord,
    WhiteWord,
    Synonym,
}

impl FilterKind {
    /// All kinds, in registration order.
    pub const ALL: [FilterKind; 14] = [
        FilterKind::MaxLength,
        FilterKind::MinLength,
        FilterKind::Symbol,
        FilterKind::Digit,
        FilterKind::Prolong,
        FilterKind::Atgc,
        FilterKind::UnmaturedOneChar,
        FilterKind::TfLimit,
        FilterKind::PhraseLimit,
        FilterKind::IgnoreWord,
        FilterKind::RemoveWord,
        FilterKind::ThroughWord,
        FilterKind::WhiteWord,
        FilterKind::Synonym,
    ];

    /// Registered name.
    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::MaxLength => "TokenFilterMaxLength",
            FilterKind::MinLength => "TokenFilterMinLength",
            FilterKind::Symbol => "TokenFilterSymbol",
            FilterKind::Digit => "TokenFilterDigit",
            FilterKind::Prolong => "TokenFilterProlong",
            FilterKind::Atgc => "TokenFilterATGC",
            FilterKind::UnmaturedOneChar => "TokenFilterUnmaturedOneChar",
            FilterKind::TfLimit => "TokenFilterTFLimit",
            FilterKind::PhraseLimit => "TokenFilterPhraseLimit",
            FilterKind::IgnoreWord => "TokenFilterIgnoreWord",
            FilterKind::RemoveWord => "TokenFilterRemoveWord",
            FilterKind::ThroughWord => "TokenFilterThroughWord",
            FilterKind::WhiteWord => "TokenFilterWhiteWord",
            FilterKind::Synonym => "TokenFilterSynonym",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            FilterKind::MaxLength => "skip tokens longer than max_token_length bytes",
            FilterKind::MinLength => "skip tokens shorter than min_token_length bytes",
            FilterKind::Symbol => "skip tokens made only of symbols",
            FilterKind::Digit => "skip tokens made only of digits",
            FilterKind::Prolong => "strip a trailing prolonged sound mark from katakana",
            FilterKind::Atgc => "skip nucleotide sequences",
            FilterKind::UnmaturedOneChar => "skip unmatured single-character n-grams",
            FilterKind::TfLimit => "skip terms beyond a per-session frequency",
            FilterKind::PhraseLimit => "skip token pairs beyond a per-session frequency",
            FilterKind::IgnoreWord => "skip listed words, keeping positions",
            FilterKind::RemoveWord => "remove listed words",
            FilterKind::ThroughWord => "skip unlisted words, keeping positions",
            FilterKind::WhiteWord => "remove unlisted words",
            FilterKind::Synonym => "replace tokens by their synonyms",
        }
    }

    /// Build a filter of this kind.
    pub fn build(&self) -> Arc<dyn Filter> {
        match self {
            FilterKind::MaxLength => Arc::new(MaxLengthFilter::new()),
            FilterKind::MinLength => Arc::new(MinLengthFilter::new()),
            FilterKind::Symbol => Arc::new(SymbolFilter::new()),
            FilterKind::Digit => Arc::new(DigitFilter::new()),
            FilterKind::Prolong => Arc::new(ProlongFilter::new()),
            FilterKind::Atgc => Arc::new(AtgcFilter::new()),
            FilterKind::UnmaturedOneChar => Arc::new(UnmaturedOneCharFilter::new()),
            FilterKind::TfLimit => Arc::new(TfLimitFilter::new()),
            FilterKind::PhraseLimit => Arc::new(PhraseLimitFilter::new()),
            FilterKind::IgnoreWord => Arc::new(WordListFilter::ignore()),
            FilterKind::RemoveWord => Arc::new(WordListFilter::remove()),
            FilterKind::ThroughWord => Arc::new(WordListFilter::through()),
            FilterKind::WhiteWord => Arc::new(WordListFilter::white()),
            FilterKind::Synonym => Arc::new(SynonymFilter::new()),
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for FilterKind {
    type Err = YatofError;

    /// Parses registered names case-insensitively, with or without the
    /// `TokenFilter` prefix and ignoring `_` and `-` (`max_length`,
    /// `MaxLength` and `TokenFilterMaxLength` are the same filter).
    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize(s);
        let wanted = wanted.strip_prefix("tokenfilter").unwrap_or(&wanted);

        FilterKind::ALL
            .iter()
            .find(|kind| {
                let name = normalize(kind.name());
                name.strip_prefix("tokenfilter") == Some(wanted)
            })
            .copied()
            .ok_or_else(|| YatofError::invalid_argument(format!("unknown token filter: {s}")))
    }
}
