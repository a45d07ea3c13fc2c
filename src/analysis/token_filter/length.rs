//! Byte-length filters.
//!
//! Tokens outside the configured byte-length bounds are flagged
//! `SKIP_WITH_POSITION`: they leave the index but keep their position slot.
//! A token of exactly the bound is kept.

use log::debug;

use super::{Filter, FilterContext, FilterState, mark};

use crate::analysis::token::{Token, TokenStatus};
use crate::error::Result;

/// Default upper bound in bytes.
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 64;

/// Default lower bound in bytes.
pub const DEFAULT_MIN_TOKEN_LENGTH: usize = 3;

/// Skips tokens longer than `max_token_length` bytes.
///
/// The bound is taken from the filter itself if set, else from
/// [`FilterConfig::max_token_length`](crate::config::FilterConfig), else
/// [`DEFAULT_MAX_TOKEN_LENGTH`].
#[derive(Clone, Debug, Default)]
pub struct MaxLengthFilter {
    max_length: Option<usize>,
}

impl MaxLengthFilter {
    /// Create a filter bounded by the configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with a fixed bound.
    pub fn with_max_length(max_length: usize) -> Self {
        MaxLengthFilter {
            max_length: Some(max_length),
        }
    }
}

impl Filter for MaxLengthFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        let max_length = self
            .max_length
            .or(context.config().max_token_length)
            .unwrap_or(DEFAULT_MAX_TOKEN_LENGTH);
        debug!("[token-filter][max-length] max_length_in_bytes={max_length}");
        Ok(Box::new(MaxLengthState { max_length }))
    }

    fn name(&self) -> &'static str {
        "max_length"
    }
}

struct MaxLengthState {
    max_length: usize,
}

impl FilterState for MaxLengthState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        if current.len() > self.max_length {
            mark(current, next, TokenStatus::SKIP_WITH_POSITION);
        }
    }
}

/// Skips tokens shorter than `min_token_length` bytes.
#[derive(Clone, Debug, Default)]
pub struct MinLengthFilter {
    min_length: Option<usize>,
}

impl MinLengthFilter {
    /// Create a filter bounded by the configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with a fixed bound.
    pub fn with_min_length(min_length: usize) -> Self {
        MinLengthFilter {
            min_length: Some(min_length),
        }
    }
}

impl Filter for MinLengthFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        let min_length = self
            .min_length
            .or(context.config().min_token_length)
            .unwrap_or(DEFAULT_MIN_TOKEN_LENGTH);
        debug!("[token-filter][min-length] min_length_in_bytes={min_length}");
        Ok(Box::new(MinLengthState { min_length }))
    }

    fn name(&self) -> &'static str {
        "min_length"
    }
}

struct MinLengthState {
    min_length: usize,
}

impl FilterState for MinLengthState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        if current.len() < self.min_length {
            mark(current, next, TokenStatus::SKIP_WITH_POSITION);
        }
    }
}
