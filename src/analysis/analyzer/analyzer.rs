//! Core analyzer trait definition.
//!
//! An analyzer runs the complete pipeline over one input text:
//!
//! ```text
//! Raw Text → Tokenizer → Filter Session (filter 1 … filter N) → Tokens
//! ```
//!
//! Each call is one tokenization session, so per-session filter state such as
//! frequency counters starts fresh for every text.

use crate::analysis::token::Token;
use crate::error::Result;

/// Trait for analyzers that convert text into filtered tokens.
///
/// The trait requires `Send + Sync` so one analyzer can serve many threads;
/// each call opens its own session.
pub trait Analyzer: Send + Sync {
    /// Analyze the given text, returning every token with its final status
    /// and position. Skipped tokens are included.
    fn analyze(&self, text: &str) -> Result<Vec<Token>>;

    /// Analyze the given text, returning only tokens that are not skipped.
    fn analyze_indexable(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self
            .analyze(text)?
            .into_iter()
            .filter(|token| !token.is_skipped())
            .collect())
    }

    /// Get the name of this analyzer (for debugging and configuration).
    fn name(&self) -> &'static str;
}
