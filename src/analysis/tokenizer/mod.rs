//! Tokenizer implementations for text analysis.
//!
//! Tokenizers only split text; positions and skip decisions are settled by
//! the filter chain. They mark the last token with `LAST`, and n-gram
//! tokenizers mark overlapping and short grams.

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

// Individual tokenizer modules
pub mod ngram;
pub mod whitespace;

// Re-export all tokenizers for convenient access
pub use ngram::NgramTokenizer;
pub use whitespace::WhitespaceTokenizer;
