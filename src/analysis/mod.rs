//! Token analysis: character classification, tokenizers, token filters and
//! the chain that runs them.

pub mod analyzer;
pub mod chain;
pub mod char_class;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

// Re-export commonly used types
pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use chain::{FilterChain, FilterSession};
pub use char_class::{CharType, Encoding};
pub use token::{IntoTokenStream, Token, TokenStatus, TokenStream};
pub use token_filter::{Filter, FilterContext, FilterKind, FilterState};
pub use tokenizer::{NgramTokenizer, Tokenizer, WhitespaceTokenizer};
