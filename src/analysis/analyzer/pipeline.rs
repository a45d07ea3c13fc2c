//! Pipeline analyzer that combines a tokenizer with a filter chain.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use yatof::analysis::analyzer::{Analyzer, PipelineAnalyzer};
//! use yatof::analysis::token_filter::FilterKind;
//! use yatof::analysis::tokenizer::WhitespaceTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(FilterKind::MinLength.build())
//!     .add_filter(FilterKind::Digit.build());
//!
//! let tokens = analyzer.analyze_indexable("an old 1984 movie").unwrap();
//! let texts: Vec<_> = tokens.iter().map(|t| t.text().into_owned()).collect();
//! assert_eq!(texts, vec!["old", "movie"]);
//! assert_eq!(tokens[1].position(), 3);
//! ```

use std::sync::Arc;

use log::debug;

use crate::analysis::analyzer::analyzer::Analyzer;
use crate::analysis::chain::FilterChain;
use crate::analysis::token::Token;
use crate::analysis::token_filter::{Filter, FilterContext};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::Result;

/// A configurable analyzer that combines a tokenizer with a filter chain.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    tokenizer: Arc<dyn Tokenizer>,
    chain: FilterChain,
    context: FilterContext,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer, an empty
    /// chain and a default context.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            tokenizer,
            chain: FilterChain::new(),
            context: FilterContext::default(),
        }
    }

    /// Add a filter to the end of the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.chain.push(filter);
        self
    }

    /// Replace the filter chain.
    pub fn with_chain(mut self, chain: FilterChain) -> Self {
        self.chain = chain;
        self
    }

    /// Replace the context filters are created with.
    pub fn with_context(mut self, context: FilterContext) -> Self {
        self.context = context;
        self
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn context(&self) -> &FilterContext {
        &self.context
    }
}

impl Analyzer for PipelineAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<Token>> {
        let mut session = self.chain.open_session(&self.context)?;
        let tokens = self.tokenizer.tokenize(text)?;
        let tokens = session.filter_stream(tokens);
        debug!(
            "[analyzer] {} tokens from '{}' through {} filters",
            tokens.len(),
            self.tokenizer.name(),
            session.len()
        );
        Ok(tokens)
    }

    fn name(&self) -> &'static str {
        "pipeline"
    }
}
