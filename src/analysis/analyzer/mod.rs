//! Analyzer implementations that combine a tokenizer and a filter chain.

pub mod analyzer;
pub mod pipeline;

pub use analyzer::Analyzer;
pub use pipeline::PipelineAnalyzer;
