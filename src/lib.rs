//! # yatof
//!
//! Token filters for full-text indexing. A tokenizer splits text into
//! tokens; a [`FilterChain`](analysis::FilterChain) of narrow filters then
//! flags tokens to skip (too long, too short, pure symbols, too frequent,
//! listed in a word table, ...) or rewrites them (prolonged sound marks,
//! synonyms) before they reach the index.
//!
//! ## Features
//!
//! - Encoding-aware character classification (UTF-8, EUC-JP, Shift_JIS, ...)
//! - Per-session frequency limits for terms and token pairs
//! - Word-list and synonym filters backed by named lookup tables
//! - Configuration from JSON files or `GRN_YATOF_*` environment variables

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod table;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
