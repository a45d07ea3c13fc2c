//! Command line argument parsing for the yatof CLI using clap.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::analysis::char_class::Encoding;
use crate::analysis::tokenizer::{NgramTokenizer, Tokenizer, WhitespaceTokenizer};
use crate::config::FilterConfig;
use crate::error::{Result, YatofError};

/// yatof - Run text through a chain of token filters
#[derive(Parser, Debug, Clone)]
#[command(name = "yatof")]
#[command(about = "Run text through a chain of token filters")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct YatofArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl YatofArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Tokenize text and run the tokens through a filter chain
    Filter(FilterArgs),

    /// List the registered token filters
    #[command(name = "list-filters")]
    ListFilters,
}

/// Arguments for filtering text
#[derive(Parser, Debug, Clone)]
pub struct FilterArgs {
    /// Text to tokenize
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Filters to apply, in order (e.g. TokenFilterMinLength or min_length)
    #[arg(short = 'F', long = "filter", value_name = "NAME", value_delimiter = ',')]
    pub filters: Vec<String>,

    /// Tokenizer: whitespace, bigram or ngram:N
    #[arg(short, long, default_value = "whitespace")]
    pub tokenizer: TokenizerChoice,

    /// Lookup table definitions (JSON)
    #[arg(long, value_name = "TABLES_FILE")]
    pub tables: Option<PathBuf>,

    /// Filter configuration (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Text encoding of the tokens
    #[arg(short, long, default_value = "utf8")]
    pub encoding: Encoding,

    /// Maximum token length in bytes
    #[arg(long, env = "GRN_YATOF_MAX_TOKEN_LENGTH")]
    pub max_token_length: Option<usize>,

    /// Minimum token length in bytes
    #[arg(long, env = "GRN_YATOF_MIN_TOKEN_LENGTH")]
    pub min_token_length: Option<usize>,

    /// Per-session term-frequency limit
    #[arg(long, env = "GRN_YATOF_TF_LIMIT")]
    pub tf_limit: Option<u64>,

    /// Per-session phrase-frequency limit
    #[arg(long, env = "GRN_YATOF_PHRASE_LIMIT")]
    pub phrase_limit: Option<u64>,
}

impl FilterArgs {
    /// The configuration overrides given on the command line.
    pub fn overrides(&self) -> FilterConfig {
        FilterConfig {
            max_token_length: self.max_token_length,
            min_token_length: self.min_token_length,
            tf_limit: self.tf_limit,
            phrase_limit: self.phrase_limit,
            ..Default::default()
        }
    }
}

/// Tokenizers selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizerChoice {
    Whitespace,
    Ngram(usize),
}

impl TokenizerChoice {
    pub fn build(&self) -> Result<Arc<dyn Tokenizer>> {
        match self {
            TokenizerChoice::Whitespace => Ok(Arc::new(WhitespaceTokenizer::new())),
            TokenizerChoice::Ngram(n) => Ok(Arc::new(NgramTokenizer::new(*n)?)),
        }
    }
}

impl FromStr for TokenizerChoice {
    type Err = YatofError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "whitespace" => Ok(TokenizerChoice::Whitespace),
            "bigram" => Ok(TokenizerChoice::Ngram(2)),
            _ => {
                let n = s
                    .strip_prefix("ngram:")
                    .and_then(|n| n.parse::<usize>().ok())
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        YatofError::invalid_argument(format!(
                            "unknown tokenizer '{s}' (expected whitespace, bigram or ngram:N)"
                        ))
                    })?;
                Ok(TokenizerChoice::Ngram(n))
            }
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
