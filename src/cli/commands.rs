//! Command implementations for the yatof CLI.

use std::sync::Arc;

use log::{debug, info};

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::chain::FilterChain;
use crate::analysis::token_filter::{FilterContext, FilterKind};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::FilterConfig;
use crate::error::{Result, YatofError};
use crate::table::MemoryTableStore;

/// Execute a CLI command.
pub fn execute_command(args: YatofArgs) -> Result<()> {
    match &args.command {
        Command::Filter(filter_args) => filter_text(filter_args, &args),
        Command::ListFilters => list_filters(&args),
    }
}

/// Resolve the filter configuration: file, then environment, then flags.
pub fn load_config(args: &FilterArgs) -> Result<FilterConfig> {
    let base = match &args.config {
        Some(path) => {
            info!("Loading filter configuration from: {}", path.display());
            FilterConfig::from_json_file(path)?
        }
        None => FilterConfig::default(),
    };
    Ok(base.merge(FilterConfig::from_env()?).merge(args.overrides()))
}

/// Load the lookup tables, or an empty store.
pub fn load_tables(args: &FilterArgs) -> Result<MemoryTableStore> {
    match &args.tables {
        Some(path) => {
            info!("Loading lookup tables from: {}", path.display());
            MemoryTableStore::from_json_file(path)
        }
        None => Ok(MemoryTableStore::new()),
    }
}

/// Build the analyzer a filter command describes.
pub fn build_analyzer(args: &FilterArgs) -> Result<PipelineAnalyzer> {
    if args.filters.is_empty() {
        return Err(YatofError::invalid_argument(
            "at least one --filter is required",
        ));
    }

    let chain = FilterChain::from_names(&args.filters)?;
    let context = FilterContext::new(load_config(args)?, Arc::new(load_tables(args)?))
        .with_encoding(args.encoding);
    debug!("Filter chain: {chain:?}, context: {context:?}");

    Ok(PipelineAnalyzer::new(args.tokenizer.build()?)
        .with_chain(chain)
        .with_context(context))
}

/// Tokenize and filter text.
fn filter_text(args: &FilterArgs, cli_args: &YatofArgs) -> Result<()> {
    let analyzer = build_analyzer(args)?;
    let tokens = analyzer.analyze(&args.text)?;

    let result = FilterResult {
        tokenizer: analyzer.tokenizer().name().to_string(),
        filters: analyzer
            .chain()
            .filters()
            .iter()
            .map(|f| f.name().to_string())
            .collect(),
        tokens: tokens.iter().map(TokenOutput::from).collect(),
    };
    output_result(&result, cli_args)
}

/// List the filter registry.
fn list_filters(cli_args: &YatofArgs) -> Result<()> {
    let list = FilterList {
        filters: FilterKind::ALL.into_iter().map(FilterInfo::from).collect(),
    };
    output_result(&list, cli_args)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TokenStatus;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn filter_args(argv: &[&str]) -> FilterArgs {
        let mut full = vec!["yatof", "filter"];
        full.extend_from_slice(argv);
        match YatofArgs::try_parse_from(full).unwrap().command {
            Command::Filter(args) => args,
            other => panic!("Expected Filter command, got {other:?}"),
        }
    }

    #[test]
    fn test_build_analyzer_with_tables_and_config() {
        let mut tables = NamedTempFile::new().unwrap();
        write!(
            tables,
            r#"{{"stop": {{"keys": ["the"]}}}}"#
        )
        .unwrap();
        let mut config = NamedTempFile::new().unwrap();
        write!(config, r#"{{"ignore_word_table": "stop"}}"#).unwrap();

        let args = filter_args(&[
            "the quick fox",
            "-F",
            "ignore_word",
            "--tables",
            tables.path().to_str().unwrap(),
            "--config",
            config.path().to_str().unwrap(),
        ]);
        let tokens = build_analyzer(&args).unwrap().analyze(&args.text).unwrap();

        assert!(tokens[0].status().contains(TokenStatus::SKIP_WITH_POSITION));
        assert!(!tokens[1].is_skipped());
        assert_eq!(tokens[2].position(), 2);
    }

    #[test]
    fn test_flag_overrides_config_file() {
        let mut config = NamedTempFile::new().unwrap();
        write!(config, r#"{{"min_token_length": 10}}"#).unwrap();

        let args = filter_args(&[
            "abcd",
            "-F",
            "min_length",
            "--config",
            config.path().to_str().unwrap(),
            "--min-token-length",
            "2",
        ]);
        assert_eq!(load_config(&args).unwrap().min_token_length, Some(2));
    }

    #[test]
    fn test_requires_filters() {
        let args = filter_args(&["text"]);
        assert!(build_analyzer(&args).is_err());

        let args = filter_args(&["text", "-F", "no_such_filter"]);
        assert!(build_analyzer(&args).is_err());
    }
}
