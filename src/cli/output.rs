//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::analysis::token_filter::FilterKind;
use crate::cli::args::{OutputFormat, YatofArgs};
use crate::error::Result;

/// One filtered token.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenOutput {
    pub text: String,
    pub position: u32,
    pub status: Vec<String>,
    pub skipped: bool,
}

impl From<&Token> for TokenOutput {
    fn from(token: &Token) -> Self {
        TokenOutput {
            text: token.text().into_owned(),
            position: token.position(),
            status: token
                .status()
                .flag_names()
                .into_iter()
                .map(str::to_string)
                .collect(),
            skipped: token.is_skipped(),
        }
    }
}

/// Result structure for the filter command.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterResult {
    pub tokenizer: String,
    pub filters: Vec<String>,
    pub tokens: Vec<TokenOutput>,
}

/// One registry entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterInfo {
    pub name: String,
    pub description: String,
}

impl From<FilterKind> for FilterInfo {
    fn from(kind: FilterKind) -> Self {
        FilterInfo {
            name: kind.name().to_string(),
            description: kind.description().to_string(),
        }
    }
}

/// Result structure for the list-filters command.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterList {
    pub filters: Vec<FilterInfo>,
}

/// Results that have a human-readable rendering.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write, args: &YatofArgs) -> io::Result<()>;
}

impl HumanOutput for FilterResult {
    fn write_human(&self, out: &mut dyn Write, args: &YatofArgs) -> io::Result<()> {
        if args.verbosity() > 1 {
            writeln!(out, "Tokenizer: {}", self.tokenizer)?;
            writeln!(out, "Filters:   {}", self.filters.join(" -> "))?;
            writeln!(out)?;
        }

        let width = self
            .tokens
            .iter()
            .map(|t| t.text.chars().count())
            .max()
            .unwrap_or(0);

        for token in &self.tokens {
            let status = if token.status.is_empty() {
                "CONTINUE".to_string()
            } else {
                token.status.join("|")
            };
            let position = if token.status.iter().any(|s| s == "SKIP") {
                "-".to_string()
            } else {
                token.position.to_string()
            };
            writeln!(out, "{position:>4}  {:<width$}  {status}", token.text)?;
        }
        Ok(())
    }
}

impl HumanOutput for FilterList {
    fn write_human(&self, out: &mut dyn Write, _args: &YatofArgs) -> io::Result<()> {
        let width = self.filters.iter().map(|f| f.name.len()).max().unwrap_or(0);
        for filter in &self.filters {
            writeln!(out, "{:<width$}  {}", filter.name, filter.description)?;
        }
        Ok(())
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &YatofArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, args)
}

/// Write a result in the specified format.
pub fn write_result<T: Serialize + HumanOutput>(
    out: &mut dyn Write,
    result: &T,
    args: &YatofArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => result.write_human(out, args)?,
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::TokenStatus;
    use clap::Parser;

    fn args(extra: &[&str]) -> YatofArgs {
        let mut argv = vec!["yatof"];
        argv.extend_from_slice(extra);
        argv.push("list-filters");
        YatofArgs::try_parse_from(argv).unwrap()
    }

    fn sample() -> FilterResult {
        let tokens = [
            Token::new("hello", 0),
            Token::new("!", 1).with_status(TokenStatus::SKIP_WITH_POSITION),
            Token::new("gone", 2).with_status(TokenStatus::SKIP | TokenStatus::LAST),
        ];
        FilterResult {
            tokenizer: "whitespace".to_string(),
            filters: vec!["symbol".to_string()],
            tokens: tokens.iter().map(TokenOutput::from).collect(),
        }
    }

    #[test]
    fn test_human_output() {
        let mut out = Vec::new();
        write_result(&mut out, &sample(), &args(&[])).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("CONTINUE"));
        assert!(lines[1].ends_with("SKIP_WITH_POSITION"));
        assert!(lines[2].trim_start().starts_with('-'));
        assert!(lines[2].ends_with("LAST|SKIP"));
    }

    #[test]
    fn test_json_output() {
        let mut out = Vec::new();
        write_result(&mut out, &sample(), &args(&["-f", "json"])).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["tokens"][0]["text"], "hello");
        assert_eq!(value["tokens"][1]["skipped"], true);
        assert_eq!(value["tokens"][2]["status"][1], "SKIP");
    }

    #[test]
    fn test_filter_list_output() {
        let list = FilterList {
            filters: FilterKind::ALL.into_iter().map(FilterInfo::from).collect(),
        };
        let mut out = Vec::new();
        write_result(&mut out, &list, &args(&[])).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), FilterKind::ALL.len());
        assert!(text.contains("TokenFilterATGC"));
    }
}
