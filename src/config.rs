//! Filter configuration.
//!
//! [`FilterConfig`] is an immutable bag of optional values handed to every
//! filter at creation time. Each filter declares its own default for every
//! value it consults and resolves `config.value.unwrap_or(DEFAULT)`, so an
//! empty configuration is always valid.
//!
//! # Examples
//!
//! ```
//! use yatof::config::FilterConfig;
//!
//! let config = FilterConfig::from_json_str(r#"{ "max_token_length": 32 }"#).unwrap();
//! assert_eq!(config.max_token_length, Some(32));
//! assert_eq!(config.min_token_length, None);
//! ```

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, YatofError};

pub const ENV_MAX_TOKEN_LENGTH: &str = "GRN_YATOF_MAX_TOKEN_LENGTH";
pub const ENV_MIN_TOKEN_LENGTH: &str = "GRN_YATOF_MIN_TOKEN_LENGTH";
pub const ENV_TF_LIMIT: &str = "GRN_YATOF_TF_LIMIT";
pub const ENV_TF_LIMIT_TABLE: &str = "GRN_YATOF_TF_LIMIT_TABLE";
pub const ENV_TF_LIMIT_COLUMN: &str = "GRN_YATOF_TF_LIMIT_COLUMN";
pub const ENV_PHRASE_LIMIT: &str = "GRN_YATOF_PHRASE_LIMIT";
pub const ENV_IGNORE_WORD_TABLE: &str = "GRN_YATOF_IGNORE_WORD_TABLE";
pub const ENV_REMOVE_WORD_TABLE: &str = "GRN_YATOF_REMOVE_WORD_TABLE";
pub const ENV_THROUGH_WORD_TABLE: &str = "GRN_YATOF_THROUGH_WORD_TABLE";
pub const ENV_WHITE_WORD_TABLE: &str = "GRN_YATOF_WHITE_WORD_TABLE";
pub const ENV_SYNONYM_TABLE: &str = "GRN_YATOF_SYNONYM_TABLE";
pub const ENV_SYNONYM_COLUMN: &str = "GRN_YATOF_SYNONYM_COLUMN";

/// Configuration values consulted by token filters at creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Tokens longer than this many bytes are skipped (default 64).
    pub max_token_length: Option<usize>,

    /// Tokens shorter than this many bytes are skipped (default 3).
    pub min_token_length: Option<usize>,

    /// Per-session occurrence limit of a term (default 131071).
    pub tf_limit: Option<u64>,

    /// Table carrying per-word limit overrides (default `tf_limit_words`).
    pub tf_limit_table: Option<String>,

    /// Column of the override table holding the limit (default `tf_limit`).
    pub tf_limit_column: Option<String>,

    /// Per-session occurrence limit of a token pair (default 4096).
    pub phrase_limit: Option<u64>,

    /// Word list of the ignore filter (default `ignore_words`).
    pub ignore_word_table: Option<String>,

    /// Word list of the remove filter (default `remove_words`).
    pub remove_word_table: Option<String>,

    /// Word list of the through filter (default `through_words`).
    pub through_word_table: Option<String>,

    /// Word list of the white filter (default `white_words`).
    pub white_word_table: Option<String>,

    /// Synonym table (default `synonyms`).
    pub synonym_table: Option<String>,

    /// Replacement column of the synonym table (default `synonym`).
    pub synonym_column: Option<String>,
}

impl FilterConfig {
    /// Create an empty configuration; every filter uses its defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            YatofError::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    /// Resolve a configuration through a key lookup, using the
    /// `GRN_YATOF_*` key names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(FilterConfig {
            max_token_length: parse_value(ENV_MAX_TOKEN_LENGTH, &lookup)?,
            min_token_length: parse_value(ENV_MIN_TOKEN_LENGTH, &lookup)?,
            tf_limit: parse_value(ENV_TF_LIMIT, &lookup)?,
            tf_limit_table: lookup(ENV_TF_LIMIT_TABLE),
            tf_limit_column: lookup(ENV_TF_LIMIT_COLUMN),
            phrase_limit: parse_value(ENV_PHRASE_LIMIT, &lookup)?,
            ignore_word_table: lookup(ENV_IGNORE_WORD_TABLE),
            remove_word_table: lookup(ENV_REMOVE_WORD_TABLE),
            through_word_table: lookup(ENV_THROUGH_WORD_TABLE),
            white_word_table: lookup(ENV_WHITE_WORD_TABLE),
            synonym_table: lookup(ENV_SYNONYM_TABLE),
            synonym_column: lookup(ENV_SYNONYM_COLUMN),
        })
    }

    /// Resolve a configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlay `other` on top of `self`: values set in `other` win.
    pub fn merge(self, other: FilterConfig) -> Self {
        FilterConfig {
            max_token_length: other.max_token_length.or(self.max_token_length),
            min_token_length: other.min_token_length.or(self.min_token_length),
            tf_limit: other.tf_limit.or(self.tf_limit),
            tf_limit_table: other.tf_limit_table.or(self.tf_limit_table),
            tf_limit_column: other.tf_limit_column.or(self.tf_limit_column),
            phrase_limit: other.phrase_limit.or(self.phrase_limit),
            ignore_word_table: other.ignore_word_table.or(self.ignore_word_table),
            remove_word_table: other.remove_word_table.or(self.remove_word_table),
            through_word_table: other.through_word_table.or(self.through_word_table),
            white_word_table: other.white_word_table.or(self.white_word_table),
            synonym_table: other.synonym_table.or(self.synonym_table),
            synonym_column: other.synonym_column.or(self.synonym_column),
        }
    }
}

fn parse_value<T, F>(key: &str, lookup: &F) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| YatofError::config(format!("{key}: invalid number '{raw}'"))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_empty_config() {
        let config = FilterConfig::new();
        assert_eq!(config.max_token_length, None);
        assert_eq!(config, FilterConfig::from_lookup(|_| None).unwrap());
    }

    #[test]
    fn test_from_lookup() {
        let config = FilterConfig::from_lookup(lookup_from(&[
            (ENV_MAX_TOKEN_LENGTH, "128"),
            (ENV_MIN_TOKEN_LENGTH, " 2 "),
            (ENV_TF_LIMIT, "1000"),
            (ENV_SYNONYM_TABLE, "Thesaurus"),
        ]))
        .unwrap();

        assert_eq!(config.max_token_length, Some(128));
        assert_eq!(config.min_token_length, Some(2));
        assert_eq!(config.tf_limit, Some(1000));
        assert_eq!(config.phrase_limit, None);
        assert_eq!(config.synonym_table.as_deref(), Some("Thesaurus"));
    }

    #[test]
    fn test_from_lookup_rejects_bad_numbers() {
        let result = FilterConfig::from_lookup(lookup_from(&[(ENV_PHRASE_LIMIT, "many")]));
        assert!(matches!(result, Err(YatofError::Config(_))));
    }

    #[test]
    fn test_from_json() {
        let config = FilterConfig::from_json_str(
            r#"{ "phrase_limit": 8, "ignore_word_table": "stop" }"#,
        )
        .unwrap();
        assert_eq!(config.phrase_limit, Some(8));
        assert_eq!(config.ignore_word_table.as_deref(), Some("stop"));

        assert!(FilterConfig::from_json_str(r#"{ "unknown": 1 }"#).is_err());
    }

    #[test]
    fn test_merge() {
        let base = FilterConfig {
            max_token_length: Some(10),
            min_token_length: Some(2),
            ..Default::default()
        };
        let overrides = FilterConfig {
            max_token_length: Some(20),
            ..Default::default()
        };

        let merged = base.merge(overrides);
        assert_eq!(merged.max_token_length, Some(20));
        assert_eq!(merged.min_token_length, Some(2));
    }
}
