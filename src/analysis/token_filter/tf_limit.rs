//! Term-frequency limit filter.
//!
//! Counts every term within one tokenization session and flags occurrences
//! beyond a limit as `SKIP_WITH_POSITION`. Very frequent terms in a single
//! document bloat posting lists without improving ranking.
//!
//! The limit defaults to [`DEFAULT_TF_LIMIT`]. A word table can override it
//! per word: when a table named by
//! [`FilterConfig::tf_limit_table`](crate::config::FilterConfig) (default
//! [`DEFAULT_TF_LIMIT_TABLE`]) exists and has the limit column (default
//! [`DEFAULT_TF_LIMIT_COLUMN`]), a word found there uses its own limit. The
//! override table is optional; without it every word uses the default.

use std::sync::Arc;

use log::{debug, info, warn};

use super::{Filter, FilterContext, FilterState, mark};

use crate::analysis::token::{Token, TokenStatus};
use crate::error::Result;
use crate::table::{CounterTable, KeyType, WordTable};

/// Default per-session term-frequency limit.
pub const DEFAULT_TF_LIMIT: u64 = 131071;

/// Default name of the per-word override table.
pub const DEFAULT_TF_LIMIT_TABLE: &str = "tf_limit_words";

/// Default name of the per-word override column.
pub const DEFAULT_TF_LIMIT_COLUMN: &str = "tf_limit";

/// Caps the number of times a term is indexed per session.
#[derive(Clone, Debug, Default)]
pub struct TfLimitFilter {
    limit: Option<u64>,
}

impl TfLimitFilter {
    /// Create a filter limited by the configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with a fixed default limit.
    pub fn with_limit(limit: u64) -> Self {
        TfLimitFilter { limit: Some(limit) }
    }
}

impl Filter for TfLimitFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        let config = context.config();
        let limit = self.limit.or(config.tf_limit).unwrap_or(DEFAULT_TF_LIMIT);

        let table_name = config
            .tf_limit_table
            .as_deref()
            .unwrap_or(DEFAULT_TF_LIMIT_TABLE);
        let column = config
            .tf_limit_column
            .clone()
            .unwrap_or_else(|| DEFAULT_TF_LIMIT_COLUMN.to_string());

        let overrides = match context.tables().open_table(table_name) {
            Some(table) if table.has_column(&column) => Some(LimitOverrides { table, column }),
            Some(_) => {
                warn!(
                    "[token-filter][tf-limit] column '{table_name}.{column}' not found, per-word limits disabled"
                );
                None
            }
            None => {
                debug!("[token-filter][tf-limit] no override table '{table_name}'");
                None
            }
        };

        Ok(Box::new(TfLimitState {
            counts: context.tables().create_ephemeral(KeyType::Text),
            limit,
            overrides,
        }))
    }

    fn name(&self) -> &'static str {
        "tf_limit"
    }
}

struct LimitOverrides {
    table: Arc<WordTable>,
    column: String,
}

impl LimitOverrides {
    fn limit_for(&self, key: &[u8]) -> Option<u64> {
        let id = self.table.get(key)?;
        self.table.value(id, &self.column)?.as_uint()
    }
}

struct TfLimitState {
    counts: CounterTable,
    limit: u64,
    overrides: Option<LimitOverrides>,
}

impl FilterState for TfLimitState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        let data = current.data();
        let Some(count) = self.counts.increment(data) else {
            debug!(
                "[token-filter][tf-limit] key of {} bytes not counted",
                data.len()
            );
            return;
        };

        let limit = self
            .overrides
            .as_ref()
            .and_then(|o| o.limit_for(data))
            .unwrap_or(self.limit);

        if count > limit {
            mark(current, next, TokenStatus::SKIP_WITH_POSITION);
            info!(
                "[token-filter][tf-limit] <{}> term frequency {} exceeds limit {}",
                current.text(),
                count,
                limit
            );
        }
    }
}
