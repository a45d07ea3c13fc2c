//! Synonym filter.
//!
//! Replaces a token by the value of its synonym column. Rewriting keeps the
//! token status: synonym expansion is a rewrite, not a skip. The synonym
//! table and its column must exist; otherwise filter creation fails.

use std::sync::Arc;

use log::debug;

use super::{Filter, FilterContext, FilterState};

use crate::analysis::token::Token;
use crate::error::{Result, YatofError};
use crate::table::{WordTable, resolve_table};

/// Default synonym table name.
pub const DEFAULT_SYNONYM_TABLE: &str = "synonyms";

/// Synonym table name used by earlier releases.
pub const LEGACY_SYNONYM_TABLE: &str = "Synonyms";

/// Default replacement column.
pub const DEFAULT_SYNONYM_COLUMN: &str = "synonym";

/// Rewrites tokens found in the synonym table.
#[derive(Clone, Debug, Default)]
pub struct SynonymFilter {
    table_name: Option<String>,
    column: Option<String>,
}

impl SynonymFilter {
    /// Create a filter using the configured table and column.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed table and column instead of the configured ones.
    pub fn with_table<T: Into<String>, C: Into<String>>(table: T, column: C) -> Self {
        SynonymFilter {
            table_name: Some(table.into()),
            column: Some(column.into()),
        }
    }
}

impl Filter for SynonymFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        let config = context.config();
        let configured = self
            .table_name
            .as_deref()
            .or(config.synonym_table.as_deref());
        let table = resolve_table(
            context.tables(),
            configured,
            DEFAULT_SYNONYM_TABLE,
            LEGACY_SYNONYM_TABLE,
        )?;

        let column = self
            .column
            .clone()
            .or_else(|| config.synonym_column.clone())
            .unwrap_or_else(|| DEFAULT_SYNONYM_COLUMN.to_string());
        if !table.has_column(&column) {
            return Err(YatofError::column_not_found(table.name(), column));
        }
        debug!(
            "[token-filter][synonym] using column '{}.{}'",
            table.name(),
            column
        );

        Ok(Box::new(SynonymState { table, column }))
    }

    fn name(&self) -> &'static str {
        "synonym"
    }
}

struct SynonymState {
    table: Arc<WordTable>,
    column: String,
}

impl FilterState for SynonymState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        let Some(id) = self.table.get(current.data()) else {
            return;
        };
        if let Some(value) = self.table.value(id, &self.column) {
            next.copy_data_from(&value.as_bytes());
        }
    }
}
