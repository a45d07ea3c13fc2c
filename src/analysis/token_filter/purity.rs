//! Character-class purity filters.
//!
//! A token made only of symbols (or only of digits) carries no searchable
//! meaning and is flagged `SKIP_WITH_POSITION`. One character of another
//! class anywhere in the token keeps it. Bytes that do not decode stop the
//! scan and keep the token.

use super::{Filter, FilterContext, FilterState, mark};

use crate::analysis::char_class::{CharType, Encoding, all_chars};
use crate::analysis::token::{Token, TokenStatus};
use crate::error::Result;

/// Skips tokens consisting only of symbol characters.
#[derive(Clone, Debug, Default)]
pub struct SymbolFilter;

impl SymbolFilter {
    pub fn new() -> Self {
        SymbolFilter
    }
}

impl Filter for SymbolFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        Ok(Box::new(PurityState {
            target: CharType::Symbol,
            encoding: context.encoding(),
        }))
    }

    fn name(&self) -> &'static str {
        "symbol"
    }
}

/// Skips tokens consisting only of digit characters.
#[derive(Clone, Debug, Default)]
pub struct DigitFilter;

impl DigitFilter {
    pub fn new() -> Self {
        DigitFilter
    }
}

impl Filter for DigitFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        Ok(Box::new(PurityState {
            target: CharType::Digit,
            encoding: context.encoding(),
        }))
    }

    fn name(&self) -> &'static str {
        "digit"
    }
}

struct PurityState {
    target: CharType,
    encoding: Encoding,
}

impl FilterState for PurityState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        if all_chars(current.data(), self.encoding, |t| t == self.target) {
            mark(current, next, TokenStatus::SKIP_WITH_POSITION);
        }
    }
}
