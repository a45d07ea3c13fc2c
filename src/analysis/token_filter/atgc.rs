//! Nucleotide sequence filter.

use super::{Filter, FilterContext, FilterState, mark};

use crate::analysis::token::{Token, TokenStatus};
use crate::error::Result;

/// Length of a run of nucleotide codes that marks a token as a sequence.
pub const ATGC_RUN_THRESHOLD: usize = 9;

/// Skips tokens containing a run of at least [`ATGC_RUN_THRESHOLD`]
/// nucleotide codes (`A`, `T`, `G`, `C`, `U`, case-insensitive).
///
/// Gene sequences embedded in documents produce long, meaningless terms.
#[derive(Clone, Debug, Default)]
pub struct AtgcFilter;

impl AtgcFilter {
    pub fn new() -> Self {
        AtgcFilter
    }
}

impl Filter for AtgcFilter {
    fn create(&self, _context: &FilterContext) -> Result<Box<dyn FilterState>> {
        Ok(Box::new(AtgcState))
    }

    fn name(&self) -> &'static str {
        "atgc"
    }
}

struct AtgcState;

fn is_nucleotide(b: u8) -> bool {
    matches!(b.to_ascii_uppercase(), b'A' | b'T' | b'G' | b'C' | b'U')
}

impl FilterState for AtgcState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        let mut run = 0;
        for &b in current.data() {
            if !is_nucleotide(b) {
                run = 0;
                continue;
            }
            run += 1;
            if run >= ATGC_RUN_THRESHOLD {
                mark(current, next, TokenStatus::SKIP_WITH_POSITION);
                return;
            }
        }
    }
}
