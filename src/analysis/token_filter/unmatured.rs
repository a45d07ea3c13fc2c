//! Unmatured single-character filter.

use super::{Filter, FilterContext, FilterState, mark};

use crate::analysis::char_class::{Encoding, char_len};
use crate::analysis::token::{Token, TokenStatus};
use crate::error::Result;

/// Skips single-character tokens that the tokenizer marked `UNMATURED`.
///
/// N-gram tokenizers emit such fragments at the end of their input; on their
/// own they match far too much.
#[derive(Clone, Debug, Default)]
pub struct UnmaturedOneCharFilter;

impl UnmaturedOneCharFilter {
    pub fn new() -> Self {
        UnmaturedOneCharFilter
    }
}

impl Filter for UnmaturedOneCharFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        Ok(Box::new(UnmaturedOneCharState {
            encoding: context.encoding(),
        }))
    }

    fn name(&self) -> &'static str {
        "unmatured_one_char"
    }
}

struct UnmaturedOneCharState {
    encoding: Encoding,
}

impl FilterState for UnmaturedOneCharState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        if !current.status().contains(TokenStatus::UNMATURED) {
            return;
        }
        let data = current.data();
        if !data.is_empty() && char_len(data, self.encoding) == data.len() {
            mark(current, next, TokenStatus::SKIP_WITH_POSITION);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::test_util::{apply, skipped_with_position};

    fn flags(data: &str, status: TokenStatus) -> bool {
        let mut state = UnmaturedOneCharFilter::new()
            .create(&FilterContext::default())
            .unwrap();
        skipped_with_position(&apply(state.as_mut(), &Token::new(data, 0).with_status(status)))
    }

    #[test]
    fn test_unmatured_single_character() {
        assert!(flags("c", TokenStatus::UNMATURED));
        assert!(flags("語", TokenStatus::UNMATURED | TokenStatus::LAST));
    }

    #[test]
    fn test_requires_unmatured() {
        assert!(!flags("c", TokenStatus::CONTINUE));
        assert!(!flags("語", TokenStatus::LAST));
    }

    #[test]
    fn test_requires_single_character() {
        assert!(!flags("ab", TokenStatus::UNMATURED));
        assert!(!flags("日本", TokenStatus::UNMATURED));
        assert!(!flags("", TokenStatus::UNMATURED));
    }
}
