//! Katakana prolonged sound mark filter.
//!
//! Katakana loanwords are often written both with and without a trailing
//! prolonged sound mark ("コンピューター" / "コンピュータ"). This filter
//! rewrites katakana tokens of at least four characters that end in the mark
//! to the form without it, so both spellings index the same term. It never
//! changes the token status.
//!
//! # Examples
//!
//! ```
//! use yatof::analysis::token::Token;
//! use yatof::analysis::token_filter::{Filter, FilterContext, FilterState, ProlongFilter};
//!
//! let mut state = ProlongFilter::new().create(&FilterContext::default()).unwrap();
//! let current = Token::new("サーバー", 0);
//! let mut next = current.clone();
//! state.apply(&current, &mut next);
//! assert_eq!(next.text(), "サーバ");
//! ```

use super::{Filter, FilterContext, FilterState};

use crate::analysis::char_class::{CharIter, CharType, Encoding, char_type};
use crate::analysis::token::Token;
use crate::error::Result;

/// Minimum number of characters, mark included, for the mark to be stripped.
pub const MIN_PROLONG_CHARS: usize = 4;

/// Strips the trailing prolonged sound mark from long katakana tokens.
#[derive(Clone, Debug, Default)]
pub struct ProlongFilter;

impl ProlongFilter {
    pub fn new() -> Self {
        ProlongFilter
    }
}

impl Filter for ProlongFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        let encoding = context.encoding();
        Ok(Box::new(ProlongState {
            encoding,
            mark: encoding.prolonged_sound_mark(),
        }))
    }

    fn name(&self) -> &'static str {
        "prolong"
    }
}

struct ProlongState {
    encoding: Encoding,
    mark: Option<&'static [u8]>,
}

impl FilterState for ProlongState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        let Some(mark) = self.mark else {
            return;
        };
        let data = current.data();

        let mut chars = CharIter::new(data, self.encoding);
        let mut count = 0;
        let mut last = None;
        for ch in chars.by_ref() {
            if char_type(ch, self.encoding) != CharType::Katakana {
                return;
            }
            count += 1;
            last = Some(ch);
        }

        if chars.is_exhausted() && count >= MIN_PROLONG_CHARS && last == Some(mark) {
            next.copy_data_from(&data[..data.len() - mark.len()]);
        }
    }
}
