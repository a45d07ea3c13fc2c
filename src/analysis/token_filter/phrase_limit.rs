//! Phrase-frequency limit filter.
//!
//! Counts every pair of adjacent tokens within one session. The pair key is
//! the raw concatenation of the previous and the current token data. When a
//! pair occurs more than the limit, the current token is flagged
//! `SKIP_WITH_POSITION`. The first token of a session has no predecessor and
//! is never checked.

use log::info;

use super::{Filter, FilterContext, FilterState, mark};

use crate::analysis::token::{Token, TokenStatus};
use crate::error::Result;
use crate::table::{CounterTable, KeyType};

/// Default per-session phrase-frequency limit.
pub const DEFAULT_PHRASE_LIMIT: u64 = 4096;

/// Caps the number of times a token pair is indexed per session.
#[derive(Clone, Debug, Default)]
pub struct PhraseLimitFilter {
    limit: Option<u64>,
}

impl PhraseLimitFilter {
    /// Create a filter limited by the configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a filter with a fixed limit.
    pub fn with_limit(limit: u64) -> Self {
        PhraseLimitFilter { limit: Some(limit) }
    }
}

impl Filter for PhraseLimitFilter {
    fn create(&self, context: &FilterContext) -> Result<Box<dyn FilterState>> {
        let limit = self
            .limit
            .or(context.config().phrase_limit)
            .unwrap_or(DEFAULT_PHRASE_LIMIT);

        Ok(Box::new(PhraseLimitState {
            counts: context.tables().create_ephemeral(KeyType::Text),
            limit,
            previous: None,
            phrase: Vec::new(),
        }))
    }

    fn name(&self) -> &'static str {
        "phrase_limit"
    }
}

struct PhraseLimitState {
    counts: CounterTable,
    limit: u64,
    previous: Option<Vec<u8>>,
    // Reused buffer for the pair key.
    phrase: Vec<u8>,
}

impl FilterState for PhraseLimitState {
    fn apply(&mut self, current: &Token, next: &mut Token) {
        let data = current.data();

        if let Some(previous) = &self.previous {
            self.phrase.clear();
            self.phrase.extend_from_slice(previous);
            self.phrase.extend_from_slice(data);

            if let Some(count) = self.counts.increment(&self.phrase) {
                if count > self.limit {
                    mark(current, next, TokenStatus::SKIP_WITH_POSITION);
                    info!(
                        "[token-filter][phrase-limit] <{}> phrase frequency {} exceeds limit {}",
                        String::from_utf8_lossy(&self.phrase),
                        count,
                        self.limit
                    );
                }
            }
        }

        match &mut self.previous {
            Some(previous) => {
                previous.clear();
                previous.extend_from_slice(data);
            }
            None => self.previous = Some(data.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token_filter::test_util::{apply, skipped_with_position};

    fn run_all(state: &mut dyn FilterState, tokens: &[&str]) -> Vec<bool> {
        tokens
            .iter()
            .map(|t| skipped_with_position(&apply(state, &Token::new(*t, 0))))
            .collect()
    }

    #[test]
    fn test_second_pair_occurrence_flagged() {
        let mut state = PhraseLimitFilter::with_limit(1)
            .create(&FilterContext::default())
            .unwrap();

        // Pairs: "ab", "ba", "ab" (second occurrence).
        let flagged = run_all(state.as_mut(), &["a", "b", "a", "b"]);
        assert_eq!(flagged, vec![false, false, false, true]);
    }

    #[test]
    fn test_first_token_never_checked() {
        let mut state = PhraseLimitFilter::with_limit(0)
            .create(&FilterContext::default())
            .unwrap();

        let flagged = run_all(state.as_mut(), &["a", "b", "c"]);
        assert_eq!(flagged, vec![false, true, true]);
    }

    #[test]
    fn test_concatenation_key() {
        // ("ab", "c") and ("a", "bc") share the key "abc".
        let mut state = PhraseLimitFilter::with_limit(1)
            .create(&FilterContext::default())
            .unwrap();

        let flagged = run_all(state.as_mut(), &["ab", "c", "a", "bc"]);
        assert_eq!(flagged, vec![false, false, false, true]);
    }

    #[test]
    fn test_new_session_resets() {
        let filter = PhraseLimitFilter::with_limit(1);
        let context = FilterContext::default();

        let mut first = filter.create(&context).unwrap();
        assert_eq!(
            run_all(first.as_mut(), &["a", "b", "a", "b"]),
            vec![false, false, false, true]
        );

        let mut second = filter.create(&context).unwrap();
        assert_eq!(run_all(second.as_mut(), &["a", "b"]), vec![false, false]);
    }

    #[test]
    fn test_default_limit() {
        let mut state = PhraseLimitFilter::new()
            .create(&FilterContext::default())
            .unwrap();
        let tokens: Vec<&str> =
            std::iter::repeat_n("x", DEFAULT_PHRASE_LIMIT as usize + 2).collect();
        let flagged = run_all(state.as_mut(), &tokens);
        assert!(!flagged[..=DEFAULT_PHRASE_LIMIT as usize].iter().any(|f| *f));
        assert!(flagged[DEFAULT_PHRASE_LIMIT as usize + 1]);
    }

    #[test]
    fn test_long_pairs_are_counted() {
        let mut state = PhraseLimitFilter::with_limit(1)
            .create(&FilterContext::default())
            .unwrap();
        let a = "a".repeat(2100);
        let b = "b".repeat(2100);
        assert!(a.len() + b.len() > KeyType::SHORT_TEXT_MAX_LEN);

        let tokens = [a.as_str(), b.as_str(), a.as_str(), b.as_str()];
        assert_eq!(
            run_all(state.as_mut(), &tokens),
            vec![false, false, false, true]
        );
    }
}
