//! Filter chain composition.
//!
//! A [`FilterChain`] is an ordered list of registered filters. Opening a
//! [`FilterSession`] creates one state per filter, in registration order; the
//! session then runs every token through all states and assigns positions.
//! Chain order is part of the contract: a filter sees the token as left by
//! the filters before it, including flags it cannot clear.
//!
//! # Examples
//!
//! ```
//! use yatof::analysis::chain::FilterChain;
//! use yatof::analysis::token::{Token, TokenStatus};
//! use yatof::analysis::token_filter::{FilterContext, FilterKind};
//!
//! let chain = FilterChain::from_kinds(&[FilterKind::MinLength, FilterKind::Symbol]);
//! let mut session = chain.open_session(&FilterContext::default()).unwrap();
//!
//! let token = session.filter(Token::new("ab", 0));
//! assert!(token.status().contains(TokenStatus::SKIP_WITH_POSITION));
//! ```

use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::{Filter, FilterContext, FilterKind, FilterState};
use crate::error::Result;

/// An ordered list of token filters.
#[derive(Clone, Default)]
pub struct FilterChain {
    filters: Vec<Arc<dyn Filter>>,
}

impl FilterChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter to the chain.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append a filter in place.
    pub fn push(&mut self, filter: Arc<dyn Filter>) {
        self.filters.push(filter);
    }

    /// Build a chain from registry kinds.
    pub fn from_kinds(kinds: &[FilterKind]) -> Self {
        FilterChain {
            filters: kinds.iter().map(FilterKind::build).collect(),
        }
    }

    /// Build a chain from registered filter names.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let kinds = names
            .iter()
            .map(|name| name.as_ref().parse::<FilterKind>())
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_kinds(&kinds))
    }

    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Start a tokenization session.
    ///
    /// Creates each filter's state in registration order. If a creation
    /// fails, the states created so far are destroyed in reverse order and
    /// the error is returned.
    pub fn open_session(&self, context: &FilterContext) -> Result<FilterSession> {
        let mut session = FilterSession {
            states: Vec::with_capacity(self.filters.len()),
            next_position: 0,
        };

        for filter in &self.filters {
            match filter.create(context) {
                Ok(state) => {
                    debug!("[filter-chain] created state for '{}'", filter.name());
                    session.states.push(NamedState {
                        name: filter.name(),
                        state,
                    });
                }
                Err(e) => {
                    debug!(
                        "[filter-chain] creating '{}' failed, aborting session: {}",
                        filter.name(),
                        e
                    );
                    return Err(e);
                }
            }
        }

        Ok(session)
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.filters.iter().map(|filter| filter.name()))
            .finish()
    }
}

struct NamedState {
    name: &'static str,
    state: Box<dyn FilterState>,
}

/// One tokenization pass through a filter chain.
///
/// Owns the per-session state of every filter. Dropping the session destroys
/// the states in reverse creation order.
pub struct FilterSession {
    states: Vec<NamedState>,
    next_position: u32,
}

impl FilterSession {
    /// Run one token through every filter and assign its position.
    ///
    /// A token flagged `SKIP` takes no position. Any other token, including
    /// one flagged `SKIP_WITH_POSITION`, takes the next position.
    pub fn filter(&mut self, token: Token) -> Token {
        let mut current = token;
        for named in &mut self.states {
            let mut next = current.clone();
            named.state.apply(&current, &mut next);
            next.set_status(next.status() | current.status());
            current = next;
        }

        current.set_position(self.next_position);
        if current.reserves_position() {
            self.next_position = self.next_position.saturating_add(1);
        }
        current
    }

    /// Run a whole token stream through the chain.
    pub fn filter_stream(&mut self, tokens: TokenStream) -> Vec<Token> {
        tokens.map(|token| self.filter(token)).collect()
    }

    /// Number of filter states in this session.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// The position the next position-reserving token will take.
    pub fn next_position(&self) -> u32 {
        self.next_position
    }
}

impl Drop for FilterSession {
    fn drop(&mut self) {
        while let Some(named) = self.states.pop() {
            debug!("[filter-chain] destroying state for '{}'", named.name);
            drop(named.state);
        }
    }
}

impl fmt::Debug for FilterSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSession")
            .field(
                "states",
                &self.states.iter().map(|s| s.name).collect::<Vec<_>>(),
            )
            .field("next_position", &self.next_position)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::{IntoTokenStream, TokenStatus};
    use crate::error::YatofError;
    use parking_lot::Mutex;

    type Log = Arc<Mutex<Vec<String>>>;

    /// Records creation and destruction, and optionally flags every token.
    struct RecordingFilter {
        name: &'static str,
        log: Log,
        flag: TokenStatus,
    }

    impl RecordingFilter {
        fn new(name: &'static str, log: &Log) -> Arc<dyn Filter> {
            Self::flagging(name, log, TokenStatus::CONTINUE)
        }

        fn flagging(name: &'static str, log: &Log, flag: TokenStatus) -> Arc<dyn Filter> {
            Arc::new(RecordingFilter {
                name,
                log: log.clone(),
                flag,
            })
        }
    }

    impl Filter for RecordingFilter {
        fn create(&self, _context: &FilterContext) -> Result<Box<dyn FilterState>> {
            self.log.lock().push(format!("create {}", self.name));
            Ok(Box::new(RecordingState {
                name: self.name,
                log: self.log.clone(),
                flag: self.flag,
            }))
        }

        fn name(&self) -> &'static str {
            self.name
        }
    }

    struct RecordingState {
        name: &'static str,
        log: Log,
        flag: TokenStatus,
    }

    impl FilterState for RecordingState {
        fn apply(&mut self, current: &Token, next: &mut Token) {
            self.log
                .lock()
                .push(format!("apply {} {}", self.name, current.status()));
            next.set_status(next.status() | self.flag);
        }
    }

    impl Drop for RecordingState {
        fn drop(&mut self) {
            self.log.lock().push(format!("destroy {}", self.name));
        }
    }

    struct FailingFilter;

    impl Filter for FailingFilter {
        fn create(&self, _context: &FilterContext) -> Result<Box<dyn FilterState>> {
            Err(YatofError::table_not_found("missing"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    /// Clears every flag, which a well-behaved filter never does.
    struct ClearingFilter;

    impl Filter for ClearingFilter {
        fn create(&self, _context: &FilterContext) -> Result<Box<dyn FilterState>> {
            Ok(Box::new(ClearingFilter))
        }

        fn name(&self) -> &'static str {
            "clearing"
        }
    }

    impl FilterState for ClearingFilter {
        fn apply(&mut self, _current: &Token, next: &mut Token) {
            next.set_status(TokenStatus::CONTINUE);
        }
    }

    #[test]
    fn test_states_destroyed_in_reverse_order() {
        let log = Log::default();
        let chain = FilterChain::new()
            .add_filter(RecordingFilter::new("a", &log))
            .add_filter(RecordingFilter::new("b", &log))
            .add_filter(RecordingFilter::new("c", &log));

        let session = chain.open_session(&FilterContext::default()).unwrap();
        assert_eq!(session.len(), 3);
        drop(session);

        assert_eq!(
            *log.lock(),
            vec![
                "create a", "create b", "create c", "destroy c", "destroy b", "destroy a"
            ]
        );
    }

    #[test]
    fn test_creation_failure_tears_down_created_states() {
        let log = Log::default();
        let chain = FilterChain::new()
            .add_filter(RecordingFilter::new("a", &log))
            .add_filter(RecordingFilter::new("b", &log))
            .add_filter(Arc::new(FailingFilter))
            .add_filter(RecordingFilter::new("c", &log));

        let result = chain.open_session(&FilterContext::default());
        assert!(matches!(result, Err(YatofError::TableNotFound(_))));
        assert_eq!(
            *log.lock(),
            vec!["create a", "create b", "destroy b", "destroy a"]
        );
    }

    #[test]
    fn test_filters_applied_in_order_with_accumulated_flags() {
        let log = Log::default();
        let chain = FilterChain::new()
            .add_filter(RecordingFilter::flagging("a", &log, TokenStatus::OVERLAP))
            .add_filter(RecordingFilter::new("b", &log));

        let mut session = chain.open_session(&FilterContext::default()).unwrap();
        let token = session.filter(Token::new("x", 0));
        assert_eq!(token.status(), TokenStatus::OVERLAP);
        drop(session);

        let log = log.lock();
        assert_eq!(log[2], "apply a CONTINUE");
        assert_eq!(log[3], "apply b OVERLAP");
    }

    #[test]
    fn test_flags_never_cleared() {
        let log = Log::default();
        let chain = FilterChain::new()
            .add_filter(RecordingFilter::flagging("a", &log, TokenStatus::SKIP))
            .add_filter(Arc::new(ClearingFilter));

        let mut session = chain.open_session(&FilterContext::default()).unwrap();
        let token = session.filter(Token::new("x", 0).with_status(TokenStatus::LAST));
        assert_eq!(token.status(), TokenStatus::LAST | TokenStatus::SKIP);
    }

    #[test]
    fn test_position_assignment() {
        let chain = FilterChain::from_kinds(&[FilterKind::Symbol, FilterKind::MinLength]);
        let tokens = vec![
            Token::new("hello", 7),
            Token::new("!!!", 7),
            Token::new("world", 7),
            Token::new("gone", 7).with_status(TokenStatus::SKIP),
            Token::new("again", 7),
        ];

        let mut session = chain.open_session(&FilterContext::default()).unwrap();
        let tokens = session.filter_stream(tokens.into_token_stream());
        let positions: Vec<u32> = tokens.iter().map(Token::position).collect();

        // "!!!" keeps its position, "gone" takes none.
        assert_eq!(positions, vec![0, 1, 2, 3, 3]);
        assert_eq!(session.next_position(), 4);
    }

    #[test]
    fn test_position_saturates() {
        let chain = FilterChain::new();
        let mut session = chain.open_session(&FilterContext::default()).unwrap();
        session.next_position = u32::MAX - 1;

        let positions: Vec<u32> = (0..3)
            .map(|_| session.filter(Token::new("x", 0)).position())
            .collect();
        assert_eq!(positions, vec![u32::MAX - 1, u32::MAX, u32::MAX]);
        assert_eq!(session.next_position(), u32::MAX);
    }

    #[test]
    fn test_empty_chain_passes_tokens_through() {
        let chain = FilterChain::new();
        assert!(chain.is_empty());

        let mut session = chain.open_session(&FilterContext::default()).unwrap();
        let token = session.filter(Token::new("x", 9).with_status(TokenStatus::UNMATURED));
        assert_eq!(token.data(), b"x");
        assert_eq!(token.status(), TokenStatus::UNMATURED);
        assert_eq!(token.position(), 0);
    }

    #[test]
    fn test_from_names() {
        let chain = FilterChain::from_names(&["TokenFilterMaxLength", "digit", "atgc"]).unwrap();
        let names: Vec<&str> = chain.filters().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["max_length", "digit", "atgc"]);

        assert!(FilterChain::from_names(&["max_length", "nope"]).is_err());
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<FilterSession>();
        assert_send::<FilterChain>();
    }
}
