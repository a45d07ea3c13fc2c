//! Token types and status flags for the filter pipeline.
//!
//! A [`Token`] is the unit every filter operates on: raw encoded bytes, a
//! [`TokenStatus`] bitset carrying disposition instructions for downstream
//! consumers, and the position assigned once the token leaves the chain.
//!
//! # Skipping and positions
//!
//! Two flags suppress a token from the index, and they differ in how the
//! consumer accounts for positions:
//!
//! ```text
//! Input:   "a"   "the"   "b"
//! Ignore "the" (SKIP_WITH_POSITION):  a@0   (the@1 reserved)   b@2
//! Remove "the" (SKIP):                a@0                      b@1
//! ```
//!
//! # Examples
//!
//! ```
//! use yatof::analysis::token::{Token, TokenStatus};
//!
//! let token = Token::new("hello", 0).with_status(TokenStatus::UNMATURED);
//! assert_eq!(token.data(), b"hello");
//! assert!(token.status().contains(TokenStatus::UNMATURED));
//! assert!(!token.is_skipped());
//! ```

use std::borrow::Cow;
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Bitset of token disposition flags.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenStatus(u32);

impl TokenStatus {
    /// No flags set.
    pub const CONTINUE: TokenStatus = TokenStatus(0);
    /// The last token of the input.
    pub const LAST: TokenStatus = TokenStatus(1 << 0);
    /// The token overlaps the previous one (n-gram tokenizers).
    pub const OVERLAP: TokenStatus = TokenStatus(1 << 1);
    /// A partial token produced mid n-gram.
    pub const UNMATURED: TokenStatus = TokenStatus(1 << 2);
    /// The tokenizer reached the end of its input.
    pub const REACH_END: TokenStatus = TokenStatus(1 << 3);
    /// Omit the token entirely and do not reserve a position.
    pub const SKIP: TokenStatus = TokenStatus(1 << 4);
    /// Omit the token from the index but reserve its position.
    pub const SKIP_WITH_POSITION: TokenStatus = TokenStatus(1 << 5);
    /// Force prefix search for the token.
    pub const FORCE_PREFIX: TokenStatus = TokenStatus(1 << 6);

    const NAMES: [(TokenStatus, &'static str); 7] = [
        (TokenStatus::LAST, "LAST"),
        (TokenStatus::OVERLAP, "OVERLAP"),
        (TokenStatus::UNMATURED, "UNMATURED"),
        (TokenStatus::REACH_END, "REACH_END"),
        (TokenStatus::SKIP, "SKIP"),
        (TokenStatus::SKIP_WITH_POSITION, "SKIP_WITH_POSITION"),
        (TokenStatus::FORCE_PREFIX, "FORCE_PREFIX"),
    ];

    /// Build a status from raw bits.
    pub const fn from_bits(bits: u32) -> Self {
        TokenStatus(bits)
    }

    /// Raw bits.
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// True when no flag is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True when every flag of `other` is set.
    pub const fn contains(&self, other: TokenStatus) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when any flag of `other` is set.
    pub const fn intersects(&self, other: TokenStatus) -> bool {
        self.0 & other.0 != 0
    }

    /// Set the flags of `other`.
    pub fn insert(&mut self, other: TokenStatus) {
        self.0 |= other.0;
    }

    /// Union of both flag sets.
    pub const fn union(self, other: TokenStatus) -> Self {
        TokenStatus(self.0 | other.0)
    }

    /// Names of the set flags, in bit order.
    pub fn flag_names(&self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl BitOr for TokenStatus {
    type Output = TokenStatus;

    fn bitor(self, rhs: TokenStatus) -> TokenStatus {
        self.union(rhs)
    }
}

impl BitOrAssign for TokenStatus {
    fn bitor_assign(&mut self, rhs: TokenStatus) {
        self.insert(rhs);
    }
}

impl fmt::Debug for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenStatus({self})")
    }
}

impl fmt::Display for TokenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("CONTINUE");
        }
        f.write_str(&self.flag_names().join("|"))
    }
}

/// A single token flowing through the filter chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    data: Vec<u8>,
    status: TokenStatus,
    position: u32,
}

impl Token {
    /// Create a new token with the given data and position.
    pub fn new<D: Into<Vec<u8>>>(data: D, position: u32) -> Self {
        Token {
            data: data.into(),
            status: TokenStatus::CONTINUE,
            position,
        }
    }

    /// Set the status of this token.
    pub fn with_status(mut self, status: TokenStatus) -> Self {
        self.status = status;
        self
    }

    /// The encoded token bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Replace the token bytes.
    ///
    /// The new data must be valid in the session encoding.
    pub fn set_data<D: Into<Vec<u8>>>(&mut self, data: D) {
        self.data = data.into();
    }

    /// Replace the token bytes with a copy of `data`, reusing the buffer.
    pub fn copy_data_from(&mut self, data: &[u8]) {
        self.data.clear();
        self.data.extend_from_slice(data);
    }

    pub fn status(&self) -> TokenStatus {
        self.status
    }

    pub fn set_status(&mut self, status: TokenStatus) {
        self.status = status;
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn set_position(&mut self, position: u32) {
        self.position = position;
    }

    /// Length of the token data in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the token is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The token data as text, replacing invalid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// True when either skip flag is set.
    pub fn is_skipped(&self) -> bool {
        self.status
            .intersects(TokenStatus::SKIP | TokenStatus::SKIP_WITH_POSITION)
    }

    /// True unless the token is hard-skipped.
    pub fn reserves_position(&self) -> bool {
        !self.status.contains(TokenStatus::SKIP)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

/// A token stream represents a sequence of tokens from a tokenizer.
pub type TokenStream = Box<dyn Iterator<Item = Token>>;

/// Trait for types that can produce a token stream.
pub trait IntoTokenStream {
    /// Convert this type into a token stream.
    fn into_token_stream(self) -> TokenStream;
}

impl IntoTokenStream for Vec<Token> {
    fn into_token_stream(self) -> TokenStream {
        Box::new(self.into_iter())
    }
}
