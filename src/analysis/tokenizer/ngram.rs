//! N-gram tokenizer implementation.

use crate::analysis::token::{Token, TokenStatus, TokenStream};
use crate::analysis::tokenizer::Tokenizer;
use crate::error::{Result, YatofError};

/// A tokenizer that generates character n-grams.
///
/// One gram starts at every character. Grams near the end of the text are
/// shorter than `n` and carry `UNMATURED`; every gram after the first carries
/// `OVERLAP`; the final gram carries `LAST`.
///
/// # Examples
///
/// ```
/// use yatof::analysis::token::TokenStatus;
/// use yatof::analysis::tokenizer::ngram::NgramTokenizer;
/// use yatof::analysis::tokenizer::Tokenizer;
///
/// let tokenizer = NgramTokenizer::bigram();
/// let tokens: Vec<_> = tokenizer.tokenize("abc").unwrap().collect();
///
/// let texts: Vec<_> = tokens.iter().map(|t| t.text().into_owned()).collect();
/// assert_eq!(texts, vec!["ab", "bc", "c"]);
/// assert!(tokens[2].status().contains(TokenStatus::UNMATURED | TokenStatus::LAST));
/// ```
#[derive(Clone, Debug)]
pub struct NgramTokenizer {
    /// N-gram size in characters
    n: usize,
}

impl NgramTokenizer {
    /// Create a new n-gram tokenizer.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` is 0.
    pub fn new(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(YatofError::analysis("n-gram size must be at least 1"));
        }
        Ok(Self { n })
    }

    /// Create a bigram tokenizer (n=2).
    pub fn bigram() -> Self {
        Self { n: 2 }
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

impl Tokenizer for NgramTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        // Byte offset of every character, plus the end of the text.
        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        let char_count = bounds.len();
        bounds.push(text.len());

        let mut tokens = Vec::with_capacity(char_count);
        for start in 0..char_count {
            let end = (start + self.n).min(char_count);

            let mut status = TokenStatus::CONTINUE;
            if end - start < self.n {
                status |= TokenStatus::UNMATURED;
            }
            if start > 0 {
                status |= TokenStatus::OVERLAP;
            }
            if start + 1 == char_count {
                status |= TokenStatus::LAST;
            }

            tokens.push(
                Token::new(&text[bounds[start]..bounds[end]], start as u32).with_status(status),
            );
        }

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "ngram"
    }
}
