//! Character classification over encoded token bytes.
//!
//! Token data is a raw byte sequence in the session's text encoding. Filters
//! that reason about characters walk the bytes with [`char_len`], which never
//! over- or under-reads a multi-byte sequence, and classify each character
//! with [`char_type`].
//!
//! A zero return from [`char_len`] means the input cannot be decoded any
//! further (end of buffer, invalid lead byte, or a truncated sequence).
//! Callers stop walking on zero; it is not an error.
//!
//! # Examples
//!
//! ```
//! use yatof::analysis::char_class::{char_len, char_type, CharType, Encoding};
//!
//! let data = "テスト".as_bytes();
//! assert_eq!(char_len(data, Encoding::Utf8), 3);
//! assert_eq!(char_type(data, Encoding::Utf8), CharType::Katakana);
//! assert_eq!(char_len(&[0xff], Encoding::Utf8), 0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, YatofError};

/// Text encodings a tokenization session can run under.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// UTF-8
    #[default]
    Utf8,
    /// EUC-JP
    EucJp,
    /// Shift_JIS
    ShiftJis,
    /// ISO-8859-1
    Latin1,
    /// KOI8-R
    Koi8r,
    /// Opaque single-byte data
    None,
}

impl Encoding {
    /// Encoded bytes of the katakana prolonged sound mark (U+30FC), if the
    /// encoding can express it.
    pub fn prolonged_sound_mark(&self) -> Option<&'static [u8]> {
        match self {
            Encoding::Utf8 => Some(&[0xE3, 0x83, 0xBC]),
            Encoding::EucJp => Some(&[0xA1, 0xBC]),
            Encoding::ShiftJis => Some(&[0x81, 0x5B]),
            Encoding::Latin1 | Encoding::Koi8r | Encoding::None => None,
        }
    }

    /// Canonical name of the encoding.
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::EucJp => "euc_jp",
            Encoding::ShiftJis => "sjis",
            Encoding::Latin1 => "latin1",
            Encoding::Koi8r => "koi8r",
            Encoding::None => "none",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = YatofError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "euc_jp" | "euc-jp" | "eucjp" => Ok(Encoding::EucJp),
            "sjis" | "shift_jis" | "shift-jis" => Ok(Encoding::ShiftJis),
            "latin1" | "iso-8859-1" => Ok(Encoding::Latin1),
            "koi8r" | "koi8-r" => Ok(Encoding::Koi8r),
            "none" => Ok(Encoding::None),
            other => Err(YatofError::config(format!("unknown encoding: {other}"))),
        }
    }
}

/// Coarse character classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharType {
    /// No character (empty or undecodable input)
    Null,
    /// Letters
    Alpha,
    /// Numeric characters, including full-width digits
    Digit,
    /// Punctuation and other symbols
    Symbol,
    /// Hiragana
    Hiragana,
    /// Katakana, including the prolonged sound mark and half-width forms
    Katakana,
    /// CJK ideographs
    Kanji,
    /// Anything else (whitespace, controls, unassigned)
    Others,
}

/// Returns the encoded length in bytes of the first character in `bytes`,
/// or 0 if no complete character can be decoded.
pub fn char_len(bytes: &[u8], encoding: Encoding) -> usize {
    let Some(&lead) = bytes.first() else {
        return 0;
    };

    let len = match encoding {
        Encoding::Utf8 => {
            let len = match lead {
                0x00..=0x7F => 1,
                0xC2..=0xDF => 2,
                0xE0..=0xEF => 3,
                0xF0..=0xF4 => 4,
                _ => return 0,
            };
            if bytes.len() < len || std::str::from_utf8(&bytes[..len]).is_err() {
                return 0;
            }
            len
        }
        Encoding::EucJp => match lead {
            0x00..=0x7F => 1,
            0x8E => 2,
            0x8F => 3,
            0xA1..=0xFE => 2,
            _ => return 0,
        },
        Encoding::ShiftJis => match lead {
            0x00..=0x7F | 0xA1..=0xDF => 1,
            0x81..=0x9F | 0xE0..=0xFC => 2,
            _ => return 0,
        },
        Encoding::Latin1 | Encoding::Koi8r | Encoding::None => 1,
    };

    if bytes.len() < len {
        return 0;
    }

    // Trail bytes of the double-byte encodings.
    let trail_ok = match encoding {
        Encoding::EucJp => bytes[1..len].iter().all(|&b| (0xA1..=0xFE).contains(&b)),
        Encoding::ShiftJis => bytes[1..len]
            .iter()
            .all(|&b| matches!(b, 0x40..=0x7E | 0x80..=0xFC)),
        _ => true,
    };
    if trail_ok { len } else { 0 }
}

/// Classifies the first character in `bytes`.
pub fn char_type(bytes: &[u8], encoding: Encoding) -> CharType {
    let len = char_len(bytes, encoding);
    if len == 0 {
        return CharType::Null;
    }
    let ch = &bytes[..len];

    if len == 1 && ch[0] < 0x80 {
        return ascii_type(ch[0]);
    }

    match encoding {
        Encoding::Utf8 => std::str::from_utf8(ch)
            .ok()
            .and_then(|s| s.chars().next())
            .map(unicode_type)
            .unwrap_or(CharType::Null),
        Encoding::EucJp => euc_jp_type(ch),
        Encoding::ShiftJis => shift_jis_type(ch),
        Encoding::Latin1 => match ch[0] {
            0xD7 | 0xF7 => CharType::Symbol,
            0xC0..=0xFF => CharType::Alpha,
            0xA1..=0xBF => CharType::Symbol,
            _ => CharType::Others,
        },
        Encoding::Koi8r => match ch[0] {
            0xC0..=0xFF | 0xA3 | 0xB3 => CharType::Alpha,
            0x80..=0xBF => CharType::Symbol,
            _ => CharType::Others,
        },
        Encoding::None => CharType::Others,
    }
}

fn ascii_type(b: u8) -> CharType {
    if b.is_ascii_digit() {
        CharType::Digit
    } else if b.is_ascii_alphabetic() {
        CharType::Alpha
    } else if b.is_ascii_punctuation() {
        CharType::Symbol
    } else {
        CharType::Others
    }
}

fn unicode_type(c: char) -> CharType {
    match c {
        '\u{3041}'..='\u{309F}' => CharType::Hiragana,
        // U+30FB KATAKANA MIDDLE DOT is punctuation.
        '\u{30FB}' => CharType::Symbol,
        '\u{30A1}'..='\u{30FF}' | '\u{31F0}'..='\u{31FF}' | '\u{FF66}'..='\u{FF9F}' => {
            CharType::Katakana
        }
        '\u{3005}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FFFF}' => CharType::Kanji,
        c if c.is_numeric() => CharType::Digit,
        c if c.is_alphabetic() => CharType::Alpha,
        c if c.is_whitespace() || c.is_control() => CharType::Others,
        _ => CharType::Symbol,
    }
}

fn euc_jp_type(ch: &[u8]) -> CharType {
    match ch {
        [0x8E, _] => CharType::Katakana,
        [0xA1, 0xBC] => CharType::Katakana,
        [0xA1 | 0xA2, _] => CharType::Symbol,
        [0xA3, 0xB0..=0xB9] => CharType::Digit,
        [0xA3, 0xC1..=0xFA] => CharType::Alpha,
        [0xA4, _] => CharType::Hiragana,
        [0xA5, _] => CharType::Katakana,
        [0xB0..=0xF4, _] => CharType::Kanji,
        _ => CharType::Others,
    }
}

fn shift_jis_type(ch: &[u8]) -> CharType {
    if ch.len() == 1 {
        // Single-byte 0xA1..=0xDF is half-width katakana.
        return CharType::Katakana;
    }
    let code = u16::from_be_bytes([ch[0], ch[1]]);
    match code {
        0x815B => CharType::Katakana,
        0x8140..=0x81FC => CharType::Symbol,
        0x824F..=0x8258 => CharType::Digit,
        0x8260..=0x829A => CharType::Alpha,
        0x829F..=0x82F1 => CharType::Hiragana,
        0x8340..=0x8396 => CharType::Katakana,
        0x889F..=0x9FFC | 0xE040..=0xEAA4 => CharType::Kanji,
        _ => CharType::Others,
    }
}

/// Iterator over the encoded characters of a byte slice.
///
/// Iteration ends at the end of the input or at the first undecodable
/// position; [`CharIter::is_exhausted`] tells the two apart.
#[derive(Clone, Debug)]
pub struct CharIter<'a> {
    rest: &'a [u8],
    encoding: Encoding,
}

impl<'a> CharIter<'a> {
    pub fn new(bytes: &'a [u8], encoding: Encoding) -> Self {
        CharIter {
            rest: bytes,
            encoding,
        }
    }

    /// True when every byte of the input has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.rest.is_empty()
    }
}

impl<'a> Iterator for CharIter<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        let len = char_len(self.rest, self.encoding);
        if len == 0 {
            return None;
        }
        let (ch, rest) = self.rest.split_at(len);
        self.rest = rest;
        Some(ch)
    }
}

/// Number of characters in `bytes`, or `None` if it does not decode fully.
pub fn char_count(bytes: &[u8], encoding: Encoding) -> Option<usize> {
    let mut chars = CharIter::new(bytes, encoding);
    let count = chars.by_ref().count();
    chars.is_exhausted().then_some(count)
}

/// True when `bytes` is non-empty, decodes fully, and every character
/// satisfies `pred`. Stops at the first counter-example.
pub fn all_chars<F>(bytes: &[u8], encoding: Encoding, mut pred: F) -> bool
where
    F: FnMut(CharType) -> bool,
{
    let mut chars = CharIter::new(bytes, encoding);
    let mut count = 0;
    for ch in chars.by_ref() {
        if !pred(char_type(ch, encoding)) {
            return false;
        }
        count += 1;
    }
    count > 0 && chars.is_exhausted()
}
