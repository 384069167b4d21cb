//! # JSON Token
//!
//! Defines possible tokens from tokenizing a JSON document byte sequence.
use std::fmt::Display;

/// Represents a token value from a JSON document.
///
/// String payloads borrow the raw bytes between the quotes from the input, so
/// a token sequence never outlives the buffer it was produced from.
#[derive(Debug, PartialEq, Clone, Copy, Eq)]
pub enum JToken<'a> {
    /* Delimiters */
    /// Opening curly brace
    LCurly,

    /// Closing curly brace
    RCurly,

    /// Opening square bracket
    LSquare,

    /// Closing square bracket
    RSquare,

    /// Colon character
    Colon,

    /// Comma character
    Comma,

    /* Values */
    /// String value, exactly as it appeared between the quotes
    JString(&'a [u8]),

    /// Non-negative integer value
    JNumber(i64),

    /* Reserved */
    /// A lexeme that could not be completed: an unterminated string or an
    /// integer literal that does not fit in an `i64`
    Illegal,

    /// End of file
    Eof,
}

impl Display for JToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JToken::LCurly => write!(f, "'{{'"),
            JToken::RCurly => write!(f, "'}}'"),
            JToken::LSquare => write!(f, "'['"),
            JToken::RSquare => write!(f, "']'"),
            JToken::Colon => write!(f, "':'"),
            JToken::Comma => write!(f, "','"),
            JToken::JString(raw) => {
                write!(f, "string \"{}\"", String::from_utf8_lossy(raw))
            }
            JToken::JNumber(n) => write!(f, "number {n}"),
            JToken::Illegal => write!(f, "illegal lexeme"),
            JToken::Eof => write!(f, "end of input"),
        }
    }
}
