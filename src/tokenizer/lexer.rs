//! # JSON Lexer
//!
//! Tokenizes an input byte sequence from a JSON document into a sequence of
//! tokens terminated by [`JToken::Eof`].
//!
//! The lexer never fails. Bytes it does not recognize are dropped (and
//! reported on the `warn` log level), and lexemes it cannot complete become
//! [`JToken::Illegal`] for the parser to reject.
use log::{debug, trace, warn};

use crate::tokenizer::JToken;

/// A lexer that can be used to split an input slice of bytes from a JSON
/// document into tokens.
struct Lexer<'a> {
    /// The input sequence of bytes to tokenize
    input: &'a [u8],
    /// Current position (current byte)
    position: usize,
    /// Current reading position (after current byte)
    read_position: usize,
    /// Current byte under examination, `None` once past the end of input
    byte: Option<u8>,
}

impl<'a> Lexer<'a> {
    fn new(input: &'a [u8]) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            byte: None,
        };
        // put the lexer in an initial working state
        lexer.read_byte();
        lexer
    }

    /// Reads and consumes the next byte in the input sequence.
    fn read_byte(&mut self) {
        self.byte = self.input.get(self.read_position).copied();
        // Advance the positions
        self.position = self.read_position;
        self.read_position += 1;
    }

    /// Consume whitespace byte(s) starting from the current position.
    fn skip_whitespace(&mut self) {
        // space, \t, \n, \r, vertical tab, form feed
        while matches!(
            self.byte,
            Some(b' ' | b'\t' | b'\n' | b'\r' | 0x0B | 0x0C)
        ) {
            self.read_byte();
        }
    }

    /// Returns the next token in the input sequence from the current position.
    fn next_token(&mut self) -> JToken<'a> {
        loop {
            self.skip_whitespace();

            let Some(byte) = self.byte else {
                return JToken::Eof;
            };

            let token = match byte {
                b'{' => JToken::LCurly,
                b'}' => JToken::RCurly,
                b'[' => JToken::LSquare,
                b']' => JToken::RSquare,
                b':' => JToken::Colon,
                b',' => JToken::Comma,
                b'"' => return self.read_string(),
                b'0'..=b'9' => return self.read_number(),
                other => {
                    warn!(
                        "skipping unrecognized byte {:?} at offset {}",
                        char::from(other),
                        self.position
                    );
                    self.read_byte();
                    continue;
                }
            };

            self.read_byte();
            return token;
        }
    }

    /// Reads a string value and returns the corresponding token.
    ///
    /// The payload is every byte up to the next `"`; backslashes carry no
    /// special meaning.
    fn read_string(&mut self) -> JToken<'a> {
        // Skip opening quote
        let start_pos = self.position + 1;
        self.read_byte();
        while self.byte.is_some_and(|b| b != b'"') {
            self.read_byte();
        }

        if self.byte.is_none() {
            warn!("unterminated string starting at offset {}", start_pos - 1);
            return JToken::Illegal;
        }

        let end_pos = self.position;
        // Skip closing quote
        self.read_byte();

        JToken::JString(&self.input[start_pos..end_pos])
    }

    /// Reads a maximal run of ASCII digits as a base-10 integer and returns a
    /// [`JToken::JNumber`] token.
    fn read_number(&mut self) -> JToken<'a> {
        let start_pos = self.position;
        while self.byte.is_some_and(|b| b.is_ascii_digit()) {
            self.read_byte();
        }

        let digits = &self.input[start_pos..self.position];
        let value = digits.iter().try_fold(0_i64, |acc, digit| {
            acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
        });

        value.map_or_else(
            || {
                warn!("integer literal at offset {start_pos} overflows i64");
                JToken::Illegal
            },
            JToken::JNumber,
        )
    }
}

/// Tokenize a JSON document from bytes into tokens.
///
/// The returned sequence is never empty and always ends with exactly one
/// [`JToken::Eof`].
pub fn tokenize(text: &[u8]) -> Vec<JToken<'_>> {
    let mut lexer = Lexer::new(text);
    let mut tokens: Vec<JToken> = vec![];

    loop {
        let token = lexer.next_token();
        trace!("token: {token}");
        let is_eof = matches!(token, JToken::Eof);

        tokens.push(token);

        if is_eof {
            break;
        }
    }

    debug!("tokenized {} bytes into {} tokens", text.len(), tokens.len());
    tokens
}
