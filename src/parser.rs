/*!
# JSON Parser

Recursive-descent parser that turns a token sequence from the
[`tokenizer`](crate::tokenizer) into a [`Value`] tree.

## Examples

The public API method [`parse`] accepts any byte buffer and returns the
document root, which is always an object or an array:

```rust
use minijson::{Value, parser};

let root = parser::parse(r#"{"a": [1, 2, {"b": "x"}]}"#).expect("Invalid document");
let a = root.get("a").and_then(Value::as_array).expect("Missing array");
assert_eq!(a[0], Value::Number(1));
assert_eq!(a[2].get("b").and_then(Value::as_str), Some("x"));
```

## Errors

If the input is not a well-formed document, [`parse`] returns the first
[`ParseError`] encountered and no tree:

```rust
use minijson::parser::{self, ParseError};

let result = parser::parse("[1, 2,]");
assert!(matches!(result, Err(ParseError::UnexpectedToken(_))));
```

```rust
use minijson::parser::{self, ParseError};

let result = parser::parse(r#"{"a" 1}"#);
assert!(matches!(result, Err(ParseError::ExpectedColon(_))));
```

## See Also

- [`Value`]: The enum representing the parsed document.
- [`ParseError`]: The error type for failed parses.
*/

use log::{debug, warn};
use std::borrow::Cow;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::tokenizer::{JToken, tokenize};
use crate::value::Value;

/// Maximum number of nested objects/arrays accepted before giving up, so that
/// hostile input cannot exhaust the stack.
pub const MAX_NESTING_DEPTH: usize = 512;

/// Represents errors that can occur while parsing a JSON document.
///
/// Variants carrying a `String` hold a rendering of the offending token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A value was expected but the current token cannot start one, or the
    /// document root is not an object or an array.
    UnexpectedToken(String),
    /// An object member did not start with a string key.
    ExpectedKey(String),
    /// An object key was not followed by `:`.
    ExpectedColon(String),
    /// An object member was not followed by `,` or `}`.
    ExpectedCommaOrBrace(String),
    /// An array element was not followed by `,` or `]`.
    ExpectedCommaOrBracket(String),
    /// The input ended inside an array, before its closing bracket.
    UnterminatedArray,
    /// The input could not be read as a document at all.
    MalformedInput(String),
}

impl Error for ParseError {}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedToken(token) => {
                write!(f, "Unexpected token: {token}")
            }
            Self::ExpectedKey(token) => {
                write!(f, "Expected string key, found {token}")
            }
            Self::ExpectedColon(token) => {
                write!(f, "Expected ':' after key, found {token}")
            }
            Self::ExpectedCommaOrBrace(token) => {
                write!(f, "Expected ',' or '}}' after member, found {token}")
            }
            Self::ExpectedCommaOrBracket(token) => {
                write!(f, "Expected ',' or ']' after element, found {token}")
            }
            Self::UnterminatedArray => {
                write!(f, "Unexpected end of input inside array")
            }
            Self::MalformedInput(reason) => {
                write!(f, "Malformed input: {reason}")
            }
        }
    }
}

/// Parse an input buffer into a [`Value`] rooted at an object or an array.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first place where the input
/// departs from the grammar.
pub fn parse(input: impl AsRef<[u8]>) -> Result<Value, ParseError> {
    let tokens = tokenize(input.as_ref());
    let mut parser = Parser::new(tokens);
    parser.parse_document()
}

/// Cursor over a token sequence.
struct Parser<'a> {
    /// Token sequence; always ends with [`JToken::Eof`]
    tokens: Vec<JToken<'a>>,
    /// Index of the current token
    position: usize,
    /// Number of containers currently open
    depth: usize,
}

impl<'a> Parser<'a> {
    const fn new(tokens: Vec<JToken<'a>>) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
        }
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Result<JToken<'a>, ParseError> {
        // the cursor never moves past `Eof`, the fallback only guards the
        // index
        let token = self
            .tokens
            .get(self.position)
            .copied()
            .unwrap_or(JToken::Eof);

        match token {
            JToken::Illegal => Err(ParseError::MalformedInput(
                "unterminated string or out-of-range number".to_string(),
            )),
            token => Ok(token),
        }
    }

    /// Consumes the current token.
    const fn advance(&mut self) {
        self.position += 1;
    }

    /// Consumes the current token if it is `expected`, otherwise fails with
    /// `error` built from the token found instead.
    fn expect(
        &mut self,
        expected: JToken<'_>,
        error: fn(String) -> ParseError,
    ) -> Result<(), ParseError> {
        let token = self.peek()?;
        if token == expected {
            self.advance();
            Ok(())
        } else {
            Err(error(token.to_string()))
        }
    }

    /// Parses the document root, which must be the only thing in the input.
    fn parse_document(&mut self) -> Result<Value, ParseError> {
        let root = match self.peek()? {
            JToken::LCurly => Value::Object(self.parse_object()?),
            JToken::LSquare => Value::Array(self.parse_array()?),
            token => return Err(ParseError::UnexpectedToken(token.to_string())),
        };

        match self.peek()? {
            JToken::Eof => {
                debug!("parsed document with {} root", root.kind());
                Ok(root)
            }
            token => Err(ParseError::UnexpectedToken(token.to_string())),
        }
    }

    /// Parses a single value: a number, a string, an object or an array.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        match self.peek()? {
            JToken::JNumber(n) => {
                self.advance();
                Ok(Value::Number(n))
            }
            JToken::JString(raw) => {
                self.advance();
                Ok(Value::JString(raw.to_vec()))
            }
            JToken::LCurly => self.parse_object().map(Value::Object),
            JToken::LSquare => self.parse_array().map(Value::Array),
            token => Err(ParseError::UnexpectedToken(token.to_string())),
        }
    }

    /// Parses `{ "key": value, ... }`, starting at the opening brace.
    fn parse_object(&mut self) -> Result<HashMap<String, Value>, ParseError> {
        self.enter()?;
        self.expect(JToken::LCurly, ParseError::UnexpectedToken)?;

        let mut members = HashMap::new();

        if self.peek()? == JToken::RCurly {
            self.advance();
            self.leave();
            return Ok(members);
        }

        loop {
            let key = match self.peek()? {
                JToken::JString(raw) => decode_key(raw),
                token => return Err(ParseError::ExpectedKey(token.to_string())),
            };
            self.advance();

            self.expect(JToken::Colon, ParseError::ExpectedColon)?;

            let value = self.parse_value()?;
            if members.contains_key(&key) {
                debug!("duplicate key {key:?}, keeping the last value");
            }
            members.insert(key, value);

            match self.peek()? {
                JToken::Comma => self.advance(),
                JToken::RCurly => {
                    self.advance();
                    self.leave();
                    return Ok(members);
                }
                token => {
                    return Err(ParseError::ExpectedCommaOrBrace(
                        token.to_string(),
                    ));
                }
            }
        }
    }

    /// Parses `[ value, ... ]`, starting at the opening bracket.
    fn parse_array(&mut self) -> Result<Vec<Value>, ParseError> {
        self.enter()?;
        self.expect(JToken::LSquare, ParseError::UnexpectedToken)?;

        let mut elements = vec![];

        if self.peek()? == JToken::RSquare {
            self.advance();
            self.leave();
            return Ok(elements);
        }

        loop {
            elements.push(self.parse_value()?);

            match self.peek()? {
                JToken::Comma => self.advance(),
                JToken::RSquare => {
                    self.advance();
                    self.leave();
                    return Ok(elements);
                }
                JToken::Eof => return Err(ParseError::UnterminatedArray),
                token => {
                    return Err(ParseError::ExpectedCommaOrBracket(
                        token.to_string(),
                    ));
                }
            }
        }
    }

    /// Records that a container is being opened.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::MalformedInput(format!(
                "nesting deeper than {MAX_NESTING_DEPTH} levels"
            )));
        }
        self.depth += 1;
        Ok(())
    }

    /// Records that a container has been closed.
    const fn leave(&mut self) {
        self.depth -= 1;
    }
}

/// Converts the raw bytes of an object key into a map key. Bytes that are not
/// valid UTF-8 are replaced with U+FFFD.
fn decode_key(raw: &[u8]) -> String {
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(key) => key.to_owned(),
        Cow::Owned(key) => {
            warn!("object key {key:?} is not valid UTF-8, replaced lossily");
            key
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(members: &[(&str, Value)]) -> Value {
        Value::Object(
            members
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        )
    }

    fn string(s: &str) -> Value {
        Value::JString(s.as_bytes().to_vec())
    }

    #[test]
    fn parse_empty_object() {
        let result = parse("{}").unwrap();
        assert_eq!(result, Value::Object(HashMap::new()));
    }

    #[test]
    fn parse_empty_array() {
        let result = parse("[]").unwrap();
        assert_eq!(result, Value::Array(vec![]));
    }

    #[test]
    fn parse_single_member() {
        let result = parse(r#"{"a": 1}"#).unwrap();
        assert_eq!(result, object(&[("a", Value::Number(1))]));
    }

    #[test]
    fn parse_multiple_members() {
        let result = parse(r#"{"a": 1, "b": "two", "c": []}"#).unwrap();
        assert_eq!(
            result,
            object(&[
                ("a", Value::Number(1)),
                ("b", string("two")),
                ("c", Value::Array(vec![])),
            ])
        );
    }

    #[test]
    fn parse_nested() {
        let result = parse(r#"{"a":[1,2,{"b":"x"}]}"#).unwrap();
        let expected = object(&[(
            "a",
            Value::Array(vec![
                Value::Number(1),
                Value::Number(2),
                object(&[("b", string("x"))]),
            ]),
        )]);
        assert_eq!(result, expected);
    }

    #[test]
    fn parse_array_root() {
        let result = parse(r#"[1, "a", {}, [[]]]"#).unwrap();
        assert_eq!(
            result,
            Value::Array(vec![
                Value::Number(1),
                string("a"),
                Value::Object(HashMap::new()),
                Value::Array(vec![Value::Array(vec![])]),
            ])
        );
    }

    #[test]
    fn parse_duplicate_key_last_wins() {
        let result = parse(r#"{"k": 1, "other": 0, "k": "last"}"#).unwrap();
        assert_eq!(result.child_count(), Some(2));
        assert_eq!(result.get("k"), Some(&string("last")));
    }

    #[test]
    fn parse_raw_string_payload() {
        let result = parse(r#"["a\nb", "  spaced  ", ""]"#).unwrap();
        assert_eq!(
            result,
            Value::Array(vec![string(r"a\nb"), string("  spaced  "), string("")])
        );
    }

    #[test]
    fn parse_bytes_input() {
        let result = parse(b"[1]".as_slice()).unwrap();
        assert_eq!(result, Value::Array(vec![Value::Number(1)]));
    }

    #[test]
    fn parse_skips_unrecognized_bytes() {
        // '-' is not part of the grammar and is dropped by the tokenizer
        let result = parse("[-5]").unwrap();
        assert_eq!(result, Value::Array(vec![Value::Number(5)]));
    }

    #[test]
    fn parse_scalar_root() {
        let result = parse("42");
        assert!(matches!(result, Err(ParseError::UnexpectedToken(_))));

        let result = parse(r#""text""#);
        assert!(matches!(result, Err(ParseError::UnexpectedToken(_))));
    }

    #[test]
    fn parse_empty_input() {
        let result = parse("");
        assert_eq!(
            result,
            Err(ParseError::UnexpectedToken("end of input".to_string()))
        );
    }

    #[test]
    fn parse_trailing_tokens() {
        let result = parse("[] []");
        assert!(matches!(result, Err(ParseError::UnexpectedToken(_))));
    }

    #[test]
    fn parse_missing_closing_brace() {
        let result = parse(r#"{"a":1"#);
        assert_eq!(
            result,
            Err(ParseError::ExpectedCommaOrBrace("end of input".to_string()))
        );
    }

    #[test]
    fn parse_trailing_comma_in_array() {
        let result = parse("[1,2,]");
        assert_eq!(result, Err(ParseError::UnexpectedToken("']'".to_string())));
    }

    #[test]
    fn parse_trailing_comma_in_object() {
        let result = parse(r#"{"a":1,}"#);
        assert_eq!(result, Err(ParseError::ExpectedKey("'}'".to_string())));
    }

    #[test]
    fn parse_non_string_key() {
        let result = parse("{1: 2}");
        assert!(matches!(result, Err(ParseError::ExpectedKey(_))));
    }

    #[test]
    fn parse_missing_colon() {
        let result = parse(r#"{"a" 1}"#);
        assert_eq!(
            result,
            Err(ParseError::ExpectedColon("number 1".to_string()))
        );
    }

    #[test]
    fn parse_missing_comma_in_object() {
        let result = parse(r#"{"a": 1 "b": 2}"#);
        assert!(matches!(result, Err(ParseError::ExpectedCommaOrBrace(_))));
    }

    #[test]
    fn parse_missing_comma_in_array() {
        let result = parse("[1 2]");
        assert!(matches!(result, Err(ParseError::ExpectedCommaOrBracket(_))));

        let result = parse("[1}");
        assert!(matches!(result, Err(ParseError::ExpectedCommaOrBracket(_))));
    }

    #[test]
    fn parse_unterminated_array() {
        let result = parse("[1, 2");
        assert_eq!(result, Err(ParseError::UnterminatedArray));

        let result = parse(r#"{"a": [1"#);
        assert_eq!(result, Err(ParseError::UnterminatedArray));
    }

    #[test]
    fn parse_missing_value() {
        let result = parse(r#"{"a": }"#);
        assert!(matches!(result, Err(ParseError::UnexpectedToken(_))));

        let result = parse("[");
        assert!(matches!(result, Err(ParseError::UnexpectedToken(_))));
    }

    #[test]
    fn parse_unterminated_string() {
        let result = parse(r#"{"a": "open}"#);
        assert!(matches!(result, Err(ParseError::MalformedInput(_))));

        let result = parse(r#"{"key"#);
        assert!(matches!(result, Err(ParseError::MalformedInput(_))));
    }

    #[test]
    fn parse_number_overflow() {
        let result = parse("[99999999999999999999]");
        assert!(matches!(result, Err(ParseError::MalformedInput(_))));
    }

    #[test]
    fn parse_non_utf8_string_keeps_bytes() {
        let result = parse(b"[ \"caf\xe9\" ]".as_slice()).unwrap();
        assert_eq!(result, Value::Array(vec![Value::JString(b"caf\xe9".to_vec())]));

        let element = &result.as_array().unwrap()[0];
        assert_eq!(element.as_bytes(), Some(&b"caf\xe9"[..]));
        assert_eq!(element.as_str(), None);
    }

    #[test]
    fn parse_non_utf8_key_is_replaced() {
        let result = parse(b"{\"k\xff\": 1}".as_slice()).unwrap();
        assert_eq!(result.get("k\u{fffd}"), Some(&Value::Number(1)));
    }

    #[test]
    fn parse_nesting_limit() {
        let within = format!(
            "{}{}",
            "[".repeat(MAX_NESTING_DEPTH),
            "]".repeat(MAX_NESTING_DEPTH)
        );
        assert!(parse(within).is_ok());

        let beyond = format!(
            "{}{}",
            "[".repeat(MAX_NESTING_DEPTH + 1),
            "]".repeat(MAX_NESTING_DEPTH + 1)
        );
        assert!(matches!(parse(beyond), Err(ParseError::MalformedInput(_))));
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ParseError::ExpectedCommaOrBrace("end of input".to_string())
                .to_string(),
            "Expected ',' or '}' after member, found end of input"
        );
        assert_eq!(
            ParseError::UnterminatedArray.to_string(),
            "Unexpected end of input inside array"
        );
    }
}
