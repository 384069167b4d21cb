/*!
# JSON Value

Defines the value tree produced by the parser. Every node exclusively owns its
children; a tree is built bottom-up and handed to the caller whole.
*/
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::parser::{ParseError, parse};

/// Primary JSON AST definition
#[derive(PartialEq, Eq, Debug, Clone, Default)]
pub enum Value {
    /// Placeholder for a value that has not been assigned yet. Never produced
    /// by a successful parse.
    #[default]
    None,
    /// Represents a JSON object with unique string keys
    Object(HashMap<String, Value>),
    /// Represents a JSON array containing values of any type
    Array(Vec<Value>),
    /// Represents a non-negative JSON integer
    Number(i64),
    /// Represents a JSON string value, byte-for-byte as written. The bytes
    /// need not be valid UTF-8.
    JString(Vec<u8>),
}

/// The tag of a [`Value`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Unassigned placeholder
    None,
    /// Key/value mapping
    Object,
    /// Ordered sequence
    Array,
    /// Integer
    Number,
    /// Quoted text
    String,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Object => "object",
            Self::Array => "array",
            Self::Number => "number",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

impl Value {
    /// Returns the tag of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::None => ValueKind::None,
            Self::Object(_) => ValueKind::Object,
            Self::Array(_) => ValueKind::Array,
            Self::Number(_) => ValueKind::Number,
            Self::JString(_) => ValueKind::String,
        }
    }

    /// Compute the depth of the JSON document.
    ///
    /// Scalars have depth 1 and an empty container has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(map) => {
                let inner_depth = map.values().map(Self::depth).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::Array(arr) => {
                let inner_depth = arr.iter().map(Self::depth).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::None | Self::Number(_) | Self::JString(_) => 1,
        }
    }

    /// Number of members of an object or elements of an array; `None` for
    /// anything else.
    #[must_use]
    pub fn child_count(&self) -> Option<usize> {
        match self {
            Self::Object(map) => Some(map.len()),
            Self::Array(arr) => Some(arr.len()),
            Self::None | Self::Number(_) | Self::JString(_) => None,
        }
    }

    /// Looks up `key` if this value is an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        self.as_object().and_then(|map| map.get(key))
    }

    #[must_use]
    pub const fn as_object(&self) -> Option<&HashMap<String, Self>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<i64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Raw bytes of a string value.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::JString(raw) => Some(raw),
            _ => None,
        }
    }

    /// Text of a string value; `None` if it is not a string or its bytes are
    /// not valid UTF-8.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.as_bytes().and_then(|raw| std::str::from_utf8(raw).ok())
    }
}

// Untagged: `None` becomes a unit, strings become text when they are valid
// UTF-8 and bytes otherwise.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_unit(),
            Self::Object(map) => map.serialize(serializer),
            Self::Array(arr) => arr.serialize(serializer),
            Self::Number(n) => serializer.serialize_i64(*n),
            Self::JString(raw) => match std::str::from_utf8(raw) {
                Ok(text) => serializer.serialize_str(text),
                Err(_) => serializer.serialize_bytes(raw),
            },
        }
    }
}

impl FromStr for Value {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}
