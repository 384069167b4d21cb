/*!
# `minijson` Library

Parses a strict subset of JSON (objects, arrays, quoted strings without
escapes, non-negative integers) into an owned [`Value`] tree.
*/

pub mod commands;
pub mod parser;
pub mod tokenizer;
pub mod utils;
pub mod value;

// Re-exports
pub use parser::{ParseError, parse};
pub use value::{Value, ValueKind};
