//! JSON document trees with exact numbers.
//!
//! - [`Lexer`] / [`Parser`]: text to [`Node`], keeping every number literal
//!   verbatim (including `0x`, `0o` and `0b` integers) as a [`NumericValue`].
//! - [`Node`]: a mutable, insertion-ordered tree with typed accessors and
//!   `require*` shape contracts.
//! - [`NumericValue`]: evaluates a literal on demand into fixed-width,
//!   floating or arbitrary-precision views.
//! - [`ParseOptions::json5`] extends the lexer and parser to JSON5 input.
//!
//! ```
//! use json_tree::{parse, NodeType};
//!
//! let doc = parse(r#"{"id": 0xFF, "tags": ["a", "b"]}"#).unwrap();
//! assert_eq!(doc.get("id").unwrap().as_u8().unwrap(), 255);
//! doc.require_has_type("tags", NodeType::Array).unwrap();
//! ```

mod error;
mod lexer;
mod node_type;
mod options;
mod parser;
mod writer;

pub mod node;
pub mod number;

pub use error::{
    LexError, LexErrorKind, NodeError, NumericOverflowError, ParseError, SyntaxError,
};
pub use lexer::{Lexer, Token, MAX_EXPONENT};
pub use node::{Array, Node, NodeIndex, Object};
pub use node_type::NodeType;
pub use number::{BigDecimal, NumericValue, Radix};
pub use options::{ParseOptions, PrintOptions, DEFAULT_MAX_DEPTH, NON_EXECUTE_PREFIX};
pub use parser::{parse, parse_with, Parser, ParserState};

pub use num_bigint::BigInt;
