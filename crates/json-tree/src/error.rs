//! Error types for lexing, parsing, tree access and numeric conversion.

use std::fmt;

use thiserror::Error;

use crate::node_type::NodeType;

/// What went wrong while turning characters into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    IllegalCharacter(char),
    UnterminatedString,
    UnterminatedComment,
    InvalidEscape(char),
    InvalidUnicodeEscape,
    LoneSurrogate(u16),
    ControlCharacter(char),
    InvalidNumber(&'static str),
    InvalidKeyword(String),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IllegalCharacter(c) => write!(f, "illegal character {c:?}"),
            Self::UnterminatedString => f.write_str("unterminated string"),
            Self::UnterminatedComment => f.write_str("unterminated block comment"),
            Self::InvalidEscape(c) => write!(f, "invalid escape sequence `\\{c}`"),
            Self::InvalidUnicodeEscape => f.write_str("expected 4 hex digits after `\\u`"),
            Self::LoneSurrogate(unit) => write!(f, "unpaired surrogate `\\u{unit:04X}`"),
            Self::ControlCharacter(c) => {
                write!(f, "unescaped control character U+{:04X} in string", *c as u32)
            }
            Self::InvalidNumber(reason) => write!(f, "invalid number: {reason}"),
            Self::InvalidKeyword(word) => write!(f, "invalid keyword `{word}`"),
        }
    }
}

/// A lexical error with the position of the offending character.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}")]
pub struct LexError {
    pub line: usize,
    pub column: usize,
    pub kind: LexErrorKind,
}

impl LexError {
    pub fn new(kind: LexErrorKind, line: usize, column: usize) -> Self {
        Self { line, column, kind }
    }
}

/// A grammar error: the token at `line`/`column` is not what the parser
/// state allowed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found} at line {line}, column {column}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub expected: String,
    pub found: String,
}

/// Any failure produced while parsing text into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    pub fn line(&self) -> usize {
        match self {
            Self::Lex(e) => e.line,
            Self::Parse(e) => e.line,
        }
    }

    pub fn column(&self) -> usize {
        match self {
            Self::Lex(e) => e.column,
            Self::Parse(e) => e.column,
        }
    }
}

/// The exact value of a number does not fit the requested fixed-width type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("number `{literal}` does not fit in {target}")]
pub struct NumericOverflowError {
    pub literal: String,
    pub target: &'static str,
}

/// Failures of the node access and validation API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("expected {}, found {actual}", join_types(.expected))]
    IncorrectType {
        expected: Vec<NodeType>,
        actual: NodeType,
    },
    #[error("expected size in [{min}, {}], found {actual}", display_max(.max))]
    IncorrectSize {
        min: usize,
        max: usize,
        actual: usize,
    },
    #[error("index {index} out of bounds for size {size}")]
    IndexOutOfBounds { index: i64, size: usize },
    #[error("missing key `{0}`")]
    MissingKey(String),
    #[error(transparent)]
    NumericOverflow(#[from] NumericOverflowError),
}

impl NodeError {
    pub(crate) fn incorrect_type(expected: &[NodeType], actual: NodeType) -> Self {
        Self::IncorrectType {
            expected: expected.to_vec(),
            actual,
        }
    }
}

fn join_types(types: &[NodeType]) -> String {
    match types {
        [] => "nothing".to_string(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head: Vec<String> = init.iter().map(ToString::to_string).collect();
            format!("{} or {last}", head.join(", "))
        }
    }
}

fn display_max(max: &usize) -> String {
    if *max == usize::MAX {
        "inf".to_string()
    } else {
        max.to_string()
    }
}
