//! Text to tree.
//!
//! The parser is a pushdown automaton driven by [`ParserState`]: open
//! containers live on an explicit stack rather than the call stack, so deep
//! documents are limited by [`ParseOptions::max_depth`] alone. A parse either
//! yields the whole tree or fails; no partial tree escapes.

use std::str::FromStr;

use tracing::{debug, trace};

use crate::error::{ParseError, SyntaxError};
use crate::lexer::{Lexer, Token};
use crate::node::{Array, Node, Object};
use crate::options::ParseOptions;

/// What the parser accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// A value: the document root, or an object value after `:`, or an
    /// array element after `,`.
    ExpectValue,
    /// Right after `{`.
    ExpectObjectKeyOrEnd,
    /// After `,` inside an object; `}` here would be a trailing comma, which
    /// only JSON5 allows.
    ExpectObjectKey,
    ExpectColon,
    ExpectObjectCommaOrEnd,
    /// Right after `[`.
    ExpectArrayValueOrEnd,
    ExpectArrayCommaOrEnd,
}

impl ParserState {
    /// Human description of the acceptable tokens, used in errors.
    pub fn expected(self) -> &'static str {
        match self {
            Self::ExpectValue => "a value",
            Self::ExpectObjectKeyOrEnd => "an object key or `}`",
            Self::ExpectObjectKey => "an object key",
            Self::ExpectColon => "`:`",
            Self::ExpectObjectCommaOrEnd => "`,` or `}`",
            Self::ExpectArrayValueOrEnd => "a value or `]`",
            Self::ExpectArrayCommaOrEnd => "`,` or `]`",
        }
    }
}

enum Frame {
    Array(Array),
    Object { object: Object, key: String },
}

pub struct Parser<'a> {
    text: &'a str,
    lexer: Lexer<'a>,
    options: ParseOptions,
}

impl<'a> Parser<'a> {
    pub fn new(text: &'a str, options: ParseOptions) -> Self {
        Self {
            text,
            lexer: Lexer::new(text, &options),
            options,
        }
    }

    /// Parses exactly one value followed by optional whitespace.
    pub fn parse(mut self) -> Result<Node, SyntaxError> {
        trace!(len = self.text.len(), "parsing document");
        let root = self.parse_value()?;

        let trailing = self.lexer.next_token()?;
        if trailing != Token::Eof {
            return Err(self.unexpected("end of input", &trailing).into());
        }
        trace!(kind = %root.node_type(), "parsed document");
        Ok(root)
    }

    fn parse_value(&mut self) -> Result<Node, SyntaxError> {
        let mut stack: Vec<Frame> = Vec::new();
        let mut state = ParserState::ExpectValue;

        loop {
            let token = self.lexer.next_token()?;

            if stack.is_empty()
                && self.options.require_container_root
                && !matches!(token, Token::LeftBrace | Token::LeftBracket)
            {
                return Err(self.unexpected("an object or array", &token).into());
            }

            let completed = match (state, token) {
                (
                    ParserState::ExpectValue | ParserState::ExpectArrayValueOrEnd,
                    open @ (Token::LeftBrace | Token::LeftBracket),
                ) => {
                    if stack.len() >= self.options.max_depth {
                        let expected = format!("at most {} nested containers", self.options.max_depth);
                        return Err(self.unexpected(&expected, &open).into());
                    }
                    if open == Token::LeftBrace {
                        stack.push(Frame::Object {
                            object: Object::new(),
                            key: String::new(),
                        });
                        state = ParserState::ExpectObjectKeyOrEnd;
                    } else {
                        stack.push(Frame::Array(Array::new()));
                        state = ParserState::ExpectArrayValueOrEnd;
                    }
                    None
                }
                (
                    ParserState::ExpectArrayValueOrEnd | ParserState::ExpectArrayCommaOrEnd,
                    Token::RightBracket,
                )
                | (
                    ParserState::ExpectObjectKeyOrEnd | ParserState::ExpectObjectCommaOrEnd,
                    Token::RightBrace,
                ) => stack.pop().map(|frame| match frame {
                    Frame::Array(array) => Node::Array(array),
                    Frame::Object { object, .. } => Node::Object(object),
                }),
                (ParserState::ExpectValue | ParserState::ExpectArrayValueOrEnd, token)
                    if is_scalar(&token) =>
                {
                    if is_non_finite(&token) {
                        let (line, column) = self.lexer.token_position();
                        debug!(line, column, "{token} has no exact value, storing null");
                    }
                    Some(scalar(token))
                }
                (ParserState::ExpectObjectKeyOrEnd | ParserState::ExpectObjectKey, token)
                    if is_key(&token, self.options.json5) =>
                {
                    if let Some(Frame::Object { key, .. }) = stack.last_mut() {
                        *key = key_name(token);
                    }
                    state = ParserState::ExpectColon;
                    None
                }
                (ParserState::ExpectColon, Token::Colon) => {
                    state = ParserState::ExpectValue;
                    None
                }
                (ParserState::ExpectObjectCommaOrEnd, Token::Comma) => {
                    state = if self.options.json5 {
                        ParserState::ExpectObjectKeyOrEnd
                    } else {
                        ParserState::ExpectObjectKey
                    };
                    None
                }
                (ParserState::ExpectArrayCommaOrEnd, Token::Comma) => {
                    state = if self.options.json5 {
                        ParserState::ExpectArrayValueOrEnd
                    } else {
                        ParserState::ExpectValue
                    };
                    None
                }
                (state, token) => return Err(self.unexpected(state.expected(), &token).into()),
            };

            let Some(value) = completed else {
                continue;
            };
            match stack.last_mut() {
                None => return Ok(value),
                Some(Frame::Array(array)) => {
                    array.push(value);
                    state = ParserState::ExpectArrayCommaOrEnd;
                }
                Some(Frame::Object { object, key }) => {
                    let key = std::mem::take(key);
                    if object.contains_key(&key) {
                        let (line, column) = self.lexer.token_position();
                        debug!(%key, line, column, "duplicate object key, keeping the last value");
                    }
                    object.insert(key, value);
                    state = ParserState::ExpectObjectCommaOrEnd;
                }
            }
        }
    }

    fn unexpected(&self, expected: &str, found: &Token) -> ParseError {
        let (line, column) = self.lexer.token_position();
        ParseError {
            line,
            column,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }
}

fn is_scalar(token: &Token) -> bool {
    matches!(
        token,
        Token::String(_) | Token::Number(_) | Token::True | Token::False | Token::Null
    ) || is_non_finite(token)
}

fn is_non_finite(token: &Token) -> bool {
    match token {
        Token::NonFinite(_) => true,
        Token::Identifier(name) => name == "Infinity" || name == "NaN",
        _ => false,
    }
}

/// JSON5 keys may also be identifiers, including the keyword spellings.
fn is_key(token: &Token, json5: bool) -> bool {
    match token {
        Token::String(_) | Token::Identifier(_) => true,
        Token::True | Token::False | Token::Null => json5,
        _ => false,
    }
}

fn key_name(token: Token) -> String {
    match token {
        Token::String(name) | Token::Identifier(name) => name,
        Token::True => "true".to_string(),
        Token::False => "false".to_string(),
        _ => "null".to_string(),
    }
}

fn scalar(token: Token) -> Node {
    match token {
        Token::String(s) => Node::String(s),
        Token::Number(n) => Node::Number(n),
        Token::True => Node::TRUE,
        Token::False => Node::FALSE,
        _ => Node::NULL,
    }
}

/// Parses `text` with [`ParseOptions::default`].
pub fn parse(text: &str) -> Result<Node, SyntaxError> {
    Parser::new(text, ParseOptions::default()).parse()
}

pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Node, SyntaxError> {
    Parser::new(text, options.clone()).parse()
}

impl FromStr for Node {
    type Err = SyntaxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexErrorKind;

    fn parse_error(text: &str) -> ParseError {
        match parse(text) {
            Err(SyntaxError::Parse(err)) => err,
            other => panic!("expected a parse error for {text:?}, got {other:?}"),
        }
    }

    #[test]
    fn parses_nested_document() {
        let node = parse(r#"{"a":1,"b":[1,2,3]}"#).unwrap();
        assert_eq!(node.keys().unwrap().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(node.get("b").unwrap().size().unwrap(), 3);
    }

    #[test]
    fn scalars_are_valid_roots() {
        assert_eq!(parse(" 12 ").unwrap(), Node::from(12));
        assert_eq!(parse("\"s\"").unwrap(), Node::string("s"));
        assert_eq!(parse("null").unwrap(), Node::NULL);
    }

    #[test]
    fn trailing_commas_are_rejected() {
        let err = parse_error("[1,]");
        assert_eq!(err.expected, "a value");
        assert_eq!(err.found, "`]`");
        let err = parse_error(r#"{"a":1,}"#);
        assert_eq!(err.expected, "an object key");
    }

    #[test]
    fn trailing_content_is_rejected() {
        let err = parse_error("{} []");
        assert_eq!(err.expected, "end of input");
        assert_eq!((err.line, err.column), (1, 4));
    }

    #[test]
    fn premature_end_reports_position() {
        let err = parse_error("[1,\n2");
        assert_eq!(err.found, "end of input");
        assert_eq!(err.expected, "`,` or `]`");
        assert_eq!((err.line, err.column), (2, 2));
    }

    #[test]
    fn lex_errors_abort_the_parse() {
        let err = parse("[\"abc").unwrap_err();
        assert!(matches!(
            err,
            SyntaxError::Lex(ref e) if e.kind == LexErrorKind::UnterminatedString
        ));
    }

    #[test]
    fn duplicate_key_keeps_first_position_and_last_value() {
        let node = parse(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        assert_eq!(node.keys().unwrap().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(node.get("a").unwrap().as_i32().unwrap(), 3);
    }

    #[test]
    fn depth_limit_applies() {
        let options = ParseOptions::default().max_depth(2);
        assert!(parse_with("[[1]]", &options).is_ok());
        assert!(parse_with("[[[1]]]", &options).is_err());
    }

    #[test]
    fn nesting_beyond_default_limit_when_raised() {
        let depth = 3_000;
        let text = format!("{}{}", "[".repeat(depth), "]".repeat(depth));
        let options = ParseOptions::default().max_depth(depth);
        assert!(parse_with(&text, &options).is_ok());
    }

    #[test]
    fn json5_allows_trailing_commas_and_bare_keys() {
        let options = ParseOptions::default().json5(true);
        let node = parse_with("{a: [1, 2,], null: Infinity, 'b': -NaN,}", &options).unwrap();
        assert_eq!(node.keys().unwrap().collect::<Vec<_>>(), ["a", "null", "b"]);
        assert_eq!(node.get("a").unwrap().size().unwrap(), 2);
        assert!(node.get("null").unwrap().is_null());
        assert!(node.get("b").unwrap().is_null());
    }

    #[test]
    fn json5_still_rejects_empty_elements() {
        let options = ParseOptions::default().json5(true);
        assert!(parse_with("[1,,2]", &options).is_err());
        assert!(parse_with("{,}", &options).is_err());
        let err = parse_with("[undefined]", &options).unwrap_err();
        assert!(matches!(err, SyntaxError::Parse(ref e) if e.found == "identifier `undefined`"));
    }

    #[test]
    fn container_root_can_be_required() {
        let options = ParseOptions::default().require_container_root(true);
        assert!(parse_with("[]", &options).is_ok());
        let err = parse_with("1", &options).unwrap_err();
        assert!(matches!(err, SyntaxError::Parse(ref e) if e.expected == "an object or array"));
    }
}
