//! Tokenizer.
//!
//! Turns document text into [`Token`]s. Strings are unescaped here; numbers
//! are classified by radix and validated against the literal grammar but
//! never evaluated (see [`NumericValue`]).
//!
//! Positions are 1-based. Columns count Unicode scalar values; a `\r\n` pair
//! ends a single line.
//!
//! With [`ParseOptions::json5`] the lexer also reads the JSON5 extensions:
//! comments, single-quoted strings, extra escapes, unquoted identifiers,
//! hexadecimal and signed numbers, and `Infinity`/`NaN`. Number literals are
//! rewritten into the plain grammar (`+.5` becomes `0.5`, `5.` becomes `5`).

use std::fmt;

use tracing::debug;

use crate::error::{LexError, LexErrorKind};
use crate::number::{NumericValue, Radix};
use crate::options::{ParseOptions, NON_EXECUTE_PREFIX};

/// Largest exponent magnitude a decimal literal may carry. It bounds the
/// number of digits any exact view of a parsed literal has to materialize.
pub const MAX_EXPONENT: u64 = 100_000;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Colon,
    Comma,
    String(String),
    Number(NumericValue),
    True,
    False,
    Null,
    /// JSON5 only: an unquoted object key, or `Infinity`/`NaN` without a sign.
    Identifier(String),
    /// JSON5 only: a signed `Infinity` or `NaN`.
    NonFinite(f64),
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LeftBrace => f.write_str("`{`"),
            Self::RightBrace => f.write_str("`}`"),
            Self::LeftBracket => f.write_str("`[`"),
            Self::RightBracket => f.write_str("`]`"),
            Self::Colon => f.write_str("`:`"),
            Self::Comma => f.write_str("`,`"),
            Self::String(s) => write!(f, "string {s:?}"),
            Self::Number(n) => write!(f, "number `{n}`"),
            Self::True => f.write_str("`true`"),
            Self::False => f.write_str("`false`"),
            Self::Null => f.write_str("`null`"),
            Self::Identifier(name) => write!(f, "identifier `{name}`"),
            Self::NonFinite(v) if v.is_nan() => f.write_str("`NaN`"),
            Self::NonFinite(v) if *v < 0.0 => f.write_str("`-Infinity`"),
            Self::NonFinite(_) => f.write_str("`Infinity`"),
            Self::Eof => f.write_str("end of input"),
        }
    }
}

/// A cursor over document text.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    token_line: usize,
    token_column: usize,
    radix_literals: bool,
    reject_lone_surrogates: bool,
    json5: bool,
    finished: bool,
}

#[derive(Clone, Copy)]
struct Mark {
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str, options: &ParseOptions) -> Self {
        let mut lexer = Self {
            input,
            pos: 0,
            line: 1,
            column: 1,
            token_line: 1,
            token_column: 1,
            radix_literals: options.radix_literals,
            reject_lone_surrogates: options.reject_lone_surrogates,
            json5: options.json5,
            finished: false,
        };
        if options.allow_non_execute_prefix {
            lexer.skip_non_execute_prefix();
        }
        lexer
    }

    /// Line and column where the most recent token started.
    pub fn token_position(&self) -> (usize, usize) {
        (self.token_line, self.token_column)
    }

    /// Current line and column.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        match c {
            '\n' => self.new_line(),
            '\r' if self.peek() != Some('\n') => self.new_line(),
            _ => self.column += 1,
        }
        Some(c)
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    fn reset(&mut self, mark: Mark) {
        self.pos = mark.pos;
        self.line = mark.line;
        self.column = mark.column;
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.line, self.column)
    }

    fn skip_non_execute_prefix(&mut self) {
        if !self.input.starts_with(NON_EXECUTE_PREFIX) {
            return;
        }
        for _ in NON_EXECUTE_PREFIX.chars() {
            self.advance();
        }
        match self.peek() {
            Some('\r') => {
                self.advance();
                if self.peek() == Some('\n') {
                    self.advance();
                }
            }
            Some('\n') => {
                self.advance();
            }
            _ => {}
        }
    }

    fn skip_whitespace(&mut self) -> Result<(), LexError> {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\n' | '\r') => {
                    self.advance();
                }
                Some(c) if self.json5 && is_json5_whitespace(c) => {
                    self.advance();
                }
                Some('/') if self.json5 => self.skip_comment()?,
                _ => return Ok(()),
            }
        }
    }

    fn skip_comment(&mut self) -> Result<(), LexError> {
        let start = self.mark();
        self.advance();
        match self.peek() {
            Some('/') => {
                while let Some(c) = self.peek() {
                    if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
                        break;
                    }
                    self.advance();
                }
                Ok(())
            }
            Some('*') => {
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            return Ok(());
                        }
                        Some(_) => {}
                        None => {
                            return Err(LexError::new(
                                LexErrorKind::UnterminatedComment,
                                start.line,
                                start.column,
                            ))
                        }
                    }
                }
            }
            _ => Err(LexError::new(
                LexErrorKind::IllegalCharacter('/'),
                start.line,
                start.column,
            )),
        }
    }

    /// Reads the next token. After [`Token::Eof`] every further call returns
    /// `Eof` again.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace()?;
        self.token_line = self.line;
        self.token_column = self.column;

        let Some(c) = self.peek() else {
            return Ok(Token::Eof);
        };
        let punctuation = match c {
            '{' => Some(Token::LeftBrace),
            '}' => Some(Token::RightBrace),
            '[' => Some(Token::LeftBracket),
            ']' => Some(Token::RightBracket),
            ':' => Some(Token::Colon),
            ',' => Some(Token::Comma),
            _ => None,
        };
        if let Some(token) = punctuation {
            self.advance();
            return Ok(token);
        }
        match c {
            '"' => self.read_string('"').map(Token::String),
            '\'' if self.json5 => self.read_string('\'').map(Token::String),
            '-' | '0'..='9' => self.read_number_token(),
            '+' | '.' if self.json5 => self.read_number_token(),
            '\\' if self.json5 => self.read_identifier(),
            c if self.json5 && is_identifier_char(c, true) => self.read_identifier(),
            c if c.is_alphabetic() => self.read_keyword(),
            c => Err(self.error(LexErrorKind::IllegalCharacter(c))),
        }
    }

    fn read_keyword(&mut self) -> Result<Token, LexError> {
        let (line, column) = (self.line, self.column);
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.advance();
        }
        match &self.input[start..self.pos] {
            "true" => Ok(Token::True),
            "false" => Ok(Token::False),
            "null" => Ok(Token::Null),
            word => Err(LexError::new(
                LexErrorKind::InvalidKeyword(word.to_string()),
                line,
                column,
            )),
        }
    }

    /// Reads an unquoted JSON5 name. `\uXXXX` escapes may spell any of its
    /// characters.
    fn read_identifier(&mut self) -> Result<Token, LexError> {
        let mut name = String::new();
        while let Some(c) = self.peek() {
            let first = name.is_empty();
            let decoded = if c == '\\' {
                let escape = self.mark();
                self.advance();
                match self.advance() {
                    Some('u') => {}
                    Some(other) => {
                        return Err(LexError::new(
                            LexErrorKind::InvalidEscape(other),
                            escape.line,
                            escape.column,
                        ))
                    }
                    None => return Err(self.error(LexErrorKind::UnterminatedString)),
                }
                let unit = self.read_hex4(escape)?;
                char::from_u32(u32::from(unit))
                    .filter(|&ch| is_identifier_char(ch, first))
                    .ok_or_else(|| {
                        LexError::new(LexErrorKind::InvalidUnicodeEscape, escape.line, escape.column)
                    })?
            } else if is_identifier_char(c, first) {
                self.advance();
                c
            } else {
                break;
            };
            name.push(decoded);
        }
        Ok(match name.as_str() {
            "true" => Token::True,
            "false" => Token::False,
            "null" => Token::Null,
            _ => Token::Identifier(name),
        })
    }

    fn read_word(&mut self) -> &'a str {
        let input = self.input;
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            self.advance();
        }
        &input[start..self.pos]
    }

    fn read_string(&mut self, quote: char) -> Result<String, LexError> {
        let (line, column) = (self.line, self.column);
        self.advance();

        let mut out = String::new();
        loop {
            let Some(c) = self.peek() else {
                return Err(LexError::new(LexErrorKind::UnterminatedString, line, column));
            };
            match c {
                c if c == quote => {
                    self.advance();
                    return Ok(out);
                }
                '\\' => {
                    let escape = self.mark();
                    self.advance();
                    if let Some(decoded) = self.read_escape(escape)? {
                        out.push(decoded);
                    }
                }
                '\n' | '\r' => return Err(self.error(LexErrorKind::ControlCharacter(c))),
                c if c < ' ' && !self.json5 => {
                    return Err(self.error(LexErrorKind::ControlCharacter(c)))
                }
                c => {
                    self.advance();
                    out.push(c);
                }
            }
        }
    }

    /// Decodes the escape after a backslash; `start` marks the backslash.
    /// `None` is a JSON5 line continuation, which contributes nothing.
    fn read_escape(&mut self, start: Mark) -> Result<Option<char>, LexError> {
        let Some(c) = self.advance() else {
            return Err(self.error(LexErrorKind::UnterminatedString));
        };
        let decoded = match c {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => return self.read_unicode_escape(start).map(Some),
            '\'' if self.json5 => '\'',
            'v' if self.json5 => '\u{000B}',
            '0' if self.json5 && !matches!(self.peek(), Some('0'..='9')) => '\0',
            'x' if self.json5 => {
                return self
                    .read_hex_digits(2)
                    .and_then(char::from_u32)
                    .map(Some)
                    .ok_or_else(|| {
                        LexError::new(LexErrorKind::InvalidEscape('x'), start.line, start.column)
                    })
            }
            '\r' if self.json5 => {
                if self.peek() == Some('\n') {
                    self.advance();
                }
                return Ok(None);
            }
            '\n' | '\u{2028}' | '\u{2029}' if self.json5 => return Ok(None),
            other if self.json5 && !other.is_ascii_digit() => other,
            other => {
                return Err(LexError::new(
                    LexErrorKind::InvalidEscape(other),
                    start.line,
                    start.column,
                ))
            }
        };
        Ok(Some(decoded))
    }

    fn read_unicode_escape(&mut self, start: Mark) -> Result<char, LexError> {
        let unit = self.read_hex4(start)?;
        match unit {
            0xD800..=0xDBFF => {
                let before_low = self.mark();
                if let Some(low) = self.try_low_surrogate()? {
                    let scalar = 0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00);
                    return Ok(char::from_u32(scalar).unwrap_or(char::REPLACEMENT_CHARACTER));
                }
                self.reset(before_low);
                self.lone_surrogate(unit, start)
            }
            0xDC00..=0xDFFF => self.lone_surrogate(unit, start),
            _ => Ok(char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)),
        }
    }

    /// Consumes a `\uDC00`-`\uDFFF` escape if one follows.
    fn try_low_surrogate(&mut self) -> Result<Option<u16>, LexError> {
        let start = self.mark();
        if self.peek() != Some('\\') {
            return Ok(None);
        }
        self.advance();
        if self.peek() != Some('u') {
            return Ok(None);
        }
        self.advance();
        let unit = self.read_hex4(start)?;
        Ok((0xDC00..=0xDFFF).contains(&unit).then_some(unit))
    }

    fn read_hex4(&mut self, start: Mark) -> Result<u16, LexError> {
        self.read_hex_digits(4)
            .and_then(|unit| u16::try_from(unit).ok())
            .ok_or_else(|| {
                LexError::new(LexErrorKind::InvalidUnicodeEscape, start.line, start.column)
            })
    }

    fn read_hex_digits(&mut self, count: usize) -> Option<u32> {
        let mut value = 0;
        for _ in 0..count {
            let digit = self.peek()?.to_digit(16)?;
            self.advance();
            value = value * 16 + digit;
        }
        Some(value)
    }

    fn lone_surrogate(&self, unit: u16, start: Mark) -> Result<char, LexError> {
        if self.reject_lone_surrogates {
            return Err(LexError::new(
                LexErrorKind::LoneSurrogate(unit),
                start.line,
                start.column,
            ));
        }
        debug!(
            line = start.line,
            column = start.column,
            "replacing unpaired surrogate \\u{unit:04X} with U+FFFD"
        );
        Ok(char::REPLACEMENT_CHARACTER)
    }

    fn read_number_token(&mut self) -> Result<Token, LexError> {
        if self.json5 {
            let sign = self.mark();
            if let Some(c @ ('+' | '-')) = self.peek() {
                self.advance();
                if let Some('I' | 'N') = self.peek() {
                    return self.read_non_finite(c == '-', sign);
                }
                self.reset(sign);
            }
        }
        self.read_number().map(Token::Number)
    }

    fn read_non_finite(&mut self, negative: bool, start: Mark) -> Result<Token, LexError> {
        let value = match self.read_word() {
            "Infinity" => f64::INFINITY,
            "NaN" => f64::NAN,
            word => {
                return Err(LexError::new(
                    LexErrorKind::InvalidKeyword(word.to_string()),
                    start.line,
                    start.column,
                ))
            }
        };
        Ok(Token::NonFinite(if negative { -value } else { value }))
    }

    fn allows_prefix(&self, prefix: char) -> bool {
        match Radix::from_prefix(prefix) {
            Some(Radix::Hexadecimal) => self.radix_literals || self.json5,
            Some(_) => self.radix_literals,
            None => false,
        }
    }

    fn read_number(&mut self) -> Result<NumericValue, LexError> {
        let mut literal = String::new();
        match self.peek() {
            Some('-') => {
                self.advance();
                literal.push('-');
            }
            Some('+') if self.json5 => {
                self.advance();
            }
            _ => {}
        }
        let body = self.pos;
        let radix = match self.peek() {
            Some('0') => {
                self.advance();
                match self.peek() {
                    Some(p) if self.allows_prefix(p) => {
                        self.advance();
                        Radix::from_prefix(p).unwrap_or_default()
                    }
                    Some(d) if d.is_ascii_digit() => {
                        return Err(self.error(LexErrorKind::InvalidNumber(
                            "leading zeros are not allowed",
                        )))
                    }
                    _ => Radix::Decimal,
                }
            }
            Some('1'..='9') => Radix::Decimal,
            Some('.') if self.json5 => {
                literal.push('0');
                Radix::Decimal
            }
            _ => return Err(self.error(LexErrorKind::InvalidNumber("expected a digit"))),
        };

        let mut bare_point = None;
        if radix == Radix::Decimal {
            let has_integer_digits = self.pos > body || self.skip_digits() > 0;
            bare_point = self.read_fraction_and_exponent(has_integer_digits)?;
        } else {
            self.read_radix_digits(radix)?;
        }

        if let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '.' {
                return Err(self.error(LexErrorKind::InvalidNumber(
                    "unexpected character after number",
                )));
            }
        }
        let text = &self.input[body..self.pos];
        match bare_point {
            Some(at) => {
                literal.push_str(&text[..at - body]);
                literal.push_str(&text[at - body + 1..]);
            }
            None => literal.push_str(text),
        }
        Ok(NumericValue::from_literal(literal, radix))
    }

    fn skip_digits(&mut self) -> usize {
        let start = self.pos;
        while let Some('0'..='9') = self.peek() {
            self.advance();
        }
        self.pos - start
    }

    /// Returns the byte offset of a JSON5 decimal point with no digits after
    /// it, which the literal drops.
    fn read_fraction_and_exponent(
        &mut self,
        has_integer_digits: bool,
    ) -> Result<Option<usize>, LexError> {
        let mut bare_point = None;
        if self.peek() == Some('.') {
            let point = self.pos;
            self.advance();
            if self.skip_digits() == 0 {
                if !(self.json5 && has_integer_digits) {
                    return Err(self.error(LexErrorKind::InvalidNumber(
                        "expected a digit after the decimal point",
                    )));
                }
                bare_point = Some(point);
            }
        } else if !has_integer_digits {
            return Err(self.error(LexErrorKind::InvalidNumber("expected a digit")));
        }
        if let Some('e' | 'E') = self.peek() {
            self.advance();
            if let Some('+' | '-') = self.peek() {
                self.advance();
            }
            let digits_start = self.pos;
            if self.skip_digits() == 0 {
                return Err(self.error(LexErrorKind::InvalidNumber("expected exponent digits")));
            }
            let significant = self.input[digits_start..self.pos].trim_start_matches('0');
            let out_of_range = !significant.is_empty()
                && significant.parse::<u64>().map_or(true, |e| e > MAX_EXPONENT);
            if out_of_range {
                return Err(self.error(LexErrorKind::InvalidNumber("exponent out of range")));
            }
        }
        Ok(bare_point)
    }

    fn read_radix_digits(&mut self, radix: Radix) -> Result<(), LexError> {
        let mut count = 0;
        while let Some(c) = self.peek() {
            if radix.is_digit(c) {
                self.advance();
                count += 1;
            } else if c.is_ascii_alphanumeric() {
                return Err(self.error(LexErrorKind::InvalidNumber(
                    "digit out of range for radix",
                )));
            } else {
                break;
            }
        }
        if count == 0 {
            return Err(self.error(LexErrorKind::InvalidNumber(
                "missing digits after radix prefix",
            )));
        }
        Ok(())
    }

    /// Reads a whole input that must consist of exactly one number literal.
    pub(crate) fn read_number_literal(&mut self) -> Result<NumericValue, LexError> {
        let number = self.read_number()?;
        if self.pos != self.input.len() {
            return Err(self.error(LexErrorKind::InvalidNumber(
                "trailing characters after number",
            )));
        }
        Ok(number)
    }
}

/// JSON5 whitespace beyond the four JSON characters: VT, FF, NBSP, BOM, the
/// line and paragraph separators and the other space separators.
fn is_json5_whitespace(c: char) -> bool {
    matches!(c, '\u{000B}' | '\u{000C}' | '\u{FEFF}') || (c.is_whitespace() && !c.is_control())
}

fn is_identifier_char(c: char, first: bool) -> bool {
    c.is_alphabetic()
        || matches!(c, '$' | '_')
        || (!first && (c.is_alphanumeric() || matches!(c, '\u{200C}' | '\u{200D}')))
}

/// Yields tokens up to, but excluding, [`Token::Eof`]; stops after the first
/// error.
impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(Token::Eof) => {
                self.finished = true;
                None
            }
            Ok(token) => Some(Ok(token)),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
