//! Constrained string codecs.

use json_tree::Node;
use regex::Regex;

use crate::codec::Codec;
use crate::error::DecodeError;

/// Strings whose length in characters lies in `[min, max]`.
#[derive(Debug, Clone, Copy)]
pub struct StringLenCodec {
    min: usize,
    max: usize,
}

pub fn string_len(min: usize, max: usize) -> StringLenCodec {
    StringLenCodec { min, max }
}

impl Codec<String> for StringLenCodec {
    fn encode(&self, value: &String) -> Node {
        Node::string(value.as_str())
    }

    fn decode(&self, node: &Node) -> Result<String, DecodeError> {
        let text = node.as_str()?;
        let len = text.chars().count();
        if len < self.min || len > self.max {
            return Err(DecodeError::invalid(format!(
                "string length {len} out of range [{}, {}]",
                self.min, self.max
            )));
        }
        Ok(text.to_owned())
    }
}

/// Strings matched in full by a regular expression.
#[derive(Debug, Clone)]
pub struct StringMatchingCodec {
    pattern: String,
    regex: Regex,
}

/// Fails if `pattern` is not a valid regular expression.
pub fn string_matching(pattern: &str) -> Result<StringMatchingCodec, regex::Error> {
    let regex = Regex::new(&format!("^(?:{pattern})$"))?;
    Ok(StringMatchingCodec {
        pattern: pattern.to_string(),
        regex,
    })
}

impl Codec<String> for StringMatchingCodec {
    fn encode(&self, value: &String) -> Node {
        Node::string(value.as_str())
    }

    fn decode(&self, node: &Node) -> Result<String, DecodeError> {
        let text = node.as_str()?;
        if !self.regex.is_match(text) {
            return Err(DecodeError::invalid(format!(
                "string {text:?} does not match `{}`",
                self.pattern
            )));
        }
        Ok(text.to_owned())
    }
}
