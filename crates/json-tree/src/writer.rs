//! Serialization of a tree back to text.
//!
//! Numbers are written as their original literal, so a radix literal stays a
//! radix literal and reparses to an equal node.

use std::fmt::{self, Write};

use crate::node::Node;
use crate::options::PrintOptions;

impl Node {
    pub fn to_string_with(&self, options: &PrintOptions) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write_node(&mut out, self, options.indent, 0);
        out
    }

    /// Indented with two spaces per level.
    pub fn to_pretty_string(&self) -> String {
        self.to_string_with(&PrintOptions::pretty())
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, None, 0)
    }
}

fn write_node<W: Write>(
    out: &mut W,
    node: &Node,
    indent: Option<usize>,
    depth: usize,
) -> fmt::Result {
    match node {
        Node::Null => out.write_str("null"),
        Node::Bool(b) => out.write_str(if *b { "true" } else { "false" }),
        Node::Number(n) => out.write_str(n.literal()),
        Node::String(s) => write_string(out, s),
        Node::Array(array) => {
            if array.is_empty() {
                return out.write_str("[]");
            }
            out.write_char('[')?;
            for (i, item) in array.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_break(out, indent, depth + 1)?;
                write_node(out, item, indent, depth + 1)?;
            }
            write_break(out, indent, depth)?;
            out.write_char(']')
        }
        Node::Object(object) => {
            if object.is_empty() {
                return out.write_str("{}");
            }
            out.write_char('{')?;
            for (i, (key, value)) in object.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_break(out, indent, depth + 1)?;
                write_string(out, key)?;
                out.write_str(if indent.is_some() { ": " } else { ":" })?;
                write_node(out, value, indent, depth + 1)?;
            }
            write_break(out, indent, depth)?;
            out.write_char('}')
        }
    }
}

fn write_break<W: Write>(out: &mut W, indent: Option<usize>, depth: usize) -> fmt::Result {
    let Some(width) = indent else {
        return Ok(());
    };
    out.write_char('\n')?;
    for _ in 0..width * depth {
        out.write_char(' ')?;
    }
    Ok(())
}

/// Writes `s` as a quoted string literal.
fn write_string<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{0008}' => out.write_str("\\b")?,
            '\u{000C}' => out.write_str("\\f")?,
            c if c < ' ' => write!(out, "\\u{:04x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}
