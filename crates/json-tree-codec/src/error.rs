//! Decode failures and the location they occurred at.

use std::fmt;

use json_tree::NodeError;
use thiserror::Error;

/// One step from a parent node into a child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) if key.contains(['~', '/']) => {
                f.write_str(&key.replace('~', "~0").replace('/', "~1"))
            }
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// The node had the wrong type or a number did not fit.
    #[error(transparent)]
    Node(#[from] NodeError),
    /// Every required key absent from an object, in field order.
    #[error("missing {}", join_keys(.0))]
    MissingKeys(Vec<String>),
    /// A decoded value was rejected by a check.
    #[error("{0}")]
    Invalid(String),
    /// Each alternative failed; the failures are listed in the order tried.
    #[error("no alternative matched ({})", join_errors(.0))]
    NoAlternative(Vec<DecodeError>),
}

/// A decode failure with the path from the decoded root to the fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}{}", at_pointer(.path))]
pub struct DecodeError {
    pub path: Vec<PathSegment>,
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind) -> Self {
        Self {
            path: Vec::new(),
            kind,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(DecodeErrorKind::Invalid(message.into()))
    }

    pub fn missing_keys(keys: Vec<String>) -> Self {
        Self::new(DecodeErrorKind::MissingKeys(keys))
    }

    /// Prefixes an object key onto the path.
    pub fn at_key(mut self, key: impl Into<String>) -> Self {
        self.path.insert(0, PathSegment::Key(key.into()));
        self
    }

    /// Prefixes an array index onto the path.
    pub fn at_index(mut self, index: usize) -> Self {
        self.path.insert(0, PathSegment::Index(index));
        self
    }

    /// The path as a JSON Pointer, `""` for the root.
    pub fn pointer(&self) -> String {
        self.path.iter().map(|segment| format!("/{segment}")).collect()
    }
}

impl From<NodeError> for DecodeError {
    fn from(err: NodeError) -> Self {
        Self::new(DecodeErrorKind::Node(err))
    }
}

fn at_pointer(path: &[PathSegment]) -> String {
    if path.is_empty() {
        return String::new();
    }
    let pointer: String = path.iter().map(|segment| format!("/{segment}")).collect();
    format!(" at `{pointer}`")
}

fn join_keys(keys: &[String]) -> String {
    let quoted: Vec<String> = keys.iter().map(|key| format!("`{key}`")).collect();
    match quoted.len() {
        1 => format!("key {}", quoted[0]),
        _ => format!("keys {}", quoted.join(", ")),
    }
}

fn join_errors(errors: &[DecodeError]) -> String {
    let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();
    rendered.join("; ")
}
