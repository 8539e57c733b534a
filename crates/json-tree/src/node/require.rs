//! Shape contracts.
//!
//! `require*` methods assert something about a node and hand the node back
//! unchanged, so checks chain:
//!
//! ```
//! use json_tree::Node;
//!
//! let doc: Node = r#"{"points": [1, 2]}"#.parse().unwrap();
//! let points = doc.require_object()?.require_has("points")?.get("points")?;
//! points.require_array()?.require_size(1, 3)?;
//! # Ok::<(), json_tree::NodeError>(())
//! ```

use super::Node;
use crate::error::NodeError;
use crate::node_type::NodeType;

impl Node {
    pub fn require(&self, kind: NodeType) -> Result<&Self, NodeError> {
        self.require_any(&[kind])
    }

    /// Succeeds when the node is any of `kinds`.
    pub fn require_any(&self, kinds: &[NodeType]) -> Result<&Self, NodeError> {
        if kinds.contains(&self.node_type()) {
            Ok(self)
        } else {
            Err(self.type_error(kinds))
        }
    }

    /// Succeeds when the node is not `kind`; the error lists every other kind.
    pub fn require_not(&self, kind: NodeType) -> Result<&Self, NodeError> {
        let allowed: Vec<NodeType> = NodeType::ALL.into_iter().filter(|k| *k != kind).collect();
        self.require_any(&allowed)
    }

    pub fn require_null(&self) -> Result<&Self, NodeError> {
        self.require(NodeType::Null)
    }

    pub fn require_bool(&self) -> Result<&Self, NodeError> {
        self.require(NodeType::Bool)
    }

    pub fn require_number(&self) -> Result<&Self, NodeError> {
        self.require(NodeType::Number)
    }

    pub fn require_string(&self) -> Result<&Self, NodeError> {
        self.require(NodeType::String)
    }

    pub fn require_array(&self) -> Result<&Self, NodeError> {
        self.require(NodeType::Array)
    }

    pub fn require_object(&self) -> Result<&Self, NodeError> {
        self.require(NodeType::Object)
    }

    pub fn require_primitive(&self) -> Result<&Self, NodeError> {
        self.require_any(&[
            NodeType::Null,
            NodeType::Bool,
            NodeType::Number,
            NodeType::String,
        ])
    }

    pub fn require_container(&self) -> Result<&Self, NodeError> {
        self.require_any(&[NodeType::Array, NodeType::Object])
    }

    /// The node is an object with `key`.
    pub fn require_has(&self, key: &str) -> Result<&Self, NodeError> {
        if self.has(key)? {
            Ok(self)
        } else {
            Err(NodeError::MissingKey(key.to_string()))
        }
    }

    /// The node is an object whose `key` holds a `kind` value.
    pub fn require_has_type(&self, key: &str, kind: NodeType) -> Result<&Self, NodeError> {
        self.require_has(key)?.get(key)?.require(kind)?;
        Ok(self)
    }

    /// The container's size lies in `min..=max`.
    pub fn require_size(&self, min: usize, max: usize) -> Result<&Self, NodeError> {
        let actual = self.size()?;
        if (min..=max).contains(&actual) {
            Ok(self)
        } else {
            Err(NodeError::IncorrectSize { min, max, actual })
        }
    }

    pub fn require_min_size(&self, min: usize) -> Result<&Self, NodeError> {
        self.require_size(min, usize::MAX)
    }

    pub fn require_max_size(&self, max: usize) -> Result<&Self, NodeError> {
        self.require_size(0, max)
    }
}
