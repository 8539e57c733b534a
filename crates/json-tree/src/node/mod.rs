//! The value tree.
//!
//! [`Node`] is a closed sum over the six JSON value kinds. Scalars are plain
//! immutable values; [`Array`] and [`Object`] are the only mutable
//! containers. Every child is owned by exactly one container slot. Children
//! are reference-counted internally and cloned on first write, so copies are
//! cheap and a change made through one tree is never visible through another.

pub mod array;
mod container;
mod convert;
mod index;
pub mod object;
mod require;

use num_bigint::BigInt;

pub use array::Array;
pub use container::Children;
pub use index::NodeIndex;
pub use object::Object;

use crate::error::NodeError;
use crate::node_type::NodeType;
use crate::number::{BigDecimal, NumericValue};

/// One JSON value.
///
/// Equality is structural: numbers compare by exact value and object entry
/// order is ignored. `Clone` behaves as a deep copy; see
/// [`shallow_copy`](Node::shallow_copy).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Number(NumericValue),
    String(String),
    Array(Array),
    Object(Object),
}

macro_rules! number_accessors {
    ($($name:ident => $ty:ty),* $(,)?) => {
        $(
            #[doc = concat!("The exact numeric value as `", stringify!($ty), "`.")]
            pub fn $name(&self) -> Result<$ty, NodeError> {
                Ok(self.as_number()?.$name()?)
            }
        )*
    };
}

impl Node {
    pub const NULL: Node = Node::Null;
    pub const TRUE: Node = Node::Bool(true);
    pub const FALSE: Node = Node::Bool(false);
    #[allow(clippy::declare_interior_mutable_const)]
    pub const ZERO: Node = Node::Number(NumericValue::ZERO);
    pub const EMPTY_STRING: Node = Node::String(String::new());

    pub fn bool(value: bool) -> Node {
        Node::Bool(value)
    }

    pub fn string(value: impl Into<String>) -> Node {
        Node::String(value.into())
    }

    pub fn number(value: impl Into<NumericValue>) -> Node {
        Node::Number(value.into())
    }

    pub fn empty_array() -> Node {
        Node::Array(Array::new())
    }

    pub fn empty_object() -> Node {
        Node::Object(Object::new())
    }

    pub fn array_from<I>(items: I) -> Node
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        Node::Array(items.into_iter().map(Into::into).collect())
    }

    pub fn object_from<K, V, I>(entries: I) -> Node
    where
        K: Into<String>,
        V: Into<Node>,
        I: IntoIterator<Item = (K, V)>,
    {
        Node::Object(entries.into_iter().map(|(k, v)| (k, v.into())).collect())
    }

    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Null => NodeType::Null,
            Node::Bool(_) => NodeType::Bool,
            Node::Number(_) => NodeType::Number,
            Node::String(_) => NodeType::String,
            Node::Array(_) => NodeType::Array,
            Node::Object(_) => NodeType::Object,
        }
    }

    pub fn is_type(&self, kind: NodeType) -> bool {
        self.node_type() == kind
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Node::Bool(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Node::Number(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Node::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Node::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Node::Object(_))
    }

    pub fn is_primitive(&self) -> bool {
        self.node_type().is_primitive()
    }

    pub fn is_container(&self) -> bool {
        self.node_type().is_container()
    }

    pub(crate) fn type_error(&self, expected: &[NodeType]) -> NodeError {
        NodeError::incorrect_type(expected, self.node_type())
    }

    pub fn as_bool(&self) -> Result<bool, NodeError> {
        match self {
            Node::Bool(value) => Ok(*value),
            other => Err(other.type_error(&[NodeType::Bool])),
        }
    }

    pub fn as_str(&self) -> Result<&str, NodeError> {
        match self {
            Node::String(value) => Ok(value),
            other => Err(other.type_error(&[NodeType::String])),
        }
    }

    pub fn as_number(&self) -> Result<&NumericValue, NodeError> {
        match self {
            Node::Number(value) => Ok(value),
            other => Err(other.type_error(&[NodeType::Number])),
        }
    }

    pub fn as_array(&self) -> Result<&Array, NodeError> {
        match self {
            Node::Array(array) => Ok(array),
            other => Err(other.type_error(&[NodeType::Array])),
        }
    }

    pub fn as_array_mut(&mut self) -> Result<&mut Array, NodeError> {
        match self {
            Node::Array(array) => Ok(array),
            other => Err(other.type_error(&[NodeType::Array])),
        }
    }

    pub fn as_object(&self) -> Result<&Object, NodeError> {
        match self {
            Node::Object(object) => Ok(object),
            other => Err(other.type_error(&[NodeType::Object])),
        }
    }

    pub fn as_object_mut(&mut self) -> Result<&mut Object, NodeError> {
        match self {
            Node::Object(object) => Ok(object),
            other => Err(other.type_error(&[NodeType::Object])),
        }
    }

    number_accessors! {
        as_i8 => i8,
        as_i16 => i16,
        as_i32 => i32,
        as_i64 => i64,
        as_i128 => i128,
        as_u8 => u8,
        as_u16 => u16,
        as_u32 => u32,
        as_u64 => u64,
        as_u128 => u128,
    }

    /// Nearest `f32`; fails only when the node is not a number.
    pub fn as_f32(&self) -> Result<f32, NodeError> {
        Ok(self.as_number()?.as_f32())
    }

    /// Nearest `f64`; fails only when the node is not a number.
    pub fn as_f64(&self) -> Result<f64, NodeError> {
        Ok(self.as_number()?.as_f64())
    }

    pub fn as_big_int(&self) -> Result<BigInt, NodeError> {
        Ok(self.as_number()?.as_big_int())
    }

    pub fn as_big_decimal(&self) -> Result<BigDecimal, NodeError> {
        Ok(self.as_number()?.as_big_decimal())
    }

    /// Textual form of a primitive: strings as-is, numbers as their literal,
    /// `true`/`false`/`null` as keywords.
    pub fn show(&self) -> Result<String, NodeError> {
        match self {
            Node::Null => Ok("null".to_string()),
            Node::Bool(value) => Ok(value.to_string()),
            Node::Number(value) => Ok(value.literal().to_string()),
            Node::String(value) => Ok(value.clone()),
            other => Err(other.type_error(&[
                NodeType::Null,
                NodeType::Bool,
                NodeType::Number,
                NodeType::String,
            ])),
        }
    }

    /// Copies the container wrapper; children are shared until written
    /// through either copy.
    pub fn shallow_copy(&self) -> Node {
        self.clone()
    }

    /// Copies the whole subtree into fresh allocations.
    pub fn deep_copy(&self) -> Node {
        match self {
            Node::Array(array) => Node::Array(array.deep_copy()),
            Node::Object(object) => Node::Object(object.deep_copy()),
            scalar => scalar.clone(),
        }
    }
}
