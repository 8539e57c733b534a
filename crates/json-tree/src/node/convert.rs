use num_bigint::BigInt;

use super::{Array, Node, Object};
use crate::number::{BigDecimal, NumericValue};

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

macro_rules! from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::Number(NumericValue::from(value))
                }
            }
        )*
    };
}

from_number!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, BigInt, BigDecimal);

/// NaN and infinities have no JSON form and become `null`.
impl From<f64> for Node {
    fn from(value: f64) -> Self {
        NumericValue::from_f64(value).map_or(Node::Null, Node::Number)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        NumericValue::from_f32(value).map_or(Node::Null, Node::Number)
    }
}

impl From<NumericValue> for Node {
    fn from(value: NumericValue) -> Self {
        Node::Number(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<&String> for Node {
    fn from(value: &String) -> Self {
        Node::String(value.clone())
    }
}

impl From<char> for Node {
    fn from(value: char) -> Self {
        Node::String(value.to_string())
    }
}

impl From<Array> for Node {
    fn from(value: Array) -> Self {
        Node::Array(value)
    }
}

impl From<Object> for Node {
    fn from(value: Object) -> Self {
        Node::Object(value)
    }
}

impl<T: Into<Node>> From<Vec<T>> for Node {
    fn from(items: Vec<T>) -> Self {
        Node::array_from(items)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

impl From<serde_json::Value> for Node {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => n
                .to_string()
                .parse::<NumericValue>()
                .map_or(Node::Null, Node::Number),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::array_from(items),
            Value::Object(map) => Node::object_from(map),
        }
    }
}

/// Integral numbers that fit `i64`/`u64` stay integers; everything else goes
/// through `f64`, and non-finite results become `null`.
impl From<&Node> for serde_json::Value {
    fn from(node: &Node) -> Self {
        use serde_json::Value;
        match node {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => {
                if let Ok(i) = n.as_i64() {
                    Value::from(i)
                } else if let Ok(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    serde_json::Number::from_f64(n.as_f64()).map_or(Value::Null, Value::Number)
                }
            }
            Node::String(s) => Value::String(s.clone()),
            Node::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            Node::Object(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, value)| (key.to_string(), Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<Node> for serde_json::Value {
    fn from(node: Node) -> Self {
        serde_json::Value::from(&node)
    }
}
