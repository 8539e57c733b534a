//! Codecs for scalar values.

use std::fmt;
use std::marker::PhantomData;

use json_tree::{BigDecimal, BigInt, Node, NumericValue};

use crate::codec::Codec;
use crate::error::DecodeError;

/// Codec for a scalar type with a direct node representation.
///
/// Numeric decodes are exact: a value that does not fit `T` is a
/// [`NumericOverflow`](json_tree::NodeError::NumericOverflow) error, except
/// for `f32`/`f64` which round to the nearest representable value.
pub struct PrimitiveCodec<T>(PhantomData<fn() -> T>);

impl<T> PrimitiveCodec<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for PrimitiveCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for PrimitiveCodec<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PrimitiveCodec<T> {}

impl<T> fmt::Debug for PrimitiveCodec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrimitiveCodec<{}>", std::any::type_name::<T>())
    }
}

macro_rules! primitive_codecs {
    ($($name:ident: $ty:ty => $accessor:ident),* $(,)?) => {
        $(
            pub const $name: PrimitiveCodec<$ty> = PrimitiveCodec::new();

            impl Codec<$ty> for PrimitiveCodec<$ty> {
                fn encode(&self, value: &$ty) -> Node {
                    Node::from(value.clone())
                }

                fn decode(&self, node: &Node) -> Result<$ty, DecodeError> {
                    node.$accessor().map_err(DecodeError::from)
                }
            }
        )*
    };
}

primitive_codecs! {
    I8: i8 => as_i8,
    I16: i16 => as_i16,
    I32: i32 => as_i32,
    I64: i64 => as_i64,
    I128: i128 => as_i128,
    U8: u8 => as_u8,
    U16: u16 => as_u16,
    U32: u32 => as_u32,
    U64: u64 => as_u64,
    U128: u128 => as_u128,
    F32: f32 => as_f32,
    F64: f64 => as_f64,
    BIG_INT: BigInt => as_big_int,
    BIG_DECIMAL: BigDecimal => as_big_decimal,
    BOOL: bool => as_bool,
}

/// Strings only; other scalars are a type error. See [`SHOW_STRING`].
pub const STRING: PrimitiveCodec<String> = PrimitiveCodec::new();

impl Codec<String> for PrimitiveCodec<String> {
    fn encode(&self, value: &String) -> Node {
        Node::string(value.as_str())
    }

    fn decode(&self, node: &Node) -> Result<String, DecodeError> {
        Ok(node.as_str()?.to_owned())
    }
}

/// The number exactly as written, radix included.
pub const NUMERIC: PrimitiveCodec<NumericValue> = PrimitiveCodec::new();

impl Codec<NumericValue> for PrimitiveCodec<NumericValue> {
    fn encode(&self, value: &NumericValue) -> Node {
        Node::Number(value.clone())
    }

    fn decode(&self, node: &Node) -> Result<NumericValue, DecodeError> {
        Ok(node.as_number()?.clone())
    }
}

/// Encodes strings; decodes any scalar to its textual form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowStringCodec;

pub const SHOW_STRING: ShowStringCodec = ShowStringCodec;

impl Codec<String> for ShowStringCodec {
    fn encode(&self, value: &String) -> Node {
        Node::string(value.as_str())
    }

    fn decode(&self, node: &Node) -> Result<String, DecodeError> {
        node.show().map_err(DecodeError::from)
    }
}

/// Encodes a one-character string; decodes that or a code point number.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharCodec;

pub const CHAR: CharCodec = CharCodec;

impl Codec<char> for CharCodec {
    fn encode(&self, value: &char) -> Node {
        Node::from(*value)
    }

    fn decode(&self, node: &Node) -> Result<char, DecodeError> {
        if node.is_number() {
            let code = node.as_u32()?;
            return char::from_u32(code).ok_or_else(|| {
                DecodeError::invalid(format!("{code:#X} is not a unicode scalar value"))
            });
        }
        let text = node.as_str()?;
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(DecodeError::invalid(format!(
                "expected a single character, found {} characters",
                text.chars().count()
            ))),
        }
    }
}

/// Passes nodes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeCodec;

pub const NODE: NodeCodec = NodeCodec;

impl Codec<Node> for NodeCodec {
    fn encode(&self, value: &Node) -> Node {
        value.clone()
    }

    fn decode(&self, node: &Node) -> Result<Node, DecodeError> {
        Ok(node.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DecodeErrorKind;
    use json_tree::{parse, NodeError, NodeType};
    use std::str::FromStr;

    #[test]
    fn integer_widths_are_exact() {
        let node = parse("300").unwrap();
        assert_eq!(I16.decode(&node).unwrap(), 300);
        assert!(matches!(
            U8.decode(&node).unwrap_err().kind,
            DecodeErrorKind::Node(NodeError::NumericOverflow(_))
        ));
        assert!(I32.decode(&parse("1.5").unwrap()).is_err());
        assert_eq!(I64.decode(&parse("0x7FFFFFFFFFFFFFFF").unwrap()).unwrap(), i64::MAX);
        assert_eq!(U128.encode(&u128::MAX).to_string(), u128::MAX.to_string());
    }

    #[test]
    fn floats_round() {
        assert_eq!(F64.decode(&parse("0.1").unwrap()).unwrap(), 0.1);
        assert_eq!(F32.decode(&parse("1e100").unwrap()).unwrap(), f32::INFINITY);
        assert_eq!(F64.encode(&f64::NAN), Node::NULL);
    }

    #[test]
    fn arbitrary_precision() {
        let text = "123456789012345678901234567890";
        let node = parse(text).unwrap();
        assert_eq!(BIG_INT.decode(&node).unwrap(), BigInt::from_str(text).unwrap());
        assert_eq!(BIG_INT.encode(&BigInt::from_str(text).unwrap()), node);
        let decimal = BIG_DECIMAL.decode(&parse("1.250").unwrap()).unwrap();
        assert_eq!(decimal, BigDecimal::from_str("1.25").unwrap());
    }

    #[test]
    fn strings_and_show_strings() {
        assert_eq!(STRING.decode(&Node::string("s")).unwrap(), "s");
        assert_eq!(
            STRING.decode(&Node::from(1)).unwrap_err().kind,
            DecodeErrorKind::Node(NodeError::IncorrectType {
                expected: vec![NodeType::String],
                actual: NodeType::Number,
            })
        );
        assert_eq!(SHOW_STRING.decode(&parse("0x1F").unwrap()).unwrap(), "0x1F");
        assert_eq!(SHOW_STRING.decode(&Node::TRUE).unwrap(), "true");
        assert!(SHOW_STRING.decode(&Node::empty_array()).is_err());
    }

    #[test]
    fn chars_from_strings_or_code_points() {
        assert_eq!(CHAR.decode(&Node::string("é")).unwrap(), 'é');
        assert_eq!(CHAR.decode(&Node::from(0x1F600)).unwrap(), '😀');
        assert!(CHAR.decode(&Node::string("ab")).is_err());
        assert!(CHAR.decode(&Node::EMPTY_STRING).is_err());
        assert!(CHAR.decode(&Node::from(0xD800)).is_err());
        assert_eq!(CHAR.encode(&'x'), Node::string("x"));
    }

    #[test]
    fn numeric_keeps_the_literal() {
        let value = NUMERIC.decode(&parse("0b101").unwrap()).unwrap();
        assert_eq!(value.literal(), "0b101");
        assert_eq!(NUMERIC.encode(&value).to_string(), "0b101");
        assert!(NUMERIC.decode(&Node::NULL).is_err());
    }

    #[test]
    fn node_is_identity() {
        let node = parse(r#"{"a":[1,null]}"#).unwrap();
        assert_eq!(NODE.decode(&node).unwrap(), node);
        assert_eq!(NODE.encode(&node), node);
    }
}
