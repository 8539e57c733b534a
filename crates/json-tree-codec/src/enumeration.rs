//! Values from a fixed table, encoded by name.

use json_tree::Node;

use crate::codec::Codec;
use crate::error::DecodeError;

#[derive(Debug, Clone)]
pub struct EnumCodec<T> {
    variants: Vec<(String, T)>,
}

/// Builds a codec mapping each value to its name.
///
/// Decoding accepts exactly the listed names. A value missing from the
/// table encodes as `null`, which no enumeration decodes.
pub fn enumeration<T: Clone + PartialEq>(variants: &[(&str, T)]) -> EnumCodec<T> {
    EnumCodec {
        variants: variants
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect(),
    }
}

impl<T> EnumCodec<T> {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|(name, _)| name.as_str())
    }
}

impl<T: Clone + PartialEq> Codec<T> for EnumCodec<T> {
    fn encode(&self, value: &T) -> Node {
        self.variants
            .iter()
            .find(|(_, variant)| variant == value)
            .map_or(Node::NULL, |(name, _)| Node::string(name.as_str()))
    }

    fn decode(&self, node: &Node) -> Result<T, DecodeError> {
        let name = node.as_str()?;
        self.variants
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                let names: Vec<&str> = self.names().collect();
                DecodeError::invalid(format!(
                    "unknown variant `{name}`, expected one of {}",
                    names.join(", ")
                ))
            })
    }
}
