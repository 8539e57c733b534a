//! Array and object adapters over an element codec.

use std::collections::BTreeSet;
use std::marker::PhantomData;

use indexmap::IndexMap;
use json_tree::{Node, Object};

use crate::codec::Codec;
use crate::error::DecodeError;

fn decode_elements<C, T, B>(codec: &C, node: &Node) -> Result<B, DecodeError>
where
    C: Codec<T>,
    B: FromIterator<T>,
{
    node.as_array()?
        .iter()
        .enumerate()
        .map(|(index, item)| codec.decode(item).map_err(|e| e.at_index(index)))
        .collect()
}

/// See [`CodecExt::list_of`](crate::CodecExt::list_of).
#[derive(Debug, Clone, Copy)]
pub struct ListOf<C, T> {
    element: C,
    min: usize,
    max: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> ListOf<C, T> {
    pub(crate) fn new(element: C, min: usize, max: usize) -> Self {
        Self {
            element,
            min,
            max,
            _marker: PhantomData,
        }
    }
}

impl<C: Codec<T>, T> Codec<Vec<T>> for ListOf<C, T> {
    fn encode(&self, value: &Vec<T>) -> Node {
        Node::Array(value.iter().map(|item| self.element.encode(item)).collect())
    }

    fn decode(&self, node: &Node) -> Result<Vec<T>, DecodeError> {
        node.require_array()?.require_size(self.min, self.max)?;
        decode_elements(&self.element, node)
    }
}

/// See [`CodecExt::set_of`](crate::CodecExt::set_of).
#[derive(Debug, Clone, Copy)]
pub struct SetOf<C, T> {
    element: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> SetOf<C, T> {
    pub(crate) fn new(element: C) -> Self {
        Self {
            element,
            _marker: PhantomData,
        }
    }
}

impl<C: Codec<T>, T: Ord> Codec<BTreeSet<T>> for SetOf<C, T> {
    fn encode(&self, value: &BTreeSet<T>) -> Node {
        Node::Array(value.iter().map(|item| self.element.encode(item)).collect())
    }

    fn decode(&self, node: &Node) -> Result<BTreeSet<T>, DecodeError> {
        decode_elements(&self.element, node)
    }
}

/// See [`CodecExt::map_of`](crate::CodecExt::map_of).
#[derive(Debug, Clone, Copy)]
pub struct MapOf<C, T> {
    value: C,
    _marker: PhantomData<fn() -> T>,
}

impl<C, T> MapOf<C, T> {
    pub(crate) fn new(value: C) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }
}

impl<C: Codec<T>, T> Codec<IndexMap<String, T>> for MapOf<C, T> {
    fn encode(&self, value: &IndexMap<String, T>) -> Node {
        let object: Object = value
            .iter()
            .map(|(key, item)| (key.as_str(), self.value.encode(item)))
            .collect();
        Node::Object(object)
    }

    fn decode(&self, node: &Node) -> Result<IndexMap<String, T>, DecodeError> {
        let object = node.as_object()?;
        let mut out = IndexMap::with_capacity(object.len());
        for (key, item) in object {
            let decoded = self.value.decode(item).map_err(|e| e.at_key(key))?;
            out.insert(key.to_string(), decoded);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CodecExt, DecodeErrorKind, I32, STRING, U8};
    use json_tree::{parse, NodeError, NodeType};

    #[test]
    fn list_round_trip_keeps_order() {
        let codec = I32.list_of();
        let node = codec.encode(&vec![3, 1, 2]);
        assert_eq!(node.to_string(), "[3,1,2]");
        assert_eq!(codec.decode(&node).unwrap(), [3, 1, 2]);
    }

    #[test]
    fn first_failing_element_is_reported_with_its_index() {
        let err = U8.list_of().decode(&parse("[1, 2, 300, true]").unwrap()).unwrap_err();
        assert_eq!(err.pointer(), "/2");
        assert!(matches!(
            err.kind,
            DecodeErrorKind::Node(NodeError::NumericOverflow(_))
        ));
    }

    #[test]
    fn list_length_is_inclusive() {
        let codec = I32.list_of_len(1, 2);
        assert!(codec.decode(&parse("[]").unwrap()).is_err());
        assert!(codec.decode(&parse("[1]").unwrap()).is_ok());
        assert!(codec.decode(&parse("[1,2]").unwrap()).is_ok());
        let err = codec.decode(&parse("[1,2,3]").unwrap()).unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::Node(NodeError::IncorrectSize {
                min: 1,
                max: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn list_rejects_objects() {
        let err = I32.list_of().decode(&parse("{}").unwrap()).unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::Node(NodeError::IncorrectType {
                expected: vec![NodeType::Array],
                actual: NodeType::Object
            })
        );
    }

    #[test]
    fn sets_sort_and_collapse() {
        let codec = STRING.set_of();
        let set = codec.decode(&parse(r#"["b","a","b"]"#).unwrap()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(codec.encode(&set).to_string(), r#"["a","b"]"#);
    }

    #[test]
    fn maps_keep_key_order_and_locate_errors() {
        let codec = I32.map_of();
        let map = codec.decode(&parse(r#"{"z":1,"a":2}"#).unwrap()).unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["z", "a"]);
        assert_eq!(codec.encode(&map).to_string(), r#"{"z":1,"a":2}"#);

        let err = codec.decode(&parse(r#"{"ok":1,"bad":"x"}"#).unwrap()).unwrap_err();
        assert_eq!(err.pointer(), "/bad");
    }

    #[test]
    fn nested_paths_accumulate() {
        let codec = I32.list_of().map_of();
        let err = codec
            .decode(&parse(r#"{"rows":[1,[2]]}"#).unwrap())
            .unwrap_err();
        assert_eq!(err.pointer(), "/rows/1");
    }
}
