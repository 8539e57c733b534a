//! Container operations on [`Node`].
//!
//! Each operation fails with [`NodeError::IncorrectType`] when the node is not
//! a container kind that supports it. Mutators return `&mut Self` so calls can
//! be chained with `?`.

use std::iter::FusedIterator;

use super::index::resolve_insert_position;
use super::{array, object, Node, NodeIndex};
use crate::error::NodeError;
use crate::node_type::NodeType;

const CONTAINERS: &[NodeType] = &[NodeType::Array, NodeType::Object];

impl Node {
    pub fn get<I: NodeIndex>(&self, index: I) -> Result<&Node, NodeError> {
        index.index_into(self)
    }

    pub fn get_mut<I: NodeIndex>(&mut self, index: I) -> Result<&mut Node, NodeError> {
        index.index_into_mut(self)
    }

    /// Upserts an object key or replaces an existing array element.
    pub fn set<I: NodeIndex>(
        &mut self,
        index: I,
        value: impl Into<Node>,
    ) -> Result<&mut Self, NodeError> {
        index.set_in(self, value.into())?;
        Ok(self)
    }

    /// Appends to an array.
    pub fn add(&mut self, value: impl Into<Node>) -> Result<&mut Self, NodeError> {
        self.as_array_mut()?.push(value.into());
        Ok(self)
    }

    /// Inserts into an array before `index`; `index == size` appends.
    pub fn insert(&mut self, index: i64, value: impl Into<Node>) -> Result<&mut Self, NodeError> {
        let array = self.as_array_mut()?;
        let at = resolve_insert_position(index, array.len())?;
        array.insert(at, value.into());
        Ok(self)
    }

    /// Removes and returns an object entry or array element.
    pub fn remove<I: NodeIndex>(&mut self, index: I) -> Result<Node, NodeError> {
        index.remove_from(self)
    }

    pub fn size(&self) -> Result<usize, NodeError> {
        match self {
            Node::Array(array) => Ok(array.len()),
            Node::Object(object) => Ok(object.len()),
            other => Err(other.type_error(CONTAINERS)),
        }
    }

    pub fn is_empty(&self) -> Result<bool, NodeError> {
        Ok(self.size()? == 0)
    }

    pub fn has(&self, key: &str) -> Result<bool, NodeError> {
        Ok(self.as_object()?.contains_key(key))
    }

    pub fn keys(&self) -> Result<object::Keys<'_>, NodeError> {
        Ok(self.as_object()?.keys())
    }

    /// Elements of an array or values of an object, in order.
    pub fn values(&self) -> Result<Children<'_>, NodeError> {
        match self {
            Node::Array(array) => Ok(Children::Array(array.iter())),
            Node::Object(object) => Ok(Children::Object(object.values())),
            other => Err(other.type_error(CONTAINERS)),
        }
    }

    pub fn entries(&self) -> Result<object::Iter<'_>, NodeError> {
        Ok(self.as_object()?.iter())
    }

    pub fn clear(&mut self) -> Result<&mut Self, NodeError> {
        match self {
            Node::Array(array) => array.clear(),
            Node::Object(object) => object.clear(),
            other => return Err(other.type_error(CONTAINERS)),
        }
        Ok(self)
    }

    /// Adds every element of the array `other` to the end of this array.
    pub fn append(&mut self, other: &Node) -> Result<&mut Self, NodeError> {
        let other = other.as_array()?;
        self.as_array_mut()?.extend_from(other);
        Ok(self)
    }

    /// Adds every element of the array `other` to the front of this array.
    pub fn prepend(&mut self, other: &Node) -> Result<&mut Self, NodeError> {
        let other = other.as_array()?;
        self.as_array_mut()?.prepend_from(other);
        Ok(self)
    }

    /// Sets every entry of the object `other` on this object.
    pub fn merge(&mut self, other: &Node) -> Result<&mut Self, NodeError> {
        let other = other.as_object()?;
        self.as_object_mut()?.merge_from(other);
        Ok(self)
    }

    /// New array with the elements in `from..to`. Negative bounds count from
    /// the end; `to` may equal the size.
    pub fn slice(&self, from: i64, to: i64) -> Result<Node, NodeError> {
        let array = self.as_array()?;
        let len = array.len();
        let from = resolve_insert_position(from, len)?;
        let to = resolve_insert_position(to, len)?;
        if to < from {
            return Err(NodeError::IndexOutOfBounds {
                index: to as i64,
                size: len,
            });
        }
        Ok(Node::Array(array.slice(from, to)))
    }

    /// Whether the array contains an element equal to `value`, or the object
    /// has a value equal to it.
    pub fn contains(&self, value: &Node) -> Result<bool, NodeError> {
        Ok(self.values()?.any(|child| child == value))
    }
}

/// Children of a container, produced by [`Node::values`].
#[derive(Debug, Clone)]
pub enum Children<'a> {
    Array(array::Iter<'a>),
    Object(object::Values<'a>),
}

impl<'a> Iterator for Children<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Children::Array(iter) => iter.next(),
            Children::Object(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Children::Array(iter) => iter.size_hint(),
            Children::Object(iter) => iter.size_hint(),
        }
    }
}

impl ExactSizeIterator for Children<'_> {}
impl FusedIterator for Children<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_on_object_keeps_first_position() {
        let mut node = Node::empty_object();
        node.set("a", 1).unwrap().set("b", 2).unwrap().set("a", 3).unwrap();
        assert_eq!(node.keys().unwrap().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(node.get("a").unwrap().as_i32().unwrap(), 3);
    }

    #[test]
    fn array_operations_use_negative_positions() {
        let mut node = Node::array_from([10, 20, 30]);
        assert_eq!(node.get(-1).unwrap().as_i32().unwrap(), 30);
        node.set(-3, 5).unwrap();
        node.insert(-1, 25).unwrap();
        assert_eq!(node.remove(0).unwrap(), Node::from(5));
        assert_eq!(node, Node::array_from([20, 25, 30]));
        assert!(matches!(
            node.get(-4),
            Err(NodeError::IndexOutOfBounds { index: -4, size: 3 })
        ));
    }

    #[test]
    fn container_operations_reject_scalars() {
        let mut node = Node::string("text");
        assert!(matches!(
            node.add(1),
            Err(NodeError::IncorrectType { actual: NodeType::String, .. })
        ));
        assert!(node.size().is_err());
        assert!(node.get(0).is_err());
        assert!(node.get("k").is_err());
    }

    #[test]
    fn missing_key_is_reported() {
        let node = Node::object_from([("a", 1)]);
        assert_eq!(node.get("b"), Err(NodeError::MissingKey("b".into())));
    }

    #[test]
    fn append_prepend_merge() {
        let mut list = Node::array_from([2]);
        list.append(&Node::array_from([3])).unwrap();
        list.prepend(&Node::array_from([1])).unwrap();
        assert_eq!(list, Node::array_from([1, 2, 3]));

        let mut object = Node::object_from([("a", 1), ("b", 2)]);
        object.merge(&Node::object_from([("b", 20), ("c", 30)])).unwrap();
        assert_eq!(object.keys().unwrap().collect::<Vec<_>>(), ["a", "b", "c"]);
        assert_eq!(object.get("b").unwrap().as_i32().unwrap(), 20);
    }

    #[test]
    fn slice_and_contains() {
        let node = Node::array_from([1, 2, 3, 4]);
        assert_eq!(node.slice(1, -1).unwrap(), Node::array_from([2, 3]));
        assert_eq!(node.slice(0, 4).unwrap(), node);
        assert!(node.slice(3, 1).is_err());
        assert!(node.contains(&Node::from(4)).unwrap());
        assert!(!node.contains(&Node::from(5)).unwrap());
    }

    #[test]
    fn clear_empties_both_container_kinds() {
        let mut list = Node::array_from([1]);
        let mut object = Node::object_from([("k", Node::NULL)]);
        assert!(list.clear().unwrap().is_empty().unwrap());
        assert!(object.clear().unwrap().is_empty().unwrap());
    }
}
