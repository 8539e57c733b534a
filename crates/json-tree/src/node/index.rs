use super::Node;
use crate::error::NodeError;
use crate::node_type::NodeType;

/// A key into an object or a position in an array.
///
/// Implemented for string types (object keys) and integer types (array
/// positions). Negative positions count from the end: `-1` is the last
/// element. Positions outside `[-len, len - 1]` fail with
/// [`NodeError::IndexOutOfBounds`].
pub trait NodeIndex: private::Sealed {
    #[doc(hidden)]
    fn index_into<'n>(&self, node: &'n Node) -> Result<&'n Node, NodeError>;

    #[doc(hidden)]
    fn index_into_mut<'n>(&self, node: &'n mut Node) -> Result<&'n mut Node, NodeError>;

    #[doc(hidden)]
    fn set_in(&self, node: &mut Node, value: Node) -> Result<(), NodeError>;

    #[doc(hidden)]
    fn remove_from(&self, node: &mut Node) -> Result<Node, NodeError>;
}

mod private {
    pub trait Sealed {}
    impl Sealed for str {}
    impl Sealed for String {}
    impl Sealed for usize {}
    impl Sealed for isize {}
    impl Sealed for i32 {}
    impl Sealed for i64 {}
    impl<T: ?Sized + Sealed> Sealed for &T {}
}

impl NodeIndex for str {
    fn index_into<'n>(&self, node: &'n Node) -> Result<&'n Node, NodeError> {
        node.as_object()?
            .get(self)
            .ok_or_else(|| NodeError::MissingKey(self.to_string()))
    }

    fn index_into_mut<'n>(&self, node: &'n mut Node) -> Result<&'n mut Node, NodeError> {
        node.as_object_mut()?
            .get_mut(self)
            .ok_or_else(|| NodeError::MissingKey(self.to_string()))
    }

    fn set_in(&self, node: &mut Node, value: Node) -> Result<(), NodeError> {
        node.as_object_mut()?.insert(self, value);
        Ok(())
    }

    fn remove_from(&self, node: &mut Node) -> Result<Node, NodeError> {
        node.as_object_mut()?
            .remove(self)
            .ok_or_else(|| NodeError::MissingKey(self.to_string()))
    }
}

impl NodeIndex for String {
    fn index_into<'n>(&self, node: &'n Node) -> Result<&'n Node, NodeError> {
        self.as_str().index_into(node)
    }

    fn index_into_mut<'n>(&self, node: &'n mut Node) -> Result<&'n mut Node, NodeError> {
        self.as_str().index_into_mut(node)
    }

    fn set_in(&self, node: &mut Node, value: Node) -> Result<(), NodeError> {
        self.as_str().set_in(node, value)
    }

    fn remove_from(&self, node: &mut Node) -> Result<Node, NodeError> {
        self.as_str().remove_from(node)
    }
}

impl<T: ?Sized + NodeIndex> NodeIndex for &T {
    fn index_into<'n>(&self, node: &'n Node) -> Result<&'n Node, NodeError> {
        (**self).index_into(node)
    }

    fn index_into_mut<'n>(&self, node: &'n mut Node) -> Result<&'n mut Node, NodeError> {
        (**self).index_into_mut(node)
    }

    fn set_in(&self, node: &mut Node, value: Node) -> Result<(), NodeError> {
        (**self).set_in(node, value)
    }

    fn remove_from(&self, node: &mut Node) -> Result<Node, NodeError> {
        (**self).remove_from(node)
    }
}

/// Maps a possibly negative position onto `0..len`.
pub(crate) fn resolve_position(index: i64, len: usize) -> Result<usize, NodeError> {
    let out_of_bounds = || NodeError::IndexOutOfBounds { index, size: len };
    let len_i = i64::try_from(len).map_err(|_| out_of_bounds())?;
    let resolved = if index < 0 { index + len_i } else { index };
    if (0..len_i).contains(&resolved) {
        Ok(resolved as usize)
    } else {
        Err(out_of_bounds())
    }
}

/// Like [`resolve_position`] but also admits `len` itself, the position one
/// past the end used by inserts.
pub(crate) fn resolve_insert_position(index: i64, len: usize) -> Result<usize, NodeError> {
    if index == len as i64 {
        return Ok(len);
    }
    resolve_position(index, len)
}

fn array_type_error(node: &Node) -> NodeError {
    node.type_error(&[NodeType::Array])
}

fn position<T: TryInto<i64>>(index: T) -> i64 {
    index.try_into().unwrap_or(i64::MAX)
}

macro_rules! position_index {
    ($($ty:ty),*) => {
        $(
            impl NodeIndex for $ty {
                fn index_into<'n>(&self, node: &'n Node) -> Result<&'n Node, NodeError> {
                    let Node::Array(array) = node else {
                        return Err(array_type_error(node));
                    };
                    let at = resolve_position(position(*self), array.len())?;
                    array.get(at).ok_or(NodeError::IndexOutOfBounds {
                        index: position(*self),
                        size: array.len(),
                    })
                }

                fn index_into_mut<'n>(&self, node: &'n mut Node) -> Result<&'n mut Node, NodeError> {
                    let size = match node {
                        Node::Array(array) => array.len(),
                        other => return Err(array_type_error(other)),
                    };
                    let at = resolve_position(position(*self), size)?;
                    node.as_array_mut()?
                        .get_mut(at)
                        .ok_or(NodeError::IndexOutOfBounds { index: position(*self), size })
                }

                fn set_in(&self, node: &mut Node, value: Node) -> Result<(), NodeError> {
                    let array = node.as_array_mut()?;
                    let at = resolve_position(position(*self), array.len())?;
                    array.replace(at, value);
                    Ok(())
                }

                fn remove_from(&self, node: &mut Node) -> Result<Node, NodeError> {
                    let array = node.as_array_mut()?;
                    let size = array.len();
                    let at = resolve_position(position(*self), size)?;
                    array
                        .remove(at)
                        .ok_or(NodeError::IndexOutOfBounds { index: position(*self), size })
                }
            }
        )*
    };
}

position_index!(usize, isize, i32, i64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_positions_count_from_end() {
        assert_eq!(resolve_position(-1, 3), Ok(2));
        assert_eq!(resolve_position(-3, 3), Ok(0));
        assert!(resolve_position(-4, 3).is_err());
        assert!(resolve_position(3, 3).is_err());
        assert!(resolve_position(0, 0).is_err());
    }

    #[test]
    fn insert_position_admits_end() {
        assert_eq!(resolve_insert_position(3, 3), Ok(3));
        assert_eq!(resolve_insert_position(-1, 3), Ok(2));
        assert!(resolve_insert_position(4, 3).is_err());
    }

    #[test]
    fn huge_usize_does_not_wrap() {
        let node = Node::array_from([1]);
        assert!(node.get(usize::MAX).is_err());
    }
}
