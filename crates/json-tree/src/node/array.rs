use std::iter::FusedIterator;
use std::slice;
use std::sync::Arc;

use super::Node;

/// Ordered, mutable sequence of nodes.
///
/// Children sit behind [`Arc`] and are cloned on first write, so a shallow
/// copy shares them until either side mutates.
#[derive(Debug, Clone, Default)]
pub struct Array {
    items: Vec<Arc<Node>>,
}

impl Array {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index).map(Arc::as_ref)
    }

    /// Mutable access; a child shared with a copy is detached first.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.items.get_mut(index).map(Arc::make_mut)
    }

    pub fn push(&mut self, value: Node) {
        self.items.push(Arc::new(value));
    }

    /// Inserts at `index`, shifting later elements right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: Node) {
        self.items.insert(index, Arc::new(value));
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn replace(&mut self, index: usize, value: Node) -> Option<Node> {
        let slot = self.items.get_mut(index)?;
        let old = std::mem::replace(slot, Arc::new(value));
        Some(Arc::unwrap_or_clone(old))
    }

    pub fn remove(&mut self, index: usize) -> Option<Node> {
        if index >= self.items.len() {
            return None;
        }
        Some(Arc::unwrap_or_clone(self.items.remove(index)))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.items.iter())
    }

    /// Appends the elements of `other`, sharing them copy-on-write.
    pub fn extend_from(&mut self, other: &Array) {
        self.items.extend(other.items.iter().cloned());
    }

    /// Inserts the elements of `other` at the front, in order.
    pub fn prepend_from(&mut self, other: &Array) {
        self.items.splice(0..0, other.items.iter().cloned());
    }

    /// Elements in `from..to`, sharing them copy-on-write.
    pub(crate) fn slice(&self, from: usize, to: usize) -> Array {
        Self {
            items: self.items[from..to].to_vec(),
        }
    }

    pub(crate) fn deep_copy(&self) -> Array {
        self.iter().map(Node::deep_copy).collect()
    }
}

impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.items.len() == other.items.len()
            && self
                .items
                .iter()
                .zip(&other.items)
                .all(|(a, b)| Arc::ptr_eq(a, b) || a == b)
    }
}

impl Eq for Array {}

impl FromIterator<Node> for Array {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Arc::new).collect(),
        }
    }
}

impl From<Vec<Node>> for Array {
    fn from(nodes: Vec<Node>) -> Self {
        nodes.into_iter().collect()
    }
}

impl Extend<Node> for Array {
    fn extend<I: IntoIterator<Item = Node>>(&mut self, iter: I) {
        self.items.extend(iter.into_iter().map(Arc::new));
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Node;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over array elements.
#[derive(Debug, Clone)]
pub struct Iter<'a>(slice::Iter<'a, Arc<Node>>);

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Arc::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(Arc::as_ref)
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}
