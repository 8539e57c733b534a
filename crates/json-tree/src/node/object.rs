use std::iter::FusedIterator;
use std::sync::Arc;

use indexmap::map;
use indexmap::IndexMap;

use super::Node;

/// Insertion-ordered map from key to node.
///
/// Re-inserting an existing key replaces its value in place; removing a key
/// and adding it again moves it to the end.
#[derive(Debug, Clone, Default)]
pub struct Object {
    entries: IndexMap<String, Arc<Node>>,
}

impl Object {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.entries.get(key).map(Arc::as_ref)
    }

    /// Mutable access; a child shared with a copy is detached first.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.entries.get_mut(key).map(Arc::make_mut)
    }

    /// Sets `key`, returning the previous value. An existing key keeps its
    /// position.
    pub fn insert(&mut self, key: impl Into<String>, value: Node) -> Option<Node> {
        self.entries
            .insert(key.into(), Arc::new(value))
            .map(Arc::unwrap_or_clone)
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.entries.shift_remove(key).map(Arc::unwrap_or_clone)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn keys(&self) -> Keys<'_> {
        Keys(self.entries.keys())
    }

    pub fn values(&self) -> Values<'_> {
        Values(self.entries.values())
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }

    /// Copies every entry of `other` into `self`, sharing values
    /// copy-on-write. Existing keys are overwritten in place.
    pub fn merge_from(&mut self, other: &Object) {
        for (key, value) in &other.entries {
            self.entries.insert(key.clone(), Arc::clone(value));
        }
    }

    pub(crate) fn deep_copy(&self) -> Object {
        self.iter()
            .map(|(key, value)| (key.to_string(), value.deep_copy()))
            .collect()
    }
}

/// Same set of keys with equal values; entry order does not matter.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().all(|(key, a)| {
                other
                    .entries
                    .get(key)
                    .is_some_and(|b| Arc::ptr_eq(a, b) || a == b)
            })
    }
}

impl Eq for Object {}

impl<K: Into<String>> FromIterator<(K, Node)> for Object {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        let mut object = Object::new();
        object.extend(iter);
        object
    }
}

impl<K: Into<String>> Extend<(K, Node)> for Object {
    fn extend<I: IntoIterator<Item = (K, Node)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a str, &'a Node);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Entries in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a>(map::Iter<'a, String, Arc<Node>>);

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v.as_ref()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}
impl FusedIterator for Iter<'_> {}

/// Keys in insertion order.
#[derive(Debug, Clone)]
pub struct Keys<'a>(map::Keys<'a, String, Arc<Node>>);

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Keys<'_> {}
impl FusedIterator for Keys<'_> {}

/// Values in insertion order.
#[derive(Debug, Clone)]
pub struct Values<'a>(map::Values<'a, String, Arc<Node>>);

impl<'a> Iterator for Values<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(Arc::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Values<'_> {}
impl FusedIterator for Values<'_> {}
