use std::fmt;
use std::iter::FusedIterator;

use crate::index::{IndexType, NodeIndex};
use crate::map::OrderedMap;
use crate::node::Node;

/// An iterator over the entries of a `OrderedMap`, sorted by key.
pub struct Iter<'a, K, V, Ix> {
    /// Reference to the map
    pub(crate) map_ref: &'a OrderedMap<K, V, Ix>,
    /// Next node from the front
    front: NodeIndex<Ix>,
    /// Next node from the back
    back: NodeIndex<Ix>,
    /// Entries not yet yielded from either end
    remaining: usize,
}

impl<'a, K, V, Ix> Iter<'a, K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a OrderedMap<K, V, Ix>) -> Self {
        Iter {
            map_ref,
            front: map_ref.tree_minimum(map_ref.root),
            back: map_ref.tree_maximum(map_ref.root),
            remaining: map_ref.len(),
        }
    }
}

impl<K, V, Ix> Clone for Iter<'_, K, V, Ix>
where
    Ix: IndexType,
{
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<K, V, Ix> fmt::Debug for Iter<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, Ix> Iterator for Iter<'a, K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front;
        self.front = self.map_ref.successor(x);
        self.remaining -= 1;
        Some(self.map_ref.node_ref(x, Node::entry))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, Ix> DoubleEndedIterator for Iter<'_, K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back;
        self.back = self.map_ref.predecessor(x);
        self.remaining -= 1;
        Some(self.map_ref.node_ref(x, Node::entry))
    }
}

impl<K, V, Ix> ExactSizeIterator for Iter<'_, K, V, Ix> where Ix: IndexType {}

impl<K, V, Ix> FusedIterator for Iter<'_, K, V, Ix> where Ix: IndexType {}

/// An iterator over the entries of a `OrderedMap` with mutable values, sorted by key.
///
/// Entries are ranked once up front so that each node is borrowed exactly once.
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    inner: std::vec::IntoIter<(&'a K, &'a mut V)>,
}

impl<'a, K, V> IterMut<'a, K, V> {
    pub(crate) fn new<Ix: IndexType>(map_ref: &'a mut OrderedMap<K, V, Ix>) -> Self {
        let mut rank = vec![0; map_ref.nodes.len()];
        let mut x = map_ref.tree_minimum(map_ref.root);
        let mut r = 0;
        while !x.is_sentinel() {
            rank[x.index()] = r;
            r += 1;
            x = map_ref.successor(x);
        }

        let mut slots: Vec<Option<(&'a K, &'a mut V)>> =
            std::iter::repeat_with(|| None).take(map_ref.len()).collect();
        for (idx, node) in map_ref.nodes.iter_mut().enumerate().skip(1) {
            slots[rank[idx]] = Some(node.entry_mut());
        }
        IterMut {
            inner: slots.into_iter().flatten().collect::<Vec<_>>().into_iter(),
        }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a `OrderedMap`.
pub struct Keys<'a, K, V, Ix> {
    pub(crate) inner: Iter<'a, K, V, Ix>,
}

impl<K, V, Ix> Clone for Keys<'_, K, V, Ix>
where
    Ix: IndexType,
{
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, Ix> fmt::Debug for Keys<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, Ix> Iterator for Keys<'a, K, V, Ix>
where
    Ix: IndexType,
{
    type Item = &'a K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Ix> DoubleEndedIterator for Keys<'_, K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

/// An iterator over the values of a `OrderedMap`, ordered by key.
pub struct Values<'a, K, V, Ix> {
    pub(crate) inner: Iter<'a, K, V, Ix>,
}

impl<K, V, Ix> Clone for Values<'_, K, V, Ix>
where
    Ix: IndexType,
{
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V, Ix> fmt::Debug for Values<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V, Ix> Iterator for Values<'a, K, V, Ix>
where
    Ix: IndexType,
{
    type Item = &'a V;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V, Ix> DoubleEndedIterator for Values<'_, K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

/// An into iterator over the entries of a `OrderedMap`, sorted by key.
pub struct IntoIter<K, V, Ix> {
    map: OrderedMap<K, V, Ix>,
    front: NodeIndex<Ix>,
    back: NodeIndex<Ix>,
    remaining: usize,
}

impl<K, V, Ix> IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map: OrderedMap<K, V, Ix>) -> Self {
        IntoIter {
            front: map.tree_minimum(map.root),
            back: map.tree_maximum(map.root),
            remaining: map.len(),
            map,
        }
    }
}

impl<K, V, Ix> fmt::Debug for IntoIter<K, V, Ix> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter")
            .field("remaining", &self.remaining)
            .finish_non_exhaustive()
    }
}

impl<K, V, Ix> Iterator for IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.front;
        // links stay intact when an entry is taken
        self.front = self.map.successor(x);
        self.remaining -= 1;
        Some(self.map.node_mut(x, Node::take_entry))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V, Ix> DoubleEndedIterator for IntoIter<K, V, Ix>
where
    Ix: IndexType,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let x = self.back;
        self.back = self.map.predecessor(x);
        self.remaining -= 1;
        Some(self.map.node_mut(x, Node::take_entry))
    }
}

impl<K, V, Ix> ExactSizeIterator for IntoIter<K, V, Ix> where Ix: IndexType {}
