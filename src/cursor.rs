//! Bidirectional cursors over an `OrderedMap`.
//!
//! A cursor points at one entry and moves to the in-order successor or
//! predecessor by walking parent links, so each step costs O(log n) in the
//! worst case and O(1) amortized over a full traversal.
//!
//! A cursor created over an empty map is positioned nowhere: reads fail with
//! [`MapError::EmptyCollection`] and moves do nothing.

use std::borrow::Borrow;
use std::fmt;

use crate::error::MapError;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::map::OrderedMap;
use crate::node::Node;

/// A read-only cursor over the entries of a `OrderedMap`.
pub struct Cursor<'a, K, V, Ix = DefaultIx> {
    /// Reference to the map
    map_ref: &'a OrderedMap<K, V, Ix>,
    /// Current node, the sentinel when positioned nowhere
    current: NodeIndex<Ix>,
}

impl<'a, K, V, Ix> Cursor<'a, K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a OrderedMap<K, V, Ix>, current: NodeIndex<Ix>) -> Self {
        Cursor { map_ref, current }
    }

    /// The entry under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCollection`] when the cursor is positioned nowhere.
    #[inline]
    pub fn entry(&self) -> Result<(&'a K, &'a V), MapError> {
        if self.current.is_sentinel() {
            return Err(MapError::EmptyCollection);
        }
        Ok(self.map_ref.node_ref(self.current, Node::entry))
    }

    /// The key under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCollection`] when the cursor is positioned nowhere.
    #[inline]
    pub fn key(&self) -> Result<&'a K, MapError> {
        self.entry().map(|(key, _)| key)
    }

    /// The value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCollection`] when the cursor is positioned nowhere.
    #[inline]
    pub fn value(&self) -> Result<&'a V, MapError> {
        self.entry().map(|(_, value)| value)
    }

    /// Move to the next key. Stays put on the largest key.
    #[inline]
    pub fn move_next(&mut self) {
        let next = self.map_ref.successor(self.current);
        if !next.is_sentinel() {
            self.current = next;
        }
    }

    /// Move to the previous key. Stays put on the smallest key.
    #[inline]
    pub fn move_prev(&mut self) {
        let prev = self.map_ref.predecessor(self.current);
        if !prev.is_sentinel() {
            self.current = prev;
        }
    }

    /// `true` if a larger key exists.
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.map_ref.successor(self.current).is_sentinel()
    }

    /// `true` if a smaller key exists.
    #[inline]
    #[must_use]
    pub fn has_prev(&self) -> bool {
        !self.map_ref.predecessor(self.current).is_sentinel()
    }
}

impl<K, V, Ix> Clone for Cursor<'_, K, V, Ix>
where
    Ix: IndexType,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, Ix> Copy for Cursor<'_, K, V, Ix> where Ix: IndexType {}

impl<K, V, Ix> fmt::Debug for Cursor<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.entry().ok()).finish()
    }
}

/// A cursor that can also change the map.
///
/// Inserting or removing other keys through the cursor keeps it on the same
/// entry even when rebalancing rotates or relocates nodes.
pub struct CursorMut<'a, K, V, Ix = DefaultIx> {
    /// Mutable reference to the map
    map_ref: &'a mut OrderedMap<K, V, Ix>,
    /// Current node, the sentinel when positioned nowhere
    current: NodeIndex<Ix>,
}

impl<'a, K, V, Ix> CursorMut<'a, K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn new(map_ref: &'a mut OrderedMap<K, V, Ix>, current: NodeIndex<Ix>) -> Self {
        CursorMut { map_ref, current }
    }

    /// A read-only view at the same position.
    #[inline]
    #[must_use]
    pub fn as_cursor(&self) -> Cursor<'_, K, V, Ix> {
        Cursor::new(&*self.map_ref, self.current)
    }

    /// The key under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCollection`] when the cursor is positioned nowhere.
    #[inline]
    pub fn key(&self) -> Result<&K, MapError> {
        if self.current.is_sentinel() {
            return Err(MapError::EmptyCollection);
        }
        Ok(self.map_ref.node_ref(self.current, Node::key))
    }

    /// The value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCollection`] when the cursor is positioned nowhere.
    #[inline]
    pub fn value(&self) -> Result<&V, MapError> {
        if self.current.is_sentinel() {
            return Err(MapError::EmptyCollection);
        }
        Ok(self.map_ref.node_ref(self.current, Node::value))
    }

    /// Mutable access to the value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCollection`] when the cursor is positioned nowhere.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut V, MapError> {
        if self.current.is_sentinel() {
            return Err(MapError::EmptyCollection);
        }
        Ok(self.map_ref.node_mut(self.current, Node::value_mut))
    }

    /// Overwrite the value under the cursor, returning the old one.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCollection`] when the cursor is positioned nowhere.
    #[inline]
    pub fn set_value(&mut self, value: V) -> Result<V, MapError> {
        if self.current.is_sentinel() {
            return Err(MapError::EmptyCollection);
        }
        Ok(self.map_ref.node_mut(self.current, Node::set_value(value)))
    }

    /// Move to the next key. Stays put on the largest key.
    #[inline]
    pub fn move_next(&mut self) {
        let next = self.map_ref.successor(self.current);
        if !next.is_sentinel() {
            self.current = next;
        }
    }

    /// Move to the previous key. Stays put on the smallest key.
    #[inline]
    pub fn move_prev(&mut self) {
        let prev = self.map_ref.predecessor(self.current);
        if !prev.is_sentinel() {
            self.current = prev;
        }
    }

    /// `true` if a larger key exists.
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.map_ref.successor(self.current).is_sentinel()
    }

    /// `true` if a smaller key exists.
    #[inline]
    #[must_use]
    pub fn has_prev(&self) -> bool {
        !self.map_ref.predecessor(self.current).is_sentinel()
    }

    /// Remove the entry under the cursor.
    ///
    /// The cursor moves to the next key, or to the previous one when the
    /// removed key was the largest, or nowhere when the map becomes empty.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::EmptyCollection`] when the cursor is positioned nowhere.
    #[inline]
    pub fn remove_current(&mut self) -> Result<(K, V), MapError> {
        if self.current.is_sentinel() {
            return Err(MapError::EmptyCollection);
        }
        let (key, value) = self.remove_node(self.current);
        Ok((key, value))
    }

    /// Remove a node and re-resolve the cursor position.
    fn remove_node(&mut self, z: NodeIndex<Ix>) -> (K, V) {
        let target = if z == self.current {
            let next = self.map_ref.successor(z);
            if next.is_sentinel() {
                self.map_ref.predecessor(z)
            } else {
                next
            }
        } else {
            self.current
        };
        let (key, value, relocation) = self.map_ref.remove_inner(z);
        self.current = relocation.follow(target);
        (key, value)
    }
}

impl<'a, K, V, Ix> CursorMut<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Insert into the map without moving the cursor.
    ///
    /// A cursor positioned nowhere moves onto the inserted entry.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(10, "ten");
    /// let mut cursor = map.cursor_mut();
    /// for k in 0..10 {
    ///     cursor.insert(k, "small");
    /// }
    /// assert_eq!(cursor.key(), Ok(&10));
    /// assert!(cursor.has_prev());
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let (node_idx, old) = self.map_ref.insert_inner(key, value);
        if self.current.is_sentinel() {
            self.current = node_idx;
        }
        old
    }

    /// Remove a key from the map, returning its value.
    ///
    /// Removing the key under the cursor behaves like [`remove_current`](Self::remove_current).
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let z = self.map_ref.search(key)?;
        Some(self.remove_node(z).1)
    }
}

impl<K, V, Ix> fmt::Debug for CursorMut<'_, K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut")
            .field(&self.as_cursor().entry().ok())
            .finish()
    }
}
