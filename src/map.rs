use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;
use std::ops::{Index, IndexMut};

use tracing::{debug, trace};

use crate::cursor::{Cursor, CursorMut};
use crate::entry::{Entry, OccupiedEntry, VacantEntry};
use crate::error::MapError;
use crate::index::{DefaultIx, IndexType, NodeIndex};
use crate::iter::{IntoIter, Iter, IterMut, Keys, Values};
use crate::node::{Color, Node};

/// An ordered key-value map backed by a red-black tree.
///
/// Nodes are stored in a vector and linked by [`NodeIndex`] handles. Slot 0
/// holds a black sentinel that stands in for every absent child, so the
/// rebalancing code reads the color of a missing leaf like any other node.
///
/// The map is not internally synchronized. Share it across threads behind
/// a lock.
pub struct OrderedMap<K, V, Ix = DefaultIx> {
    /// Vector that stores nodes
    pub(crate) nodes: Vec<Node<K, V, Ix>>,
    /// Root of the red-black tree
    pub(crate) root: NodeIndex<Ix>,
    /// Number of elements in the map
    pub(crate) len: usize,
}

/// Where entries ended up after a removal.
///
/// Removing a node with two children moves its successor's entry into the
/// removed node, then releasing the spliced slot moves the last node of the
/// arena into the hole. Positions held across a removal follow both moves.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Relocation<Ix> {
    entry: Option<(NodeIndex<Ix>, NodeIndex<Ix>)>,
    slot: Option<(NodeIndex<Ix>, NodeIndex<Ix>)>,
}

impl<Ix: IndexType> Relocation<Ix> {
    /// Maps a pre-removal position to the node now holding the same entry.
    pub(crate) fn follow(&self, mut idx: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if let Some((from, to)) = self.entry {
            if idx == from {
                idx = to;
            }
        }
        if let Some((from, to)) = self.slot {
            if idx == from {
                idx = to;
            }
        }
        idx
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Creates a new `OrderedMap` with estimated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(1));
        nodes.push(Node::new_sentinel());
        OrderedMap {
            nodes,
            root: NodeIndex::sentinel(),
            len: 0,
        }
    }

    /// Insert a key-value pair into the map.
    /// If the key exists, overwrite the value in place and return the previous one.
    ///
    /// # Panics
    ///
    /// This method panics when the tree is at the maximum number of nodes for its index
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert_eq!(map.insert(1, "a"), None);
    /// assert_eq!(map.insert(1, "b"), Some("a"));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.insert_inner(key, value).1
    }

    /// Remove a key from the map, returning its value if the key was present.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    /// assert_eq!(map.remove(&3), None);
    /// assert_eq!(map.remove(&2), Some("b"));
    /// assert_eq!(map.len(), 1);
    /// ```
    #[inline]
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Remove a key from the map, returning the stored key and value.
    #[inline]
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_idx = self.search(key)?;
        let (key, value, _) = self.remove_inner(node_idx);
        Some((key, value))
    }

    /// Remove and return the entry with the smallest key.
    #[inline]
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        let min = self.tree_minimum(self.root);
        (!min.is_sentinel()).then(|| {
            let (key, value, _) = self.remove_inner(min);
            (key, value)
        })
    }

    /// Remove and return the entry with the largest key.
    #[inline]
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        let max = self.tree_maximum(self.root);
        (!max.is_sentinel()).then(|| {
            let (key, value, _) = self.remove_inner(max);
            (key, value)
        })
    }

    /// Check if the map contains the given key.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert("health", 10);
    /// assert!(map.contains_key("health"));
    /// assert!(!map.contains_key("armor"));
    /// ```
    #[inline]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Return reference to the value corresponding to the key.
    #[inline]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(|idx| self.node_ref(idx, Node::value))
    }

    /// Return a mutable reference to the value corresponding to the key.
    #[inline]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key)
            .map(|idx| self.node_mut(idx, Node::value_mut))
    }

    /// Return the stored key and its value.
    #[inline]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(|idx| self.node_ref(idx, Node::entry))
    }

    /// Like [`get`](Self::get), but reports a missing key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] when the key is absent.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{MapError, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(5, 'x');
    /// assert_eq!(map.try_get(&5), Ok(&'x'));
    /// assert_eq!(map.try_get(&6), Err(MapError::KeyNotFound));
    /// ```
    #[inline]
    pub fn try_get<Q>(&self, key: &Q) -> Result<&V, MapError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(MapError::KeyNotFound)
    }

    /// Like [`get_mut`](Self::get_mut), but reports a missing key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] when the key is absent.
    #[inline]
    pub fn try_get_mut<Q>(&mut self, key: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(MapError::KeyNotFound)
    }

    /// Get the given key's corresponding entry in the map for in-place manipulation.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    ///
    /// assert!(matches!(map.entry(1), Entry::Vacant(_)));
    /// map.entry(1).or_insert(0);
    /// assert!(matches!(map.entry(1), Entry::Occupied(_)));
    /// map.entry(1).and_modify(|v| *v += 1);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    #[inline]
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V, Ix> {
        match self.search(&key) {
            Some(node_idx) => Entry::Occupied(OccupiedEntry {
                map_ref: self,
                node_idx,
            }),
            None => Entry::Vacant(VacantEntry { map_ref: self, key }),
        }
    }

    /// Get a cursor positioned on the entry with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] when the key is absent.
    #[inline]
    pub fn cursor_at<Q>(&self, key: &Q) -> Result<Cursor<'_, K, V, Ix>, MapError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_idx = self.search(key).ok_or(MapError::KeyNotFound)?;
        Ok(Cursor::new(self, node_idx))
    }

    /// Get a mutable cursor positioned on the entry with the given key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::KeyNotFound`] when the key is absent.
    #[inline]
    pub fn cursor_mut_at<Q>(&mut self, key: &Q) -> Result<CursorMut<'_, K, V, Ix>, MapError>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let node_idx = self.search(key).ok_or(MapError::KeyNotFound)?;
        Ok(CursorMut::new(self, node_idx))
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    /// Return the number of elements in the map.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Return `true` if the map contains no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all elements from the map
    #[inline]
    pub fn clear(&mut self) {
        debug!(len = self.len, "clearing ordered map");
        self.nodes.truncate(1);
        self.nodes[0] = Node::new_sentinel();
        self.root = NodeIndex::sentinel();
        self.len = 0;
    }

    /// Return the entry with the smallest key.
    #[inline]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let min = self.tree_minimum(self.root);
        (!min.is_sentinel()).then(|| self.node_ref(min, Node::entry))
    }

    /// Return the entry with the largest key.
    #[inline]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let max = self.tree_maximum(self.root);
        (!max.is_sentinel()).then(|| self.node_ref(max, Node::entry))
    }

    /// Get an iterator over the entries of the map, sorted by key.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, Ix> {
        Iter::new(self)
    }

    /// Get an iterator over the entries of the map with mutable values, sorted by key.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut::new(self)
    }

    /// Get an iterator over the keys of the map, in ascending order.
    #[inline]
    #[must_use]
    pub fn keys(&self) -> Keys<'_, K, V, Ix> {
        Keys { inner: self.iter() }
    }

    /// Get an iterator over the values of the map, ordered by key.
    #[inline]
    #[must_use]
    pub fn values(&self) -> Values<'_, K, V, Ix> {
        Values { inner: self.iter() }
    }

    /// Get a cursor positioned on the smallest key.
    ///
    /// Over an empty map the cursor is positioned nowhere and every
    /// dereference fails with [`MapError::EmptyCollection`].
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let map: OrderedMap<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    /// let mut cursor = map.cursor();
    /// assert_eq!(cursor.key(), Ok(&1));
    /// cursor.move_next();
    /// assert_eq!(cursor.value(), Ok(&'b'));
    /// cursor.move_prev();
    /// assert!(!cursor.has_prev());
    /// ```
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_, K, V, Ix> {
        Cursor::new(self, self.tree_minimum(self.root))
    }

    /// Get a mutable cursor positioned on the smallest key.
    #[inline]
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V, Ix> {
        let min = self.tree_minimum(self.root);
        CursorMut::new(self, min)
    }
}

impl<K, V> OrderedMap<K, V>
where
    K: Ord,
{
    /// Create an empty `OrderedMap`
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V, Ix> Default for OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    #[inline]
    fn default() -> Self {
        Self::with_capacity(0)
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Insert an entry, returning the node holding it and the replaced value.
    pub(crate) fn insert_inner(&mut self, key: K, value: V) -> (NodeIndex<Ix>, Option<V>) {
        let mut y = NodeIndex::sentinel();
        let mut x = self.root;
        let mut ord = Ordering::Equal;

        while !x.is_sentinel() {
            y = x;
            ord = key.cmp(self.node_ref(x, Node::key));
            match ord {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
                Ordering::Equal => {
                    trace!(node = x.index(), "replaced value of an existing key");
                    return (x, Some(self.node_mut(x, Node::set_value(value))));
                }
            }
        }

        let z = NodeIndex::new(self.nodes.len());
        // check for max capacity, except if we use usize
        assert!(
            <Ix as IndexType>::max().index() == !0 || NodeIndex::end() != z,
            "Reached maximum number of nodes"
        );
        self.nodes.push(Node::new_leaf(key, value, y));
        if y.is_sentinel() {
            self.root = z;
        } else if ord == Ordering::Less {
            self.node_mut(y, Node::set_left(z));
        } else {
            self.node_mut(y, Node::set_right(z));
        }
        trace!(node = z.index(), parent = y.index(), "attached new node");

        self.insert_fixup(z);

        self.len = self.len.wrapping_add(1);
        (z, None)
    }

    /// Search for the node holding exactly the given key.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<NodeIndex<Ix>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while !x.is_sentinel() {
            match key.cmp(self.node_ref(x, Node::key).borrow()) {
                Ordering::Less => x = self.node_ref(x, Node::left),
                Ordering::Greater => x = self.node_ref(x, Node::right),
                Ordering::Equal => return Some(x),
            }
        }
        None
    }
}

impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    /// Remove a node from the tree and release its slot.
    ///
    /// Returns the removed entry and where the surviving entries moved.
    pub(crate) fn remove_inner(&mut self, z: NodeIndex<Ix>) -> (K, V, Relocation<Ix>) {
        let mut relocation = Relocation::default();
        let y = if self.left_ref(z, Node::is_sentinel) || self.right_ref(z, Node::is_sentinel) {
            z
        } else {
            self.tree_minimum(self.node_ref(z, Node::right))
        };
        let y_orig_color = self.node_ref(y, Node::color);
        let x = if self.left_ref(y, Node::is_sentinel) {
            self.node_ref(y, Node::right)
        } else {
            self.node_ref(y, Node::left)
        };

        self.transplant(y, x);
        if y != z {
            self.swap_entries(y, z);
            relocation.entry = Some((y, z));
        }
        trace!(spliced = y.index(), target = z.index(), "spliced node out of the tree");

        if matches!(y_orig_color, Color::Black) {
            self.remove_fixup(x);
        }
        self.node_mut(NodeIndex::sentinel(), Node::set_parent(NodeIndex::sentinel()));

        // Swap the node with the last node stored in the vector and update indices
        let mut node = self.nodes.swap_remove(y.index());
        let old = NodeIndex::<Ix>::new(self.nodes.len());
        if old != y {
            self.update_idx(old, y);
            relocation.slot = Some((old, y));
        }

        self.len = self.len.wrapping_sub(1);
        let (key, value) = node.take_entry();
        (key, value, relocation)
    }

    /// Restore red-black tree properties after an insert.
    fn insert_fixup(&mut self, mut z: NodeIndex<Ix>) {
        while self.parent_ref(z, Node::is_red) {
            if self.grand_parent_ref(z, Node::is_sentinel) {
                break;
            }
            if self.is_left_child(self.node_ref(z, Node::parent)) {
                let y = self.grand_parent_ref(z, Node::right);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_right_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.left_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.right_rotate(self.parent_ref(z, Node::parent));
                }
            } else {
                let y = self.grand_parent_ref(z, Node::left);
                if self.node_ref(y, Node::is_red) {
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.node_mut(y, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    z = self.parent_ref(z, Node::parent);
                } else {
                    if self.is_left_child(z) {
                        z = self.node_ref(z, Node::parent);
                        self.right_rotate(z);
                    }
                    self.parent_mut(z, Node::set_color(Color::Black));
                    self.grand_parent_mut(z, Node::set_color(Color::Red));
                    self.left_rotate(self.parent_ref(z, Node::parent));
                }
            }
        }
        self.node_mut(self.root, Node::set_color(Color::Black));
    }

    /// Restore red-black tree properties after a remove.
    ///
    /// `x` may be the sentinel, whose parent link was set by the splice.
    fn remove_fixup(&mut self, mut x: NodeIndex<Ix>) {
        while x != self.root && self.node_ref(x, Node::is_black) {
            let mut w;
            if self.is_left_child(x) {
                w = self.parent_ref(x, Node::right);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::right);
                }
                if w.is_sentinel() {
                    break;
                }
                if self.left_ref(w, Node::is_black) && self.right_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.right_ref(w, Node::is_black) {
                        self.left_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.right_rotate(w);
                        w = self.parent_ref(x, Node::right);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.right_mut(w, Node::set_color(Color::Black));
                    self.left_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            } else {
                w = self.parent_ref(x, Node::left);
                if self.node_ref(w, Node::is_red) {
                    self.node_mut(w, Node::set_color(Color::Black));
                    self.parent_mut(x, Node::set_color(Color::Red));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    w = self.parent_ref(x, Node::left);
                }
                if w.is_sentinel() {
                    break;
                }
                if self.right_ref(w, Node::is_black) && self.left_ref(w, Node::is_black) {
                    self.node_mut(w, Node::set_color(Color::Red));
                    x = self.node_ref(x, Node::parent);
                } else {
                    if self.left_ref(w, Node::is_black) {
                        self.right_mut(w, Node::set_color(Color::Black));
                        self.node_mut(w, Node::set_color(Color::Red));
                        self.left_rotate(w);
                        w = self.parent_ref(x, Node::left);
                    }
                    self.node_mut(w, Node::set_color(self.parent_ref(x, Node::color)));
                    self.parent_mut(x, Node::set_color(Color::Black));
                    self.left_mut(w, Node::set_color(Color::Black));
                    self.right_rotate(self.node_ref(x, Node::parent));
                    x = self.root;
                }
            }
        }
        self.node_mut(x, Node::set_color(Color::Black));
    }

    /// Binary tree left rotate.
    fn left_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.right_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::right);
        self.node_mut(x, Node::set_right(self.node_ref(y, Node::left)));
        if !self.left_ref(y, Node::is_sentinel) {
            self.left_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_left(x));
    }

    /// Binary tree right rotate.
    fn right_rotate(&mut self, x: NodeIndex<Ix>) {
        if self.left_ref(x, Node::is_sentinel) {
            return;
        }
        let y = self.node_ref(x, Node::left);
        self.node_mut(x, Node::set_left(self.node_ref(y, Node::right)));
        if !self.right_ref(y, Node::is_sentinel) {
            self.right_mut(y, Node::set_parent(x));
        }

        self.replace_parent(x, y);
        self.node_mut(y, Node::set_right(x));
    }

    /// Replace parent during a rotation.
    fn replace_parent(&mut self, x: NodeIndex<Ix>, y: NodeIndex<Ix>) {
        self.node_mut(y, Node::set_parent(self.node_ref(x, Node::parent)));
        if self.parent_ref(x, Node::is_sentinel) {
            self.root = y;
        } else if self.is_left_child(x) {
            self.parent_mut(x, Node::set_left(y));
        } else {
            self.parent_mut(x, Node::set_right(y));
        }
        self.node_mut(x, Node::set_parent(y));
    }

    /// Replace one subtree as a child of its parent with another subtree.
    fn transplant(&mut self, u: NodeIndex<Ix>, v: NodeIndex<Ix>) {
        if self.parent_ref(u, Node::is_sentinel) {
            self.root = v;
        } else if self.is_left_child(u) {
            self.parent_mut(u, Node::set_left(v));
        } else {
            self.parent_mut(u, Node::set_right(v));
        }
        self.node_mut(v, Node::set_parent(self.node_ref(u, Node::parent)));
    }

    /// Exchange the key-value pairs of two distinct nodes, keeping their links and colors.
    fn swap_entries(&mut self, a: NodeIndex<Ix>, b: NodeIndex<Ix>) {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(hi.index());
        let (first, second) = (&mut head[lo.index()], &mut tail[0]);
        mem::swap(&mut first.key, &mut second.key);
        mem::swap(&mut first.value, &mut second.value);
    }

    /// Check if a node is a left child of its parent.
    fn is_left_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::left) == node
    }

    /// Check if a node is a right child of its parent.
    fn is_right_child(&self, node: NodeIndex<Ix>) -> bool {
        self.parent_ref(node, Node::right) == node
    }

    /// Update links after the node stored at `old` moved to `new`.
    fn update_idx(&mut self, old: NodeIndex<Ix>, new: NodeIndex<Ix>) {
        trace!(from = old.index(), to = new.index(), "relocated arena slot");
        if self.root == old {
            self.root = new;
        } else if self.parent_ref(new, Node::left) == old {
            self.parent_mut(new, Node::set_left(new));
        } else {
            self.parent_mut(new, Node::set_right(new));
        }
        if !self.left_ref(new, Node::is_sentinel) {
            self.left_mut(new, Node::set_parent(new));
        }
        if !self.right_ref(new, Node::is_sentinel) {
            self.right_mut(new, Node::set_parent(new));
        }
    }
}

// In-order navigation
impl<K, V, Ix> OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    /// Find the node with the minimum key of a subtree.
    pub(crate) fn tree_minimum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if x.is_sentinel() {
            return x;
        }
        while !self.left_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::left);
        }
        x
    }

    /// Find the node with the maximum key of a subtree.
    pub(crate) fn tree_maximum(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if x.is_sentinel() {
            return x;
        }
        while !self.right_ref(x, Node::is_sentinel) {
            x = self.node_ref(x, Node::right);
        }
        x
    }

    /// The next node in key order, or the sentinel.
    pub(crate) fn successor(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if x.is_sentinel() {
            return x;
        }
        if !self.right_ref(x, Node::is_sentinel) {
            return self.tree_minimum(self.node_ref(x, Node::right));
        }
        let mut y = self.node_ref(x, Node::parent);
        while !y.is_sentinel() && self.node_ref(y, Node::right) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        y
    }

    /// The previous node in key order, or the sentinel.
    pub(crate) fn predecessor(&self, mut x: NodeIndex<Ix>) -> NodeIndex<Ix> {
        if x.is_sentinel() {
            return x;
        }
        if !self.left_ref(x, Node::is_sentinel) {
            return self.tree_maximum(self.node_ref(x, Node::left));
        }
        let mut y = self.node_ref(x, Node::parent);
        while !y.is_sentinel() && self.node_ref(y, Node::left) == x {
            x = y;
            y = self.node_ref(y, Node::parent);
        }
        y
    }
}

// Convenient methods for reference or mutate current/parent/left/right node
impl<'a, K, V, Ix> OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    pub(crate) fn node_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        op(&self.nodes[node.index()])
    }

    pub(crate) fn node_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        op(&mut self.nodes[node.index()])
    }

    pub(crate) fn left_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&self.nodes[idx])
    }

    pub(crate) fn right_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&self.nodes[idx])
    }

    fn parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&self.nodes[idx])
    }

    fn grand_parent_ref<F, R>(&'a self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&self.nodes[grand_parent_idx])
    }

    fn left_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].left().index();
        op(&mut self.nodes[idx])
    }

    fn right_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].right().index();
        op(&mut self.nodes[idx])
    }

    fn parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let idx = self.nodes[node.index()].parent().index();
        op(&mut self.nodes[idx])
    }

    fn grand_parent_mut<F, R>(&'a mut self, node: NodeIndex<Ix>, op: F) -> R
    where
        R: 'a,
        F: FnOnce(&'a mut Node<K, V, Ix>) -> R,
    {
        let parent_idx = self.nodes[node.index()].parent().index();
        let grand_parent_idx = self.nodes[parent_idx].parent().index();
        op(&mut self.nodes[grand_parent_idx])
    }
}

impl<K, V, Ix> Clone for OrderedMap<K, V, Ix>
where
    K: Clone,
    V: Clone,
    Ix: IndexType,
{
    /// Deep copy. Indices are arena positions, so the cloned links stay valid.
    fn clone(&self) -> Self {
        OrderedMap {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
        }
    }
}

impl<K, V, Ix> fmt::Debug for OrderedMap<K, V, Ix>
where
    K: fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, Ix> PartialEq for OrderedMap<K, V, Ix>
where
    K: PartialEq,
    V: PartialEq,
    Ix: IndexType,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, Ix> Eq for OrderedMap<K, V, Ix>
where
    K: Eq,
    V: Eq,
    Ix: IndexType,
{
}

impl<K, Q, V, Ix> Index<&Q> for OrderedMap<K, V, Ix>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
    Ix: IndexType,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key)
            .unwrap_or_else(|| panic!("{}", MapError::KeyNotFound))
    }
}

impl<K, Q, V, Ix> IndexMut<&Q> for OrderedMap<K, V, Ix>
where
    K: Borrow<Q> + Ord,
    Q: Ord + ?Sized,
    Ix: IndexType,
{
    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    #[inline]
    fn index_mut(&mut self, key: &Q) -> &mut V {
        self.get_mut(key)
            .unwrap_or_else(|| panic!("{}", MapError::KeyNotFound))
    }
}

impl<K, V, Ix> FromIterator<(K, V)> for OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, Ix> Extend<(K, V)> for OrderedMap<K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            let _ignore = self.insert(key, value);
        }
    }
}

impl<K, V, Ix> IntoIterator for OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, K, V, Ix> IntoIterator for &'a OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, Ix>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, Ix> IntoIterator for &'a mut OrderedMap<K, V, Ix>
where
    Ix: IndexType,
{
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
