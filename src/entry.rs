use std::fmt;

use crate::index::{IndexType, NodeIndex};
use crate::map::OrderedMap;
use crate::node::Node;

/// A view into a single entry in a map, which may either be vacant or occupied.
pub enum Entry<'a, K, V, Ix>
where
    K: Ord,
{
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, Ix>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, Ix>),
}

/// A view into an occupied entry in a `OrderedMap`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, Ix>
where
    K: Ord,
{
    /// Reference to the map
    pub(crate) map_ref: &'a mut OrderedMap<K, V, Ix>,
    /// The entry node
    pub(crate) node_idx: NodeIndex<Ix>,
}

/// A view into a vacant entry in a `OrderedMap`.
/// It is part of the [`Entry`] enum.
pub struct VacantEntry<'a, K, V, Ix>
where
    K: Ord,
{
    /// Mutable reference to the map
    pub(crate) map_ref: &'a mut OrderedMap<K, V, Ix>,
    /// The key of this entry
    pub(crate) key: K,
}

impl<'a, K, V, Ix> Entry<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::{Entry, OrderedMap};
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(matches!(map.entry("ammo"), Entry::Vacant(_)));
    /// map.entry("ammo").or_insert(5);
    /// assert!(matches!(map.entry("ammo"), Entry::Occupied(_)));
    /// assert_eq!(map.get("ammo"), Some(&5));
    /// ```
    #[inline]
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Like [`or_insert`](Self::or_insert), computing the default only when needed.
    #[inline]
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Like [`or_insert`](Self::or_insert), using `V::default()`.
    #[inline]
    pub fn or_default(self) -> &'a mut V
    where
        V: Default,
    {
        self.or_insert_with(V::default)
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Example
    /// ```rust
    /// use rb_ordered_map::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.insert(6, 3);
    /// map.entry(6).and_modify(|v| *v += 1);
    /// assert_eq!(map.get(&6), Some(&4));
    /// ```
    #[inline]
    #[must_use]
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Self::Occupied(entry)
            }
            Entry::Vacant(entry) => Self::Vacant(entry),
        }
    }

    /// The key of this entry.
    #[inline]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, K, V, Ix> OccupiedEntry<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// The key stored in the map.
    #[inline]
    pub fn key(&self) -> &K {
        self.map_ref.node_ref(self.node_idx, Node::key)
    }

    /// The value of the entry.
    #[inline]
    pub fn get(&self) -> &V {
        self.map_ref.node_ref(self.node_idx, Node::value)
    }

    /// Mutable access to the value of the entry.
    #[inline]
    pub fn get_mut(&mut self) -> &mut V {
        self.map_ref.node_mut(self.node_idx, Node::value_mut)
    }

    /// Converts the entry into a mutable reference bound to the map's lifetime.
    #[inline]
    pub fn into_mut(self) -> &'a mut V {
        self.map_ref.node_mut(self.node_idx, Node::value_mut)
    }

    /// Replace the value of the entry, returning the old one.
    #[inline]
    pub fn insert(&mut self, value: V) -> V {
        self.map_ref.node_mut(self.node_idx, Node::set_value(value))
    }

    /// Remove the entry from the map, returning its value.
    #[inline]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }

    /// Remove the entry from the map, returning the stored key and value.
    #[inline]
    pub fn remove_entry(self) -> (K, V) {
        let (key, value, _) = self.map_ref.remove_inner(self.node_idx);
        (key, value)
    }
}

impl<'a, K, V, Ix> VacantEntry<'a, K, V, Ix>
where
    K: Ord,
    Ix: IndexType,
{
    /// The key that would be used when inserting.
    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    #[inline]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Insert the value, returning a mutable reference to it.
    #[inline]
    pub fn insert(self, value: V) -> &'a mut V {
        let (node_idx, _) = self.map_ref.insert_inner(self.key, value);
        self.map_ref.node_mut(node_idx, Node::value_mut)
    }
}

impl<K, V, Ix> fmt::Debug for Entry<'_, K, V, Ix>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Occupied(entry) => f.debug_tuple("Entry").field(entry).finish(),
            Entry::Vacant(entry) => f.debug_tuple("Entry").field(entry).finish(),
        }
    }
}

impl<K, V, Ix> fmt::Debug for OccupiedEntry<'_, K, V, Ix>
where
    K: Ord + fmt::Debug,
    V: fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish()
    }
}

impl<K, V, Ix> fmt::Debug for VacantEntry<'_, K, V, Ix>
where
    K: Ord + fmt::Debug,
    Ix: IndexType,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(self.key()).finish()
    }
}
