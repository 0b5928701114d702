use crate::index::{IndexType, NodeIndex};

const SENTINEL_ENTRY: &str = "the sentinel node holds no entry";

/// Node of the red-black tree
#[derive(Debug, Clone)]
pub struct Node<K, V, Ix> {
    /// Left child
    pub left: NodeIndex<Ix>,
    /// Right child
    pub right: NodeIndex<Ix>,
    /// Parent, only used for navigation
    pub parent: NodeIndex<Ix>,
    /// Color of the node
    pub color: Color,

    /// Key of the node, `None` only for the sentinel
    pub key: Option<K>,
    /// Value of the node, `None` only for the sentinel
    pub value: Option<V>,
}

impl<K, V, Ix> Node<K, V, Ix>
where
    Ix: IndexType,
{
    /// The shared black leaf stored in slot 0.
    pub fn new_sentinel() -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent: NodeIndex::sentinel(),
            color: Color::Black,
            key: None,
            value: None,
        }
    }

    /// A detached red node.
    pub fn new_leaf(key: K, value: V, parent: NodeIndex<Ix>) -> Self {
        Node {
            left: NodeIndex::sentinel(),
            right: NodeIndex::sentinel(),
            parent,
            color: Color::Red,
            key: Some(key),
            value: Some(value),
        }
    }
}

// Convenient getter/setter methods
impl<K, V, Ix> Node<K, V, Ix>
where
    Ix: IndexType,
{
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn key(&self) -> &K {
        self.key.as_ref().expect(SENTINEL_ENTRY)
    }

    pub fn left(&self) -> NodeIndex<Ix> {
        self.left
    }

    pub fn right(&self) -> NodeIndex<Ix> {
        self.right
    }

    pub fn parent(&self) -> NodeIndex<Ix> {
        self.parent
    }

    pub fn is_sentinel(&self) -> bool {
        self.key.is_none()
    }

    pub fn is_black(&self) -> bool {
        matches!(self.color, Color::Black)
    }

    pub fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    pub fn value(&self) -> &V {
        self.value.as_ref().expect(SENTINEL_ENTRY)
    }

    pub fn value_mut(&mut self) -> &mut V {
        self.value.as_mut().expect(SENTINEL_ENTRY)
    }

    pub fn entry(&self) -> (&K, &V) {
        (self.key(), self.value())
    }

    pub fn entry_mut(&mut self) -> (&K, &mut V) {
        match (&self.key, &mut self.value) {
            (Some(key), Some(value)) => (key, value),
            _ => panic!("{SENTINEL_ENTRY}"),
        }
    }

    pub fn take_entry(&mut self) -> (K, V) {
        match (self.key.take(), self.value.take()) {
            (Some(key), Some(value)) => (key, value),
            _ => panic!("{SENTINEL_ENTRY}"),
        }
    }

    pub fn set_value(value: V) -> impl FnOnce(&mut Node<K, V, Ix>) -> V {
        move |node: &mut Node<K, V, Ix>| node.value.replace(value).expect(SENTINEL_ENTRY)
    }

    pub fn set_color(color: Color) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.color = color;
        }
    }

    pub fn set_left(left: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.left = left;
        }
    }

    pub fn set_right(right: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.right = right;
        }
    }

    pub fn set_parent(parent: NodeIndex<Ix>) -> impl FnOnce(&mut Node<K, V, Ix>) {
        move |node: &mut Node<K, V, Ix>| {
            node.parent = parent;
        }
    }
}

/// The color of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Red node
    Red,
    /// Black node
    Black,
}

impl Color {
    /// Single-letter tag used by the tree dump.
    pub fn tag(self) -> char {
        match self {
            Color::Red => 'R',
            Color::Black => 'B',
        }
    }
}
