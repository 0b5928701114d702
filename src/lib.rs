//! `rb_ordered_map` is an ordered key-value map based on red-black tree.
//!
//! It implements the insertion and deletion algorithms of a red-black tree,
//! so lookups and modifications take at most O(logN) time.
//!
//! Nodes live in a vector and refer to their parent and children by index
//! rather than by pointer. A single black sentinel node in slot 0 plays the
//! role of every absent child. This keeps the map free of `unsafe` pointer
//! juggling, makes it `Send` and `Unpin`, and lets a whole tree be dropped or
//! cloned as one vector.
//!
//! Besides the usual iterators, the map hands out cursors that step forward
//! and backward through the keys, and a [`CursorMut`] that can insert and
//! remove keys while staying on its entry.
//!
//! # Example
//!
//! ```rust
//! use rb_ordered_map::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert("health", 10);
//! map.insert("armor", 20);
//! map.insert("ammo", 5);
//! assert_eq!(map.get("armor"), Some(&20));
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["ammo", "armor", "health"]);
//! ```
//!

mod cursor;
mod dump;
mod entry;
mod error;
mod index;
mod iter;
mod map;
mod node;


pub use cursor::{Cursor, CursorMut};
pub use dump::Dump;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use error::MapError;
pub use index::{DefaultIx, IndexType};
pub use iter::{IntoIter, Iter, IterMut, Keys, Values};
pub use map::OrderedMap;
