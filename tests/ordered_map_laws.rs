//! Property-based tests for OrderedMap.
//!
//! Every property runs the same operations against `std::collections::BTreeMap`
//! and requires identical observable results.

use proptest::prelude::*;
use rb_ordered_map::OrderedMap;
use std::collections::BTreeMap;

// =============================================================================
// Strategy for generating test data
// =============================================================================

#[derive(Debug, Clone)]
enum Op {
    Insert(u16, i32),
    Remove(u16),
    PopFirst,
    PopLast,
}

fn arbitrary_key() -> impl Strategy<Value = u16> {
    0..200u16
}

fn arbitrary_entries() -> impl Strategy<Value = Vec<(u16, i32)>> {
    prop::collection::vec((arbitrary_key(), any::<i32>()), 0..200)
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (arbitrary_key(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => arbitrary_key().prop_map(Op::Remove),
        1 => Just(Op::PopFirst),
        1 => Just(Op::PopLast),
    ]
}

fn arbitrary_ops() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(arbitrary_op(), 0..400)
}

// =============================================================================
// Model law: any operation sequence matches BTreeMap step by step
// =============================================================================

proptest! {
    #[test]
    fn prop_matches_btree_map(ops in arbitrary_ops()) {
        let mut map = OrderedMap::new();
        let mut model = BTreeMap::new();
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
                Op::PopFirst => {
                    prop_assert_eq!(map.pop_first(), model.pop_first());
                }
                Op::PopLast => {
                    prop_assert_eq!(map.pop_last(), model.pop_last());
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }
        prop_assert!(map.iter().eq(model.iter()));
    }
}

// =============================================================================
// Get-Insert Law: after insert(k, v), get(&k) == Some(&v)
// =============================================================================

proptest! {
    #[test]
    fn prop_get_insert_law(
        entries in arbitrary_entries(),
        key in arbitrary_key(),
        value in any::<i32>()
    ) {
        let mut map: OrderedMap<u16, i32> = entries.into_iter().collect();
        map.insert(key, value);
        prop_assert_eq!(map.get(&key), Some(&value));
    }
}

// =============================================================================
// Remove law: after remove(&k), the key is gone and len drops by one at most
// =============================================================================

proptest! {
    #[test]
    fn prop_remove_law(entries in arbitrary_entries(), key in arbitrary_key()) {
        let mut map: OrderedMap<u16, i32> = entries.into_iter().collect();
        let before = map.len();
        let removed = map.remove(&key);
        prop_assert!(!map.contains_key(&key));
        prop_assert_eq!(map.len(), before - usize::from(removed.is_some()));
    }
}

// =============================================================================
// Order law: iteration is strictly ascending both ways, and cursors agree
// =============================================================================

proptest! {
    #[test]
    fn prop_iteration_is_sorted(entries in arbitrary_entries()) {
        let map: OrderedMap<u16, i32> = entries.iter().copied().collect();
        let model: BTreeMap<u16, i32> = entries.into_iter().collect();

        let keys: Vec<_> = map.keys().copied().collect();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(map.iter().rev().eq(model.iter().rev()));
        prop_assert!(map.values().eq(model.values()));

        let mut walked = Vec::new();
        let mut cursor = map.cursor();
        if let Ok(key) = cursor.key() {
            walked.push(*key);
            while cursor.has_next() {
                cursor.move_next();
                walked.push(*cursor.key().unwrap());
            }
        }
        prop_assert_eq!(walked, keys);
    }
}

// =============================================================================
// Clone law: a clone is equal and unaffected by later changes to the source
// =============================================================================

proptest! {
    #[test]
    fn prop_clone_is_independent(entries in arbitrary_entries(), ops in arbitrary_ops()) {
        let mut map: OrderedMap<u16, i32> = entries.into_iter().collect();
        let copy = map.clone();
        let snapshot: Vec<_> = copy.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&copy, &map);
        for op in ops {
            match op {
                Op::Insert(k, v) => { map.insert(k, v); }
                Op::Remove(k) => { map.remove(&k); }
                Op::PopFirst => { map.pop_first(); }
                Op::PopLast => { map.pop_last(); }
            }
        }
        prop_assert!(copy.into_iter().eq(snapshot));
    }
}

// =============================================================================
// Cursor law: removals through a cursor never move it off its entry
// =============================================================================

proptest! {
    #[test]
    fn prop_cursor_stays_on_entry(
        entries in prop::collection::vec((arbitrary_key(), any::<i32>()), 1..200),
        removals in prop::collection::vec(arbitrary_key(), 0..200),
        pick in any::<prop::sample::Index>()
    ) {
        let mut map: OrderedMap<u16, i32> = entries.into_iter().collect();
        let anchor = *pick.get(&map.keys().copied().collect::<Vec<_>>());
        let mut cursor = map.cursor_mut_at(&anchor).unwrap();
        for k in removals.into_iter().filter(|&k| k != anchor) {
            cursor.remove(&k);
            prop_assert_eq!(cursor.key(), Ok(&anchor));
        }
    }
}
