//! Behavior of the public `OrderedMap` API.

use rb_ordered_map::{Entry, MapError, OrderedMap};
use rstest::rstest;

fn npc() -> OrderedMap<&'static str, i32> {
    [("health", 10), ("armor", 20), ("ammo", 5)]
        .into_iter()
        .collect()
}

// =============================================================================
// Lookup
// =============================================================================

#[rstest]
#[case("health", Some(10))]
#[case("armor", Some(20))]
#[case("ammo", Some(5))]
#[case("mana", None)]
fn get_returns_stored_value(#[case] key: &str, #[case] expected: Option<i32>) {
    let map = npc();
    assert_eq!(map.get(key).copied(), expected);
    assert_eq!(map.contains_key(key), expected.is_some());
}

#[rstest]
#[case("health", Ok(10))]
#[case("mana", Err(MapError::KeyNotFound))]
fn try_get_reports_missing_key(#[case] key: &str, #[case] expected: Result<i32, MapError>) {
    let map = npc();
    assert_eq!(map.try_get(key).copied(), expected);
}

#[test]
fn error_messages_are_readable() {
    assert_eq!(MapError::KeyNotFound.to_string(), "key not found");
    assert!(MapError::EmptyCollection.to_string().contains("empty"));
}

// =============================================================================
// Insert and remove
// =============================================================================

#[rstest]
#[case(vec![], vec![])]
#[case(vec![3, 1, 2], vec![1, 2, 3])]
#[case(vec![5, 5, 5], vec![5])]
#[case(vec![9, 8, 7, 6, 5, 4, 3, 2, 1], vec![1, 2, 3, 4, 5, 6, 7, 8, 9])]
#[case(vec![50, 30, 70, 20, 40, 60, 80], vec![20, 30, 40, 50, 60, 70, 80])]
fn keys_come_out_sorted_and_distinct(#[case] input: Vec<i32>, #[case] expected: Vec<i32>) {
    let map: OrderedMap<_, _> = input.into_iter().map(|k| (k, ())).collect();
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), expected);
    assert_eq!(map.len(), expected.len());
}

#[test]
fn second_insert_overwrites_value() {
    let mut map = npc();
    assert_eq!(map.insert("ammo", 50), Some(5));
    assert_eq!(map.len(), 3);
    assert_eq!(map["ammo"], 50);
}

#[rstest]
#[case(OrderedMap::new())]
#[case(npc())]
fn remove_absent_key_is_noop(#[case] mut map: OrderedMap<&'static str, i32>) {
    let before = map.clone();
    assert_eq!(map.remove("mana"), None);
    assert_eq!(map.remove_entry("mana"), None);
    assert_eq!(map, before);
}

#[test]
fn remove_returns_value_and_shrinks() {
    let mut map = npc();
    assert_eq!(map.remove("armor"), Some(20));
    assert_eq!(map.remove_entry("ammo"), Some(("ammo", 5)));
    assert_eq!(map.len(), 1);
    assert_eq!(map.iter().collect::<Vec<_>>(), [(&"health", &10)]);
}

#[test]
fn extend_overwrites_existing_keys() {
    let mut map = npc();
    map.extend([("ammo", 0), ("mana", 7)]);
    assert_eq!(map.len(), 4);
    assert_eq!(
        map.into_iter().collect::<Vec<_>>(),
        [("ammo", 0), ("armor", 20), ("health", 10), ("mana", 7)]
    );
}

// =============================================================================
// Cursors
// =============================================================================

#[test]
fn cursor_reports_empty_map() {
    let map: OrderedMap<i32, i32> = OrderedMap::default();
    let cursor = map.cursor();
    assert_eq!(cursor.key(), Err(MapError::EmptyCollection));
    assert_eq!(cursor.value(), Err(MapError::EmptyCollection));
    assert_eq!(cursor.entry(), Err(MapError::EmptyCollection));
}

#[rstest]
#[case("ammo", None, Some("armor"))]
#[case("armor", Some("ammo"), Some("health"))]
#[case("health", Some("armor"), None)]
fn cursor_at_sees_neighbors(
    #[case] key: &str,
    #[case] prev: Option<&str>,
    #[case] next: Option<&str>,
) {
    let map = npc();
    let cursor = map.cursor_at(key).unwrap();
    assert_eq!(cursor.has_prev(), prev.is_some());
    assert_eq!(cursor.has_next(), next.is_some());

    let mut before = cursor;
    before.move_prev();
    assert_eq!(before.key().ok().copied(), prev.or(Some(key)));
    let mut after = cursor;
    after.move_next();
    assert_eq!(after.key().ok().copied(), next.or(Some(key)));
}

#[test]
fn cursor_at_missing_key_fails() {
    let mut map = npc();
    assert_eq!(map.cursor_at("mana").err(), Some(MapError::KeyNotFound));
    assert_eq!(map.cursor_mut_at("mana").err(), Some(MapError::KeyNotFound));
}

#[test]
fn cursor_mut_edits_in_place() {
    let mut map = npc();
    let mut cursor = map.cursor_mut_at("armor").unwrap();
    assert_eq!(cursor.set_value(25), Ok(20));
    cursor.insert("apple", 1);
    cursor.insert("zeal", 2);
    assert_eq!(cursor.key(), Ok(&"armor"));
    assert_eq!(cursor.remove("ammo"), Some(5));
    cursor.move_prev();
    assert_eq!(cursor.key(), Ok(&"apple"));
    assert_eq!(
        map.iter().map(|(k, v)| (*k, *v)).collect::<Vec<_>>(),
        [("apple", 1), ("armor", 25), ("health", 10), ("zeal", 2)]
    );
}

// =============================================================================
// Entry
// =============================================================================

#[test]
fn entry_counts_words() {
    let mut counts = OrderedMap::new();
    for word in "the cat saw the dog and the cat ran".split(' ') {
        *counts.entry(word).or_insert(0) += 1;
    }
    assert_eq!(counts["the"], 3);
    assert_eq!(counts["cat"], 2);
    assert_eq!(counts.first_key_value(), Some((&"and", &1)));
    assert_eq!(counts.last_key_value(), Some((&"the", &3)));
}

#[test]
fn vacant_entry_hands_back_key() {
    let mut map = npc();
    match map.entry("mana") {
        Entry::Vacant(entry) => assert_eq!(entry.into_key(), "mana"),
        Entry::Occupied(_) => panic!("mana should be vacant"),
    }
    assert_eq!(map.len(), 3);
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn dump_marks_root_and_colors() {
    let map = npc();
    assert_eq!(
        map.dump().to_string(),
        "   R ammo: 5\nB armor: 20 (ROOT)\n   R health: 10\n"
    );
}
