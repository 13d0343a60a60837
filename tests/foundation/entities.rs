//! Integration tests for entity identifiers
//!
//! Tests generational ids, the null sentinel, and formatting.

use overseer_foundation::EntityId;

// =============================================================================
// Identity
// =============================================================================

#[test]
fn entity_identity_is_index_plus_generation() {
    assert_eq!(EntityId::new(3, 1), EntityId::new(3, 1));
    assert_ne!(EntityId::new(3, 1), EntityId::new(3, 2));
    assert_ne!(EntityId::new(3, 1), EntityId::new(4, 1));
}

#[test]
fn entity_ids_work_as_map_keys() {
    use std::collections::HashMap;

    let mut map = HashMap::new();
    map.insert(EntityId::new(0, 1), "first");
    map.insert(EntityId::new(0, 2), "reused");

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&EntityId::new(0, 1)), Some(&"first"));
    assert_eq!(map.get(&EntityId::new(0, 2)), Some(&"reused"));
}

// =============================================================================
// Null sentinel
// =============================================================================

#[test]
fn null_is_never_a_real_entity() {
    let null = EntityId::null();
    assert!(null.is_null());
    assert_ne!(null, EntityId::new(0, 0));
    assert!(!EntityId::new(7, 1).is_null());
}

// =============================================================================
// Formatting
// =============================================================================

#[test]
fn formatting_shows_index_and_generation() {
    let e = EntityId::new(42, 3);
    assert_eq!(format!("{e:?}"), "EntityId(42#3)");
    assert_eq!(format!("{e}"), "entity(42)");
}
