//! Integration tests for component keys, values, and maps
//!
//! Tests the presence-based semantics the membership machinery relies on.

use overseer_foundation::{ComponentKey, ComponentMap, EntityId, Value};

const POSITION: ComponentKey = ComponentKey::new("position");
const VELOCITY: ComponentKey = ComponentKey::new("velocity");
const TARGET: ComponentKey = ComponentKey::new("target");

// =============================================================================
// Keys
// =============================================================================

#[test]
fn keys_are_named_constants() {
    assert_eq!(POSITION.name(), "position");
    assert_eq!(POSITION, ComponentKey::new("position"));
    assert_ne!(POSITION, VELOCITY);
}

// =============================================================================
// Maps
// =============================================================================

#[test]
fn presence_is_what_matters() {
    let mut map = ComponentMap::new();
    map.insert(POSITION, Value::Nil);

    // A Nil marker still counts as present.
    assert!(map.contains(POSITION));
    assert!(!map.contains(VELOCITY));
}

#[test]
fn values_round_trip() {
    let mut map = ComponentMap::new();
    map.insert(POSITION, Value::Float(1.5));
    map.insert(VELOCITY, Value::Int(-3));
    map.insert(TARGET, Value::EntityRef(EntityId::new(8, 1)));

    assert_eq!(map.get(POSITION), Some(&Value::Float(1.5)));
    assert_eq!(map.get(VELOCITY), Some(&Value::Int(-3)));
    assert_eq!(
        map.get(TARGET),
        Some(&Value::EntityRef(EntityId::new(8, 1)))
    );
}

#[test]
fn remove_clears_presence() {
    let mut map: ComponentMap = [(POSITION, Value::Nil), (VELOCITY, Value::Nil)]
        .into_iter()
        .collect();

    assert_eq!(map.remove(VELOCITY), Some(Value::Nil));
    assert!(!map.contains(VELOCITY));
    assert!(map.contains(POSITION));
    assert_eq!(map.len(), 1);
}

// =============================================================================
// Property tests
// =============================================================================

mod properties {
    use super::*;
    use proptest::prelude::*;

    const KEYS: [ComponentKey; 4] = [
        ComponentKey::new("a"),
        ComponentKey::new("b"),
        ComponentKey::new("c"),
        ComponentKey::new("d"),
    ];

    proptest! {
        #[test]
        fn presence_tracks_insert_and_remove(
            ops in proptest::collection::vec((0usize..4, any::<bool>()), 0..32)
        ) {
            let mut map = ComponentMap::new();
            let mut model = [false; 4];

            for (slot, insert) in ops {
                let key = KEYS[slot];
                if insert {
                    map.insert(key, Value::Nil);
                    model[slot] = true;
                } else {
                    map.remove(key);
                    model[slot] = false;
                }

                for (i, key) in KEYS.iter().enumerate() {
                    prop_assert_eq!(map.contains(*key), model[i]);
                }
                prop_assert_eq!(map.len(), model.iter().filter(|p| **p).count());
            }
        }
    }
}

#[test]
fn iteration_is_key_ordered() {
    let map: ComponentMap = [
        (VELOCITY, Value::Int(1)),
        (POSITION, Value::Int(2)),
        (TARGET, Value::Int(3)),
    ]
    .into_iter()
    .collect();

    let keys: Vec<_> = map.keys().collect();
    assert_eq!(keys, vec![POSITION, TARGET, VELOCITY]);
}
