//! Component keys, values, and the per-entity component map.
//!
//! Membership in a processor is defined by *presence* of component keys on an
//! entity; the values themselves are opaque to the membership machinery and
//! only read by associated-data factories and hooks.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::entity::EntityId;

/// Stable identifier for one kind of per-entity data.
///
/// Keys are ordered and hashable so required-key sets iterate
/// deterministically.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentKey(&'static str);

impl ComponentKey {
    /// Creates a key from its canonical name.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    /// The canonical name of this component kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.0
    }
}

impl fmt::Debug for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentKey({})", self.0)
    }
}

impl fmt::Display for ComponentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A component value.
///
/// Deliberately small: the processor layer never interprets values, it only
/// checks key presence. Factories and hooks may read them.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// Marker component with no payload.
    Nil,
    /// Boolean payload.
    Bool(bool),
    /// 64-bit signed integer payload.
    Int(i64),
    /// 64-bit float payload.
    Float(f64),
    /// String payload.
    String(String),
    /// Reference to another entity.
    EntityRef(EntityId),
}

/// Per-entity mapping from component key to component value.
///
/// Owned by the container; processors receive it read-only during membership
/// evaluation and data construction.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ComponentMap {
    entries: BTreeMap<ComponentKey, Value>,
}

impl ComponentMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the entity carries no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the component is present.
    #[must_use]
    pub fn contains(&self, key: ComponentKey) -> bool {
        self.entries.contains_key(&key)
    }

    /// Gets a component value.
    #[must_use]
    pub fn get(&self, key: ComponentKey) -> Option<&Value> {
        self.entries.get(&key)
    }

    /// Sets a component value, returning the previous one if any.
    pub fn insert(&mut self, key: ComponentKey, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    /// Removes a component, returning its value if it was present.
    pub fn remove(&mut self, key: ComponentKey) -> Option<Value> {
        self.entries.remove(&key)
    }

    /// Iterates component keys in key order.
    pub fn keys(&self) -> impl Iterator<Item = ComponentKey> + '_ {
        self.entries.keys().copied()
    }

    /// Iterates `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (ComponentKey, &Value)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}

impl FromIterator<(ComponentKey, Value)> for ComponentMap {
    fn from_iter<I: IntoIterator<Item = (ComponentKey, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ComponentMap {
    type Item = (ComponentKey, Value);
    type IntoIter = btree_map::IntoIter<ComponentKey, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
