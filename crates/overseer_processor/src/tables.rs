//! Matching table plus enabled subset for one processor.

use std::collections::{HashMap, HashSet};

use overseer_foundation::EntityId;

/// The entities a processor tracks, with their associated data.
///
/// The matching table owns one `T` per tracked entity; the enabled table is a
/// key subset of it. Invariant: every enabled entity is matching. The data
/// itself is stored exactly once — enabling or disabling an entity never
/// clones, replaces or drops its associated data.
#[derive(Debug)]
pub struct EntityTables<T> {
    matching: HashMap<EntityId, T>,
    enabled: HashSet<EntityId>,
}

impl<T> Default for EntityTables<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityTables<T> {
    /// Creates empty tables.
    #[must_use]
    pub fn new() -> Self {
        Self {
            matching: HashMap::new(),
            enabled: HashSet::new(),
        }
    }

    /// Number of matching entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matching.len()
    }

    /// Returns true if no entity is matching.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matching.is_empty()
    }

    /// Number of enabled entities.
    #[must_use]
    pub fn enabled_len(&self) -> usize {
        self.enabled.len()
    }

    /// Returns true if the entity is in the matching table.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.matching.contains_key(&entity)
    }

    /// Returns true if the entity is in the enabled table.
    #[must_use]
    pub fn is_enabled(&self, entity: EntityId) -> bool {
        self.enabled.contains(&entity)
    }

    /// Gets the associated data of a matching entity.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.matching.get(&entity)
    }

    /// Gets the associated data of a matching entity, mutably.
    pub fn get_mut(&mut self, entity: EntityId) -> Option<&mut T> {
        self.matching.get_mut(&entity)
    }

    /// Inserts an entity into the matching table.
    ///
    /// Returns the previous data if the entity was already matching; the
    /// state machine never overwrites, so callers treat `Some` as a bug.
    pub fn insert(&mut self, entity: EntityId, data: T) -> Option<T> {
        self.matching.insert(entity, data)
    }

    /// Removes an entity from both tables, returning its data.
    pub fn remove(&mut self, entity: EntityId) -> Option<T> {
        self.enabled.remove(&entity);
        self.matching.remove(&entity)
    }

    /// Marks a matching entity enabled.
    ///
    /// Returns false if the entity was already enabled. Marking a
    /// non-matching entity is a logic error upstream and is rejected to keep
    /// the subset invariant.
    pub fn enable(&mut self, entity: EntityId) -> bool {
        if !self.matching.contains_key(&entity) {
            return false;
        }
        self.enabled.insert(entity)
    }

    /// Clears the enabled mark on an entity.
    ///
    /// Returns false if the entity was not enabled.
    pub fn disable(&mut self, entity: EntityId) -> bool {
        self.enabled.remove(&entity)
    }

    /// Iterates all matching entities with their data (unspecified order).
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.matching.iter().map(|(entity, data)| (*entity, data))
    }

    /// Iterates all matching entities with mutable data.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.matching
            .iter_mut()
            .map(|(entity, data)| (*entity, data))
    }

    /// Iterates only the enabled entities with their data.
    pub fn enabled_iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.matching
            .iter()
            .filter(|(entity, _)| self.enabled.contains(*entity))
            .map(|(entity, data)| (*entity, data))
    }

    /// Iterates only the enabled entities with mutable data.
    pub fn enabled_iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        let enabled = &self.enabled;
        self.matching
            .iter_mut()
            .filter(move |(entity, _)| enabled.contains(*entity))
            .map(|(entity, data)| (*entity, data))
    }

    /// Iterates the matching entity ids.
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.matching.keys().copied()
    }
}
