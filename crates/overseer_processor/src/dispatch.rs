//! Per-entity processor dispatch registry.

use std::fmt;

/// Identifies a registered processor slot in the container.
///
/// Slot ids are assigned at registration and never reused, so a stored id
/// stays valid for the lifetime of the container.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct ProcessorId(usize);

impl ProcessorId {
    /// Creates an id from a slot index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The slot index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for ProcessorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProcessorId({})", self.0)
    }
}

/// The processors currently claiming one entity.
///
/// The container consults this list to know which processors to dispatch to
/// for a given entity. Removal swaps the entry with the last element and
/// shrinks, so removal is O(1) after the scan and the relative order of the
/// remaining entries is NOT preserved. Callers must not rely on order.
#[derive(Clone, Debug, Default)]
pub struct DispatchList {
    ids: Vec<ProcessorId>,
}

impl DispatchList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of processors claiming the entity.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no processor claims the entity.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Returns true if the processor claims the entity.
    #[must_use]
    pub fn contains(&self, id: ProcessorId) -> bool {
        self.ids.contains(&id)
    }

    /// Records that a processor claims the entity.
    pub fn push(&mut self, id: ProcessorId) {
        self.ids.push(id);
    }

    /// Removes a processor's claim by swapping with the last entry.
    ///
    /// Returns false if the processor was not in the list.
    pub fn swap_remove(&mut self, id: ProcessorId) -> bool {
        match self.ids.iter().position(|entry| *entry == id) {
            Some(position) => {
                self.ids.swap_remove(position);
                true
            }
            None => false,
        }
    }

    /// Iterates the claiming processors (unspecified order).
    pub fn iter(&self) -> impl Iterator<Item = ProcessorId> + '_ {
        self.ids.iter().copied()
    }
}
