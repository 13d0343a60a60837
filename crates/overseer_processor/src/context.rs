//! The container's per-evaluation loan to a processor.

use overseer_foundation::{ComponentMap, EntityId};

use crate::dispatch::{DispatchList, ProcessorId};

/// A deferred request to the container.
///
/// Hooks run while the container is mid-dispatch and cannot borrow it
/// mutably, so cascading entity work (e.g. removing related entities when a
/// tracked entity leaves) is queued and drained by the container after the
/// evaluation pass.
#[derive(Clone, Debug)]
pub enum SystemCommand {
    /// Spawn a new entity with the given components.
    Spawn(ComponentMap),
    /// Remove an entity from the container.
    Remove(EntityId),
}

/// Queue of [`SystemCommand`]s produced by hooks during dispatch.
#[derive(Debug, Default)]
pub struct CommandQueue {
    commands: Vec<SystemCommand>,
}

impl CommandQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a spawn request.
    pub fn spawn(&mut self, components: ComponentMap) {
        self.commands.push(SystemCommand::Spawn(components));
    }

    /// Queues a removal request.
    pub fn remove(&mut self, entity: EntityId) {
        self.commands.push(SystemCommand::Remove(entity));
    }

    /// Returns the number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drains all queued commands in FIFO order.
    pub fn drain(&mut self) -> impl Iterator<Item = SystemCommand> + '_ {
        self.commands.drain(..)
    }
}

/// What a processor may see and touch during one membership evaluation.
///
/// Borrowed from the container for the duration of a single
/// [`Processor::evaluate`](crate::Processor::evaluate) call.
pub struct EvalContext<'a> {
    /// The evaluating processor's own slot id.
    pub slot: ProcessorId,
    /// The entity's component map, read-only.
    pub components: &'a ComponentMap,
    /// Whether the container currently reports the entity enabled.
    pub entity_enabled: bool,
    /// The entity's dispatch registry; the processor adds/removes itself.
    pub dispatch: &'a mut DispatchList,
    /// Deferred container requests.
    pub commands: &'a mut CommandQueue,
}
