//! Shared test tracker and evaluation harness.

use overseer_foundation::{ComponentKey, ComponentMap, EntityId, Error, Result, Value};
use overseer_processor::{CommandQueue, DispatchList, EvalContext, ProcessorId, Tracker};

pub const BODY: ComponentKey = ComponentKey::new("body");
pub const SHAPE: ComponentKey = ComponentKey::new("shape");

pub const SLOT: ProcessorId = ProcessorId::new(0);

/// Tracker that logs hook calls and can be told to fail.
#[derive(Default)]
pub struct CountingTracker {
    pub created: u32,
    pub added: Vec<EntityId>,
    pub removed: Vec<EntityId>,
    pub enabled_changes: Vec<(EntityId, bool)>,
    pub fail_create: bool,
    pub fail_removed: bool,
}

impl Tracker for CountingTracker {
    type Data = u32;

    fn name(&self) -> &'static str {
        "counting"
    }

    fn create_data(&mut self, entity: EntityId, _: &ComponentMap) -> Result<u32> {
        if self.fail_create {
            return Err(Error::associated_data(entity, "factory refused"));
        }
        self.created += 1;
        Ok(self.created)
    }

    fn on_added(&mut self, entity: EntityId, _: &mut u32, _: &mut CommandQueue) -> Result<()> {
        self.added.push(entity);
        Ok(())
    }

    fn on_removed(&mut self, entity: EntityId, _: &mut u32, _: &mut CommandQueue) -> Result<()> {
        if self.fail_removed {
            return Err(Error::associated_data(entity, "teardown refused"));
        }
        self.removed.push(entity);
        Ok(())
    }

    fn on_enabled_changed(&mut self, entity: EntityId, enabled: bool) {
        self.enabled_changes.push((entity, enabled));
    }
}

/// Owns the state the container would lend out for one evaluation.
pub struct Env {
    pub components: ComponentMap,
    pub dispatch: DispatchList,
    pub commands: CommandQueue,
    pub entity_enabled: bool,
}

impl Env {
    pub fn new(components: ComponentMap) -> Self {
        Self {
            components,
            dispatch: DispatchList::new(),
            commands: CommandQueue::new(),
            entity_enabled: true,
        }
    }

    pub fn ctx(&mut self) -> EvalContext<'_> {
        EvalContext {
            slot: SLOT,
            components: &self.components,
            entity_enabled: self.entity_enabled,
            dispatch: &mut self.dispatch,
            commands: &mut self.commands,
        }
    }
}

pub fn body_and_shape() -> ComponentMap {
    [(BODY, Value::Nil), (SHAPE, Value::Int(1))]
        .into_iter()
        .collect()
}

pub fn entity(index: u64) -> EntityId {
    EntityId::new(index, 1)
}
