//! The entity/component container.
//!
//! `EntitySystem` owns the master entity list and the per-entity component
//! maps, and re-evaluates processor membership whenever an entity is created,
//! destroyed, or has its component set mutated. It also drives the per-tick
//! update/draw calls and the per-entity enable/disable transitions.

use std::collections::HashMap;

use overseer_foundation::{
    ComponentKey, ComponentMap, EntityId, Error, ProfileScope, ProfilingKey, Result, TickTime,
    Value,
};
use overseer_processor::{
    CommandQueue, EvalContext, Processor, ProcessorId, SystemCommand, Tracker, TrackingProcessor,
};

/// Per-entity state owned by the container.
#[derive(Debug, Default)]
struct EntityRecord {
    /// The entity's components, the only thing processors read.
    components: ComponentMap,
    /// Processors currently claiming this entity.
    dispatch: overseer_processor::DispatchList,
    /// Container-level enabled flag; entities start enabled.
    enabled: bool,
}

/// A registered processor with its profiling keys.
struct ProcessorSlot {
    processor: Box<dyn Processor>,
    update_key: ProfilingKey,
    draw_key: ProfilingKey,
}

/// The container: entity population, component storage, processor registry.
///
/// Single-thread-only: all access is serialized through `&mut self`. The
/// only internally locked state is each tracking processor's in-flight set.
#[derive(Default)]
pub struct EntitySystem {
    records: HashMap<EntityId, EntityRecord>,
    /// Index that has never been handed out.
    next_index: u64,
    /// Ids whose slots were retired; reuse bumps the generation.
    retired: Vec<EntityId>,
    /// Slot ids are stable: unregistering leaves a tombstone.
    processors: Vec<Option<ProcessorSlot>>,
    /// Deferred requests queued by hooks, drained after every pass.
    pending: CommandQueue,
}

impl EntitySystem {
    /// Creates an empty system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Entity lifecycle ---

    /// Spawns an entity with the given components and evaluates it against
    /// every registered processor. Entities start enabled.
    ///
    /// # Errors
    ///
    /// Propagates factory/hook failures from membership evaluation.
    pub fn spawn(&mut self, components: ComponentMap) -> Result<EntityId> {
        let entity = self.spawn_inner(components)?;
        self.flush()?;
        Ok(entity)
    }

    /// Destroys an entity, force-removing it from every processor first.
    ///
    /// # Errors
    ///
    /// Fails if the entity is unknown or stale; propagates hook failures.
    pub fn despawn(&mut self, entity: EntityId) -> Result<()> {
        self.despawn_inner(entity)?;
        self.flush()
    }

    /// Returns true if the entity is live.
    #[must_use]
    pub fn exists(&self, entity: EntityId) -> bool {
        self.records.contains_key(&entity)
    }

    /// Number of live entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no entity is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates all live entity ids (unspecified order).
    pub fn entities(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.records.keys().copied()
    }

    /// Validates that an entity is live.
    ///
    /// # Errors
    ///
    /// `StaleEntity` if the id's slot was retired or reused, `EntityNotFound`
    /// if the id was never handed out.
    pub fn validate(&self, entity: EntityId) -> Result<()> {
        if self.records.contains_key(&entity) {
            Ok(())
        } else if entity.index < self.next_index {
            Err(Error::stale_entity(entity))
        } else {
            Err(Error::entity_not_found(entity))
        }
    }

    // --- Components ---

    /// Sets a component on an entity and re-evaluates its membership.
    ///
    /// Returns the previous value if the component was already present.
    ///
    /// # Errors
    ///
    /// Fails if the entity is unknown or stale; propagates hook failures.
    pub fn set_component(
        &mut self,
        entity: EntityId,
        key: ComponentKey,
        value: Value,
    ) -> Result<Option<Value>> {
        self.validate(entity)?;
        let record = self
            .records
            .get_mut(&entity)
            .ok_or_else(|| Error::entity_not_found(entity))?;
        let previous = record.components.insert(key, value);

        self.evaluate_entity(entity, false)?;
        self.flush()?;
        Ok(previous)
    }

    /// Removes a component from an entity and re-evaluates its membership.
    ///
    /// # Errors
    ///
    /// `ComponentNotFound` if the component is absent; propagates hook
    /// failures from re-evaluation.
    pub fn remove_component(&mut self, entity: EntityId, key: ComponentKey) -> Result<Value> {
        self.validate(entity)?;
        let record = self
            .records
            .get_mut(&entity)
            .ok_or_else(|| Error::entity_not_found(entity))?;
        let value = record
            .components
            .remove(key)
            .ok_or_else(|| Error::component_not_found(entity, key))?;

        self.evaluate_entity(entity, false)?;
        self.flush()?;
        Ok(value)
    }

    /// Gets a component value.
    #[must_use]
    pub fn component(&self, entity: EntityId, key: ComponentKey) -> Option<&Value> {
        self.records.get(&entity)?.components.get(key)
    }

    /// Gets an entity's component map.
    #[must_use]
    pub fn components(&self, entity: EntityId) -> Option<&ComponentMap> {
        self.records.get(&entity).map(|record| &record.components)
    }

    // --- Enable / disable ---

    /// Returns the container-level enabled flag for an entity.
    ///
    /// Queried by processors during enter transitions to decide whether the
    /// entity also lands in their enabled table.
    #[must_use]
    pub fn is_enabled(&self, entity: EntityId) -> bool {
        self.records
            .get(&entity)
            .is_some_and(|record| record.enabled)
    }

    /// Toggles the per-entity enabled flag and forwards the transition to
    /// every processor currently claiming the entity.
    ///
    /// A no-change toggle is a no-op; the strict duplicate-enable error only
    /// arises when driving a processor directly.
    ///
    /// # Errors
    ///
    /// Fails if the entity is unknown or stale, or if a claiming processor
    /// rejects the transition.
    pub fn set_enabled(&mut self, entity: EntityId, enabled: bool) -> Result<()> {
        self.validate(entity)?;
        let record = self
            .records
            .get_mut(&entity)
            .ok_or_else(|| Error::entity_not_found(entity))?;
        if record.enabled == enabled {
            return Ok(());
        }
        record.enabled = enabled;

        let claims: Vec<ProcessorId> = record.dispatch.iter().collect();
        for id in claims {
            if let Some(slot) = self.processors.get_mut(id.index()).and_then(Option::as_mut) {
                slot.processor.set_entity_enabled(entity, enabled)?;
            }
        }
        Ok(())
    }

    // --- Processor registry ---

    /// Registers a processor, fires its `on_register` hook exactly once, and
    /// evaluates every live entity against it.
    ///
    /// The returned slot id stays valid for the container's lifetime.
    ///
    /// # Errors
    ///
    /// Propagates factory/hook failures from the initial population scan.
    pub fn register_processor(&mut self, mut processor: Box<dyn Processor>) -> Result<ProcessorId> {
        let id = ProcessorId::new(self.processors.len());
        processor.on_register();
        log::debug!(target: "overseer::system", "registered processor {} as {id:?}", processor.name());

        let slot = ProcessorSlot {
            update_key: ProfilingKey::new("update", processor.name()),
            draw_key: ProfilingKey::new("draw", processor.name()),
            processor,
        };
        self.processors.push(Some(slot));

        let entities: Vec<EntityId> = self.records.keys().copied().collect();
        for entity in entities {
            self.evaluate_one(id, entity, false)?;
        }
        self.flush()?;
        Ok(id)
    }

    /// Unregisters a processor: force-removes every live entity from it,
    /// then fires its `on_unregister` hook exactly once.
    ///
    /// # Errors
    ///
    /// Fails if the slot is empty; propagates hook failures.
    pub fn unregister_processor(&mut self, id: ProcessorId) -> Result<()> {
        if self
            .processors
            .get(id.index())
            .is_none_or(|slot| slot.is_none())
        {
            return Err(Error::internal(format!("no processor in slot {id:?}")));
        }

        let entities: Vec<EntityId> = self.records.keys().copied().collect();
        for entity in entities {
            self.evaluate_one(id, entity, true)?;
        }

        let mut slot = self.processors[id.index()]
            .take()
            .ok_or_else(|| Error::internal(format!("no processor in slot {id:?}")))?;
        slot.processor.on_unregister();
        log::debug!(target: "overseer::system", "unregistered processor {} from {id:?}", slot.processor.name());

        self.flush()
    }

    /// Number of registered processors.
    #[must_use]
    pub fn processor_count(&self) -> usize {
        self.processors.iter().flatten().count()
    }

    /// Borrows a registered processor.
    #[must_use]
    pub fn processor(&self, id: ProcessorId) -> Option<&dyn Processor> {
        self.processors
            .get(id.index())?
            .as_ref()
            .map(|slot| &*slot.processor)
    }

    /// Borrows a registered processor, mutably.
    pub fn processor_mut(&mut self, id: ProcessorId) -> Option<&mut (dyn Processor + 'static)> {
        self.processors
            .get_mut(id.index())?
            .as_mut()
            .map(|slot| &mut *slot.processor)
    }

    /// Re-runs the add/remove hooks of one tracking processor for an entity
    /// whose component values changed in place, without a membership change.
    ///
    /// # Errors
    ///
    /// `ReaddFailed` (entity evicted from the processor's tables) if a hook
    /// fails; an internal error if the slot is empty or holds a different
    /// processor type.
    pub fn readd_entity<K>(&mut self, id: ProcessorId, entity: EntityId) -> Result<()>
    where
        K: Tracker + 'static,
        K::Data: 'static,
    {
        self.validate(entity)?;
        let Some(slot) = self.processors.get_mut(id.index()).and_then(Option::as_mut) else {
            return Err(Error::internal(format!("no processor in slot {id:?}")));
        };
        let Some(processor) = slot
            .processor
            .as_any_mut()
            .downcast_mut::<TrackingProcessor<K>>()
        else {
            return Err(Error::internal(format!(
                "processor in slot {id:?} has a different type"
            )));
        };

        let result = processor.readd(entity, &mut self.pending);
        self.flush()?;
        result
    }

    // --- Frame loop ---

    /// Runs one simulation tick over every enabled processor.
    pub fn update(&mut self, time: &TickTime) {
        for slot in self.processors.iter_mut().flatten() {
            if slot.processor.is_enabled() {
                let _scope = ProfileScope::enter(&slot.update_key);
                slot.processor.update(time);
            }
        }
    }

    /// Runs one render tick over every enabled processor.
    pub fn draw(&mut self, time: &TickTime) {
        for slot in self.processors.iter_mut().flatten() {
            if slot.processor.is_enabled() {
                let _scope = ProfileScope::enter(&slot.draw_key);
                slot.processor.draw(time);
            }
        }
    }

    // --- Internals ---

    fn allocate(&mut self) -> EntityId {
        if let Some(retired) = self.retired.pop() {
            EntityId::new(retired.index, retired.generation + 1)
        } else {
            let entity = EntityId::new(self.next_index, 1);
            self.next_index += 1;
            entity
        }
    }

    fn spawn_inner(&mut self, components: ComponentMap) -> Result<EntityId> {
        let entity = self.allocate();
        self.records.insert(
            entity,
            EntityRecord {
                components,
                dispatch: overseer_processor::DispatchList::new(),
                enabled: true,
            },
        );
        if let Err(err) = self.evaluate_entity(entity, false) {
            // The caller never sees the id, so the entity must not stay
            // live. Processors that adopted it before the failure are
            // force-evaluated first; their teardown errors are secondary.
            let _ = self.evaluate_entity(entity, true);
            self.records.remove(&entity);
            self.retired.push(entity);
            return Err(err);
        }
        Ok(entity)
    }

    fn despawn_inner(&mut self, entity: EntityId) -> Result<()> {
        self.validate(entity)?;
        self.evaluate_entity(entity, true)?;
        self.records.remove(&entity);
        self.retired.push(entity);
        Ok(())
    }

    /// Evaluates one entity against every registered processor.
    fn evaluate_entity(&mut self, entity: EntityId, force_remove: bool) -> Result<()> {
        for index in 0..self.processors.len() {
            self.evaluate_one(ProcessorId::new(index), entity, force_remove)?;
        }
        Ok(())
    }

    /// Evaluates one entity against one processor slot.
    fn evaluate_one(
        &mut self,
        id: ProcessorId,
        entity: EntityId,
        force_remove: bool,
    ) -> Result<()> {
        let Some(record) = self.records.get_mut(&entity) else {
            return Ok(());
        };
        let Some(slot) = self.processors.get_mut(id.index()).and_then(Option::as_mut) else {
            return Ok(());
        };

        let ctx = EvalContext {
            slot: id,
            components: &record.components,
            entity_enabled: record.enabled,
            dispatch: &mut record.dispatch,
            commands: &mut self.pending,
        };
        slot.processor.evaluate(entity, ctx, force_remove)?;
        Ok(())
    }

    /// Drains queued hook commands, including those queued transitively.
    fn flush(&mut self) -> Result<()> {
        while !self.pending.is_empty() {
            let commands: Vec<SystemCommand> = self.pending.drain().collect();
            for command in commands {
                match command {
                    SystemCommand::Spawn(components) => {
                        self.spawn_inner(components)?;
                    }
                    SystemCommand::Remove(entity) => {
                        // The entity may already be gone by the time the
                        // cascade runs.
                        if self.exists(entity) {
                            self.despawn_inner(entity)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
