//! The typed membership-tracking processor.
//!
//! [`TrackingProcessor`] watches the entity population for a fixed required
//! component signature and keeps one piece of associated data per matching
//! entity, created by the [`Tracker`] factory when the entity enters and
//! dropped when it leaves.

use std::collections::HashSet;

use parking_lot::Mutex;
use overseer_foundation::{ComponentKey, ComponentMap, EntityId, Error, Result, TickTime};

use crate::context::{CommandQueue, EvalContext};
use crate::processor::{Evaluation, Processor};
use crate::tables::EntityTables;

/// The per-domain surface of a [`TrackingProcessor`]: the associated-data
/// factory plus the lifecycle hooks.
///
/// Implementations build caches, render batches, physics bodies and the like
/// in [`create_data`](Tracker::create_data)/[`on_added`](Tracker::on_added)
/// and tear them down in [`on_removed`](Tracker::on_removed).
pub trait Tracker {
    /// Associated data kept for each matching entity.
    type Data;

    /// Human-readable name, used for profiling keys and logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Decides whether an entity belongs to this processor.
    ///
    /// Pure predicate, no side effects. The default requires every key in
    /// `required` to be present on the entity.
    fn matches(
        &self,
        entity: EntityId,
        components: &ComponentMap,
        required: &[ComponentKey],
    ) -> bool {
        let _ = entity;
        required.iter().all(|key| components.contains(*key))
    }

    /// Builds the associated data for an entity that started matching.
    ///
    /// Invoked exactly once per matching cycle, before
    /// [`on_added`](Tracker::on_added).
    ///
    /// # Errors
    ///
    /// A failure aborts the enter transition and propagates to the caller;
    /// no table is mutated and the entity can be re-evaluated later.
    fn create_data(&mut self, entity: EntityId, components: &ComponentMap) -> Result<Self::Data>;

    /// Runs once the data exists, before the entity is published to the
    /// matching table. Default no-op.
    ///
    /// # Errors
    ///
    /// A failure aborts the enter transition and propagates to the caller;
    /// the dispatch claim taken during the transition is rolled back.
    fn on_added(
        &mut self,
        entity: EntityId,
        data: &mut Self::Data,
        cmds: &mut CommandQueue,
    ) -> Result<()> {
        let _ = (entity, data, cmds);
        Ok(())
    }

    /// Runs once, before the entity is erased from both tables. Default
    /// no-op.
    ///
    /// # Errors
    ///
    /// A failure aborts the leave transition and propagates to the caller.
    fn on_removed(
        &mut self,
        entity: EntityId,
        data: &mut Self::Data,
        cmds: &mut CommandQueue,
    ) -> Result<()> {
        let _ = (entity, data, cmds);
        Ok(())
    }

    /// Runs after an enabled/disabled table update completes. Default no-op.
    fn on_enabled_changed(&mut self, entity: EntityId, enabled: bool) {
        let _ = (entity, enabled);
    }

    /// Runs when the processor is registered with the container. Default
    /// no-op; use for processor-wide resources.
    fn on_register(&mut self) {}

    /// Runs when the processor is unregistered. Default no-op.
    fn on_unregister(&mut self) {}

    /// Per-tick simulation work over the tracked entities. Default no-op.
    fn update(&mut self, time: &TickTime, entities: &mut EntityTables<Self::Data>) {
        let _ = (time, entities);
    }

    /// Per-tick render work over the tracked entities. Default no-op.
    fn draw(&mut self, time: &TickTime, entities: &EntityTables<Self::Data>) {
        let _ = (time, entities);
    }
}

/// Clears the in-flight marker when the enter transition ends, on every exit
/// path including factory and hook failure.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<EntityId>>,
    entity: EntityId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.entity);
    }
}

/// Membership state machine generic over a [`Tracker`].
///
/// Owns the matching/enabled tables and the in-flight set. All table access
/// goes through `&mut self` and is single-thread-only by contract; the
/// in-flight set alone sits behind a mutex because the membership contract
/// requires an atomic test-and-insert even when component mutation cascades
/// re-evaluation from a nested call stack.
pub struct TrackingProcessor<K: Tracker> {
    tracker: K,
    required: Vec<ComponentKey>,
    tables: EntityTables<K::Data>,
    in_flight: Mutex<HashSet<EntityId>>,
    enabled: bool,
}

impl<K: Tracker> TrackingProcessor<K> {
    /// Creates a processor requiring the given component keys.
    ///
    /// The required-key set is fixed for the processor's lifetime.
    #[must_use]
    pub fn new(tracker: K, required: impl Into<Vec<ComponentKey>>) -> Self {
        Self {
            tracker,
            required: required.into(),
            tables: EntityTables::new(),
            in_flight: Mutex::new(HashSet::new()),
            enabled: true,
        }
    }

    /// The component keys an entity needs to match.
    #[must_use]
    pub fn required_keys(&self) -> &[ComponentKey] {
        &self.required
    }

    /// The tracker driving this processor.
    #[must_use]
    pub fn tracker(&self) -> &K {
        &self.tracker
    }

    /// The tracker, mutably.
    pub fn tracker_mut(&mut self) -> &mut K {
        &mut self.tracker
    }

    /// The matching/enabled tables.
    #[must_use]
    pub fn tables(&self) -> &EntityTables<K::Data> {
        &self.tables
    }

    /// Re-runs the add/remove hooks for an entity whose component values
    /// changed in place, without touching table membership.
    ///
    /// A no-op if the entity is not matching.
    ///
    /// # Errors
    ///
    /// If either hook fails, the entity is evicted from both tables and a
    /// `ReaddFailed` error is returned carrying the hook failure as its
    /// source.
    pub fn readd(&mut self, entity: EntityId, cmds: &mut CommandQueue) -> Result<()> {
        let Some(data) = self.tables.get_mut(entity) else {
            return Ok(());
        };

        let outcome = match self.tracker.on_removed(entity, data, cmds) {
            Ok(()) => self.tracker.on_added(entity, data, cmds),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(source) => {
                self.tables.remove(entity);
                Err(Error::readd_failed(entity, source))
            }
        }
    }

    #[cfg(test)]
    fn in_flight_contains(&self, entity: EntityId) -> bool {
        self.in_flight.lock().contains(&entity)
    }

    #[cfg(test)]
    fn mark_in_flight(&self, entity: EntityId) {
        self.in_flight.lock().insert(entity);
    }

    #[cfg(test)]
    fn clear_in_flight(&self, entity: EntityId) {
        self.in_flight.lock().remove(&entity);
    }
}

impl<K> Processor for TrackingProcessor<K>
where
    K: Tracker + 'static,
    K::Data: 'static,
{
    fn name(&self) -> &str {
        self.tracker.name()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn on_register(&mut self) {
        self.tracker.on_register();
    }

    fn on_unregister(&mut self) {
        self.tracker.on_unregister();
    }

    fn set_entity_enabled(&mut self, entity: EntityId, enabled: bool) -> Result<()> {
        if enabled {
            if !self.tables.contains(entity) {
                return Err(Error::unknown_entity_enable(entity));
            }
            if !self.tables.enable(entity) {
                return Err(Error::already_enabled(entity));
            }
        } else if !self.tables.disable(entity) {
            return Err(Error::not_enabled(entity));
        }

        self.tracker.on_enabled_changed(entity, enabled);
        Ok(())
    }

    fn evaluate(
        &mut self,
        entity: EntityId,
        ctx: EvalContext<'_>,
        force_remove: bool,
    ) -> Result<Evaluation> {
        let matched =
            !force_remove && self.tracker.matches(entity, ctx.components, &self.required);
        let present = self.tables.contains(entity);

        if matched && !present {
            // Entering is not reentrant: the factory or add hook may mutate
            // components and cascade a nested evaluation for this entity.
            // Such a call is dropped, not queued.
            {
                let mut in_flight = self.in_flight.lock();
                if !in_flight.insert(entity) {
                    return Ok(Evaluation::InProgress);
                }
            }
            let _guard = InFlightGuard {
                in_flight: &self.in_flight,
                entity,
            };

            let mut data = self.tracker.create_data(entity, ctx.components)?;
            ctx.dispatch.push(ctx.slot);
            if let Err(err) = self.tracker.on_added(entity, &mut data, ctx.commands) {
                // Roll the claim back so the registry never names a
                // processor whose matching table lacks the entity.
                ctx.dispatch.swap_remove(ctx.slot);
                return Err(err);
            }
            self.tables.insert(entity, data);

            if ctx.entity_enabled {
                self.tables.enable(entity);
            }

            Ok(Evaluation::Added)
        } else if present && !matched {
            let data = self
                .tables
                .get_mut(entity)
                .ok_or_else(|| Error::internal("matching table entry vanished"))?;
            self.tracker.on_removed(entity, data, ctx.commands)?;

            ctx.dispatch.swap_remove(ctx.slot);
            self.tables.remove(entity);

            Ok(Evaluation::Removed)
        } else {
            Ok(Evaluation::Unchanged)
        }
    }

    fn update(&mut self, time: &TickTime) {
        self.tracker.update(time, &mut self.tables);
    }

    fn draw(&mut self, time: &TickTime) {
        self.tracker.draw(time, &self.tables);
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
        self
    }
}
