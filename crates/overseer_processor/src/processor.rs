//! The non-generic processor contract.

use std::any::Any;

use overseer_foundation::{EntityId, Result, TickTime};

use crate::context::EvalContext;

/// Outcome of one membership evaluation.
///
/// The dropped-recursive-call case is an explicit value rather than a silent
/// success, so callers can decide whether to retry after the outer insertion
/// completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Evaluation {
    /// The entity entered the matching table.
    Added,
    /// The entity left the matching table.
    Removed,
    /// Membership did not change; no hooks ran.
    Unchanged,
    /// The entity's own insertion is already in progress; the call was
    /// dropped without side effects.
    InProgress,
}

/// Contract the container relies on for any processor, regardless of its
/// associated-data type.
///
/// The container owns processors as `Box<dyn Processor>` and dispatches
/// membership evaluation on every entity add/remove/component change, enable
/// transitions through each entity's dispatch list, and update/draw once per
/// tick when the advisory [`is_enabled`](Processor::is_enabled) flag is true.
pub trait Processor {
    /// Human-readable processor name, used for profiling keys and logs.
    fn name(&self) -> &str;

    /// Advisory processor-wide enabled flag.
    ///
    /// The container checks it before invoking [`update`](Processor::update)
    /// and [`draw`](Processor::draw); it has no effect on membership tables.
    fn is_enabled(&self) -> bool;

    /// Sets the advisory enabled flag.
    fn set_enabled(&mut self, enabled: bool);

    /// Called exactly once when this processor is registered.
    fn on_register(&mut self) {}

    /// Called exactly once when this processor is unregistered.
    fn on_unregister(&mut self) {}

    /// Enables or disables one tracked entity.
    ///
    /// # Errors
    ///
    /// Enabling an entity absent from the matching table fails with
    /// `UnknownEntityEnable`; enabling an already-enabled entity fails with
    /// `AlreadyEnabled`; disabling an entity absent from the enabled table
    /// fails with `NotEnabled`.
    fn set_entity_enabled(&mut self, entity: EntityId, enabled: bool) -> Result<()>;

    /// Re-evaluates whether the entity belongs to this processor.
    ///
    /// Invoked by the container whenever the entity is created, destroyed
    /// (`force_remove = true`) or has its component set mutated.
    ///
    /// # Errors
    ///
    /// Failures from the associated-data factory or the add/remove hooks
    /// propagate to the caller.
    fn evaluate(
        &mut self,
        entity: EntityId,
        ctx: EvalContext<'_>,
        force_remove: bool,
    ) -> Result<Evaluation>;

    /// Per-tick simulation work. Default no-op.
    fn update(&mut self, time: &TickTime) {
        let _ = time;
    }

    /// Per-tick render work. Default no-op.
    fn draw(&mut self, time: &TickTime) {
        let _ = time;
    }

    /// Upcast for downcasting to the concrete processor type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete processor type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
