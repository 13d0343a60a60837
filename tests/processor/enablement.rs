//! Integration tests for per-entity enable/disable
//!
//! Tests the enabled-table guards and the reuse of existing associated data
//! across disable/enable cycles.

use overseer_foundation::ErrorKind;
use overseer_processor::{Processor, TrackingProcessor};

use crate::harness::{BODY, CountingTracker, Env, SHAPE, body_and_shape, entity};

fn tracked() -> (TrackingProcessor<CountingTracker>, Env) {
    let mut p = TrackingProcessor::new(CountingTracker::default(), [BODY, SHAPE]);
    let mut env = Env::new(body_and_shape());
    p.evaluate(entity(1), env.ctx(), false).unwrap();
    (p, env)
}

#[test]
fn disable_then_enable_round_trips() {
    let (mut p, _env) = tracked();
    let e = entity(1);

    p.set_entity_enabled(e, false).unwrap();
    assert!(p.tables().contains(e));
    assert!(!p.tables().is_enabled(e));

    p.set_entity_enabled(e, true).unwrap();
    assert!(p.tables().is_enabled(e));

    // The data survived the cycle; the factory never re-ran.
    assert_eq!(p.tables().get(e), Some(&1));
    assert_eq!(p.tracker().created, 1);
    assert_eq!(p.tracker().enabled_changes, vec![(e, false), (e, true)]);
}

#[test]
fn enabling_an_untracked_entity_is_unknown_entity_enable() {
    let (mut p, _env) = tracked();

    let err = p.set_entity_enabled(entity(9), true).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::UnknownEntityEnable(_)));
}

#[test]
fn enabling_twice_is_duplicate_enable() {
    let (mut p, _env) = tracked();

    // Tracked AND already enabled: distinct from the unknown-entity case.
    let err = p.set_entity_enabled(entity(1), true).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::AlreadyEnabled(_)));
}

#[test]
fn disabling_a_disabled_entity_is_invalid_state() {
    let (mut p, _env) = tracked();
    let e = entity(1);
    p.set_entity_enabled(e, false).unwrap();

    let err = p.set_entity_enabled(e, false).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotEnabled(_)));
}

#[test]
fn failed_transitions_do_not_fire_the_change_hook() {
    let (mut p, _env) = tracked();

    let _ = p.set_entity_enabled(entity(9), true);
    let _ = p.set_entity_enabled(entity(1), true);

    assert!(p.tracker().enabled_changes.is_empty());
}

#[test]
fn entity_entering_while_disabled_skips_the_enabled_table() {
    let mut p = TrackingProcessor::new(CountingTracker::default(), [BODY, SHAPE]);
    let mut env = Env::new(body_and_shape());
    env.entity_enabled = false;

    p.evaluate(entity(1), env.ctx(), false).unwrap();

    assert!(p.tables().contains(entity(1)));
    assert!(!p.tables().is_enabled(entity(1)));

    // It can be enabled explicitly afterwards.
    p.set_entity_enabled(entity(1), true).unwrap();
    assert!(p.tables().is_enabled(entity(1)));
}
