//! Integration tests for Error types
//!
//! Tests error construction, display, context, and the cause chain on
//! re-add failures.

use std::error::Error as _;

use overseer_foundation::{ComponentKey, EntityId, Error, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_entity_not_found() {
    let err = Error::entity_not_found(EntityId::new(42, 1));
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(_)));
    assert!(format!("{err}").contains("42"));
}

#[test]
fn error_stale_entity() {
    let err = Error::stale_entity(EntityId::new(5, 2));
    assert!(matches!(err.kind, ErrorKind::StaleEntity(_)));
    assert!(format!("{err}").contains("stale"));
}

#[test]
fn error_unknown_entity_enable() {
    let err = Error::unknown_entity_enable(EntityId::new(1, 1));
    assert!(matches!(err.kind, ErrorKind::UnknownEntityEnable(_)));
}

#[test]
fn error_already_enabled() {
    let err = Error::already_enabled(EntityId::new(1, 1));
    assert!(matches!(err.kind, ErrorKind::AlreadyEnabled(_)));
}

#[test]
fn error_not_enabled() {
    let err = Error::not_enabled(EntityId::new(1, 1));
    assert!(matches!(err.kind, ErrorKind::NotEnabled(_)));
}

#[test]
fn error_associated_data_carries_message() {
    let err = Error::associated_data(EntityId::new(2, 1), "mesh upload failed");
    assert!(matches!(err.kind, ErrorKind::AssociatedData { .. }));
    assert!(format!("{err}").contains("mesh upload failed"));
}

#[test]
fn error_component_not_found_names_the_key() {
    let err = Error::component_not_found(EntityId::new(2, 1), ComponentKey::new("collider"));
    assert!(format!("{err}").contains("collider"));
}

// =============================================================================
// Context
// =============================================================================

#[test]
fn context_is_attached_without_changing_kind() {
    let err = Error::entity_not_found(EntityId::new(1, 1)).with_context("during despawn");
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(_)));
    assert_eq!(err.context.as_deref(), Some("during despawn"));
}

// =============================================================================
// Cause chain
// =============================================================================

#[test]
fn readd_failure_chains_its_cause() {
    let entity = EntityId::new(7, 1);
    let cause = Error::associated_data(entity, "rebuild refused");
    let err = Error::readd_failed(entity, cause);

    let ErrorKind::ReaddFailed { source, .. } = &err.kind else {
        panic!("expected ReaddFailed, got {err}");
    };
    assert!(matches!(source.kind, ErrorKind::AssociatedData { .. }));

    // The cause is reachable through std::error::Error::source.
    let chained = err.kind.source().expect("source should be set");
    assert!(chained.to_string().contains("rebuild refused"));
}
