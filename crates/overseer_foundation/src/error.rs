//! Error types for the Overseer system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use thiserror::Error;

use crate::component::ComponentKey;
use crate::entity::EntityId;

/// Convenience alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for Overseer operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional note about where the error occurred.
    pub context: Option<String>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Creates an entity-not-found error.
    #[must_use]
    pub fn entity_not_found(entity: EntityId) -> Self {
        Self::new(ErrorKind::EntityNotFound(entity))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(entity: EntityId) -> Self {
        Self::new(ErrorKind::StaleEntity(entity))
    }

    /// Creates an unknown-entity-enable error: the entity is not in the
    /// processor's matching table.
    #[must_use]
    pub fn unknown_entity_enable(entity: EntityId) -> Self {
        Self::new(ErrorKind::UnknownEntityEnable(entity))
    }

    /// Creates a duplicate-enable error: the entity is matching but already
    /// enabled.
    #[must_use]
    pub fn already_enabled(entity: EntityId) -> Self {
        Self::new(ErrorKind::AlreadyEnabled(entity))
    }

    /// Creates an invalid-enabled-state error: the entity is not in the
    /// processor's enabled table.
    #[must_use]
    pub fn not_enabled(entity: EntityId) -> Self {
        Self::new(ErrorKind::NotEnabled(entity))
    }

    /// Creates an associated-data construction error.
    #[must_use]
    pub fn associated_data(entity: EntityId, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::AssociatedData {
            entity,
            message: message.into(),
        })
    }

    /// Creates a re-add failure carrying the original cause.
    #[must_use]
    pub fn readd_failed(entity: EntityId, source: Error) -> Self {
        Self::new(ErrorKind::ReaddFailed {
            entity,
            source: Box::new(source),
        })
    }

    /// Creates a component-not-found error.
    #[must_use]
    pub fn component_not_found(entity: EntityId, key: ComponentKey) -> Self {
        Self::new(ErrorKind::ComponentNotFound { entity, key })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Entity is not known to the container.
    #[error("entity not found: {0:?}")]
    EntityNotFound(EntityId),

    /// Entity reference is stale (its slot was retired or reused).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(EntityId),

    /// Tried to enable an entity the processor is not tracking.
    #[error("tried to enable unknown entity {0:?}")]
    UnknownEntityEnable(EntityId),

    /// Tried to enable an entity that is already enabled.
    #[error("entity {0:?} is already enabled")]
    AlreadyEnabled(EntityId),

    /// Tried to disable an entity that is not enabled.
    #[error("invalid enabled state for entity {0:?}")]
    NotEnabled(EntityId),

    /// Associated-data factory failed during an enter transition.
    #[error("associated data construction failed for {entity:?}: {message}")]
    AssociatedData {
        /// The entity being added.
        entity: EntityId,
        /// What went wrong in the factory.
        message: String,
    },

    /// A re-add hook failed; the entity was evicted from both tables.
    ///
    /// The failure that triggered the eviction is preserved as the source.
    #[error("entity re-add failed for {entity:?}")]
    ReaddFailed {
        /// The entity that was being re-added.
        entity: EntityId,
        /// The hook failure that caused the eviction.
        #[source]
        source: Box<Error>,
    },

    /// Component not present on the entity.
    #[error("component {key} not found on {entity:?}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: EntityId,
        /// The missing component kind.
        key: ComponentKey,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}
