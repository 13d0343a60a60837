//! Overseer - Entity processors over an ECS container
//!
//! This crate re-exports all layers of the Overseer system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: overseer_system     — Entity container, processor registry, frame loop
//! Layer 1: overseer_processor  — Membership tracking, associated-data tables, dispatch
//! Layer 0: overseer_foundation — Core types (EntityId, ComponentKey, Error)
//! ```

pub use overseer_foundation as foundation;
pub use overseer_processor as processor;
pub use overseer_system as system;
