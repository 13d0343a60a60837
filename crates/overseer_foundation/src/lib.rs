//! Core types for the Overseer entity-processor system.
//!
//! This crate provides:
//! - [`EntityId`] - Generational entity identifiers
//! - [`ComponentKey`] / [`ComponentMap`] / [`Value`] - Per-entity component data
//! - [`Error`] - Rich error types with context
//! - [`TickTime`] - Simulation clock passed to update/draw hooks
//! - [`ProfilingKey`] / [`ProfileScope`] - Lightweight scoped instrumentation

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod component;
mod entity;
mod error;
mod profile;
mod time;

pub use component::{ComponentKey, ComponentMap, Value};
pub use entity::EntityId;
pub use error::{Error, ErrorKind, Result};
pub use profile::{ProfileScope, ProfilingKey};
pub use time::TickTime;
