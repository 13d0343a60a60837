//! Entity/component container and frame driver for Overseer.
//!
//! This crate provides:
//! - [`EntitySystem`] - Owns the entity population, per-entity component
//!   maps, the per-entity processor dispatch registries, and the registered
//!   processors; drives membership evaluation and the update/draw loop.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod system;

pub use system::EntitySystem;
