//! Membership-tracking entity processors for Overseer.
//!
//! This crate provides:
//! - [`Processor`] - The non-generic contract the container dispatches to
//! - [`Tracker`] / [`TrackingProcessor`] - The typed membership state machine
//! - [`EntityTables`] - Matching table plus enabled subset
//! - [`DispatchList`] - Per-entity registry of claiming processors
//! - [`EvalContext`] / [`CommandQueue`] - The container's per-evaluation loan

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod context;
mod dispatch;
mod processor;
mod tables;
mod tracking;

pub use context::{CommandQueue, EvalContext, SystemCommand};
pub use dispatch::{DispatchList, ProcessorId};
pub use processor::{Evaluation, Processor};
pub use tables::EntityTables;
pub use tracking::{Tracker, TrackingProcessor};
