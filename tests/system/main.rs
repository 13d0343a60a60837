//! Integration tests for Layer 2: System
//!
//! Tests the entity container: lifecycle, processor registry, and the
//! frame loop.
