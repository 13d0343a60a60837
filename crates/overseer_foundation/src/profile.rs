//! Lightweight scoped instrumentation.
//!
//! The container builds one update and one draw [`ProfilingKey`] per
//! registered processor and wraps the corresponding calls in a
//! [`ProfileScope`]. Timings are reported through the `log` facade; with no
//! logger installed this is close to free.

use std::time::Instant;

/// Identifies one profiled scope, e.g. `update/physics`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProfilingKey {
    scope: &'static str,
    name: String,
}

impl ProfilingKey {
    /// Creates a key from a scope kind and an instance name.
    #[must_use]
    pub fn new(scope: &'static str, name: impl Into<String>) -> Self {
        Self {
            scope,
            name: name.into(),
        }
    }

    /// The scope kind (e.g. `"update"` or `"draw"`).
    #[must_use]
    pub fn scope(&self) -> &'static str {
        self.scope
    }

    /// The instance name (usually the processor name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Times a region and logs the elapsed duration when dropped.
#[must_use = "a profile scope measures until it is dropped"]
pub struct ProfileScope<'a> {
    key: &'a ProfilingKey,
    started: Instant,
}

impl<'a> ProfileScope<'a> {
    /// Starts timing the given key.
    pub fn enter(key: &'a ProfilingKey) -> Self {
        Self {
            key,
            started: Instant::now(),
        }
    }
}

impl Drop for ProfileScope<'_> {
    fn drop(&mut self) {
        log::trace!(
            target: "overseer::profile",
            "{}/{}: {:?}",
            self.key.scope(),
            self.key.name(),
            self.started.elapsed()
        );
    }
}
