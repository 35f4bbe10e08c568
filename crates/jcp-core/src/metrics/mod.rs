//! Metrics collection abstraction for the control plane.
//!
//! Backends (prometheus, etc.) implement [`MetricsBackend`] and are injected
//! as a [`MetricsHandle`] into the throttle map and the job killer.
mod backend;
pub use backend::{KillOutcome, MetricsBackend, MetricsHandle};

mod noop;
pub use noop::NoOpMetrics;

use std::sync::Arc;

/// Create a no-op metrics handle.
#[inline]
pub fn noop_metrics() -> MetricsHandle {
    Arc::new(NoOpMetrics)
}
