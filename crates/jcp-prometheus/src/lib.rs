//! Prometheus backend for control-plane metrics.
mod backend;
pub use backend::PrometheusMetrics;
