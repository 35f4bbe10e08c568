use std::sync::Arc;

use prometheus::{IntCounter, IntCounterVec, Opts, Registry, proto::MetricFamily};

use jcp_core::{KillOutcome, MetricsBackend};

const NAMESPACE: &str = "jcp";

/// Prometheus implementation of [`MetricsBackend`].
///
/// ## Metrics
/// - `jcp_admissions_total{result}`: throttle decisions, `result` is `admitted` or `rejected`
/// - `jcp_throttle_evictions_total`: idle throttle keys removed by the cleaner
/// - `jcp_kills_total{scheduler, outcome}`: kill attempts
///
/// Labels are bounded. Throttle keys are never used as labels.
#[derive(Clone)]
pub struct PrometheusMetrics {
    admissions: IntCounterVec,
    evictions: IntCounter,
    kills: IntCounterVec,
    registry: Arc<Registry>,
}

impl PrometheusMetrics {
    /// Register the control-plane metrics on `registry`.
    pub fn new_with_registry(registry: Arc<Registry>) -> Result<Self, prometheus::Error> {
        let admissions = IntCounterVec::new(
            Opts::new("admissions_total", "Job submissions checked against the throttle")
                .namespace(NAMESPACE),
            &["result"],
        )?;
        registry.register(Box::new(admissions.clone()))?;

        let evictions = IntCounter::with_opts(
            Opts::new("throttle_evictions_total", "Idle throttle keys evicted by the cleaner")
                .namespace(NAMESPACE),
        )?;
        registry.register(Box::new(evictions.clone()))?;

        let kills = IntCounterVec::new(
            Opts::new("kills_total", "Remote job kill attempts").namespace(NAMESPACE),
            &["scheduler", "outcome"],
        )?;
        registry.register(Box::new(kills.clone()))?;

        Ok(Self {
            admissions,
            evictions,
            kills,
            registry,
        })
    }

    /// Backend on a fresh private registry.
    pub fn new() -> Result<Self, prometheus::Error> {
        Self::new_with_registry(Arc::new(Registry::new()))
    }

    /// Snapshot of every registered family, ready for a text encoder.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl MetricsBackend for PrometheusMetrics {
    fn record_admission(&self, admitted: bool) {
        let result = if admitted { "admitted" } else { "rejected" };
        self.admissions.with_label_values(&[result]).inc();
    }

    fn record_evictions(&self, count: u64) {
        self.evictions.inc_by(count);
    }

    fn record_kill(&self, scheduler: &str, outcome: KillOutcome) {
        self.kills
            .with_label_values(&[scheduler, outcome.as_label()])
            .inc();
    }
}
