use crate::metrics::backend::{KillOutcome, MetricsBackend};

/// Metrics backend that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl MetricsBackend for NoOpMetrics {
    #[inline(always)]
    fn record_admission(&self, _: bool) {}

    #[inline(always)]
    fn record_evictions(&self, _: u64) {}

    #[inline(always)]
    fn record_kill(&self, _: &str, _: KillOutcome) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_metrics_is_zero_size() {
        assert_eq!(std::mem::size_of::<NoOpMetrics>(), 0);
    }

    #[test]
    fn outcome_labels_are_distinct() {
        let labels = [
            KillOutcome::NoRemoteId,
            KillOutcome::Issued,
            KillOutcome::AlreadyGone,
            KillOutcome::Inconclusive,
            KillOutcome::Failed,
        ]
        .map(|o| o.as_label());
        let mut dedup = labels.to_vec();
        dedup.sort();
        dedup.dedup();
        assert_eq!(dedup.len(), labels.len());
    }
}
