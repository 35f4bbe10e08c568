use std::sync::Arc;

/// Result of one best-effort kill attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillOutcome {
    /// No remote job id was recorded; nothing was sent.
    NoRemoteId,
    /// A kill command ran and produced output.
    Issued,
    /// The remote side reported the job as already gone.
    AlreadyGone,
    /// Commands ran but neither produced output.
    Inconclusive,
    /// Remote I/O failed; the job may be left running.
    Failed,
}

impl KillOutcome {
    /// Return label value for metrics.
    #[inline]
    pub fn as_label(&self) -> &'static str {
        match self {
            KillOutcome::NoRemoteId => "no_remote_id",
            KillOutcome::Issued => "issued",
            KillOutcome::AlreadyGone => "already_gone",
            KillOutcome::Inconclusive => "inconclusive",
            KillOutcome::Failed => "failed",
        }
    }
}

/// Backend metrics collection interface.
pub trait MetricsBackend: Send + Sync + 'static {
    /// Record one throttle decision.
    fn record_admission(&self, admitted: bool);
    /// Record idle throttle keys removed by one cleaner pass.
    fn record_evictions(&self, count: u64);
    /// Record the outcome of a kill attempt.
    ///
    /// # Arguments
    /// - `scheduler`: scheduler classification of the target system
    /// - `outcome`: how the attempt ended
    fn record_kill(&self, scheduler: &str, outcome: KillOutcome);
}

/// Shared handle to metrics backend.
pub type MetricsHandle = Arc<dyn MetricsBackend>;
