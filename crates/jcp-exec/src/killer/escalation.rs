use jcp_model::JobDescriptor;
use tracing::error;

/// Out-of-band escalation for jobs that may be left running after a failed kill.
pub trait Escalation: Send + Sync {
    fn escalate(&self, job: &JobDescriptor, reason: &str);
}

/// Escalation that only emits an `error` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogEscalation;

impl Escalation for LogEscalation {
    fn escalate(&self, job: &JobDescriptor, reason: &str) {
        error!(
            job = %job.uuid,
            tenant = %job.tenant,
            owner = %job.owner,
            remote_id = job.remote_job_id().unwrap_or("-"),
            reason,
            "zombie job: remote kill failed",
        );
    }
}
