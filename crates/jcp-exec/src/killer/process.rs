use jcp_model::JobDescriptor;

use crate::killer::JobKiller;

/// Killer for jobs forked as plain OS processes. The remote id is the pid.
#[derive(Debug, Clone)]
pub struct ProcessKiller {
    pid: Option<String>,
}

impl ProcessKiller {
    pub fn new(job: &JobDescriptor) -> Self {
        Self {
            pid: job.remote_job_id().map(str::to_string),
        }
    }
}

impl JobKiller for ProcessKiller {
    fn name(&self) -> &'static str {
        "process"
    }

    fn tool(&self) -> &'static str {
        "kill"
    }

    fn gone_phrases(&self) -> &'static [&'static str] {
        &["no such process"]
    }

    fn command(&self) -> Option<String> {
        self.pid.as_deref().map(|pid| format!("kill -9 {pid}"))
    }

    /// Pids are always numeric.
    fn alt_command(&self) -> Option<String> {
        None
    }
}
