use jcp_model::{JobDescriptor, SchedulerType};

use crate::killer::JobKiller;

/// Killer for HPC batch schedulers, using the scheduler's native kill-by-id tool.
#[derive(Debug, Clone)]
pub struct BatchKiller {
    scheduler: SchedulerType,
    remote_id: Option<String>,
    numeric_id: Option<String>,
}

impl BatchKiller {
    pub fn new(scheduler: SchedulerType, job: &JobDescriptor) -> Self {
        Self {
            scheduler,
            remote_id: job.remote_job_id().map(str::to_string),
            numeric_id: job.numeric_remote_job_id().map(str::to_string),
        }
    }

}

impl JobKiller for BatchKiller {
    fn name(&self) -> &'static str {
        self.scheduler.as_str()
    }

    fn tool(&self) -> &'static str {
        match self.scheduler {
            SchedulerType::Slurm => "scancel",
            SchedulerType::Lsf => "bkill",
            _ => "qdel",
        }
    }

    fn gone_phrases(&self) -> &'static [&'static str] {
        match self.scheduler {
            SchedulerType::Slurm => &["invalid job id", "already completing or completed"],
            SchedulerType::Lsf => &["no matching job found", "job has already finished"],
            SchedulerType::Sge => &["does not exist"],
            _ => &["unknown job id", "job has finished"],
        }
    }

    fn command(&self) -> Option<String> {
        self.remote_id
            .as_deref()
            .map(|id| format!("{} {id}", self.tool()))
    }

    fn alt_command(&self) -> Option<String> {
        let numeric = self.numeric_id.as_deref()?;
        if self.remote_id.as_deref() == Some(numeric) {
            return None;
        }
        Some(format!("{} {numeric}", self.tool()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::killer::tests::job;

    #[test]
    fn native_tool_per_scheduler() {
        let j = job(Some("4711"));
        let cmd = |s| BatchKiller::new(s, &j).command().unwrap();

        assert_eq!(cmd(SchedulerType::Slurm), "scancel 4711");
        assert_eq!(cmd(SchedulerType::Pbs), "qdel 4711");
        assert_eq!(cmd(SchedulerType::Lsf), "bkill 4711");
        assert_eq!(cmd(SchedulerType::Sge), "qdel 4711");
    }

    #[test]
    fn composite_id_gets_numeric_fallback() {
        let k = BatchKiller::new(SchedulerType::Pbs, &job(Some("4711.pbs-head")));
        assert_eq!(k.command().as_deref(), Some("qdel 4711.pbs-head"));
        assert_eq!(k.alt_command().as_deref(), Some("qdel 4711"));
    }

    #[test]
    fn no_fallback_when_identical_or_non_numeric() {
        assert_eq!(BatchKiller::new(SchedulerType::Slurm, &job(Some("4711"))).alt_command(), None);
        assert_eq!(BatchKiller::new(SchedulerType::Slurm, &job(Some("job.4711"))).alt_command(), None);
    }

    #[test]
    fn gone_phrases_follow_scheduler() {
        let j = job(Some("1"));
        let gone = |s| BatchKiller::new(s, &j).gone_phrases();

        assert!(gone(SchedulerType::Slurm).contains(&"invalid job id"));
        assert!(gone(SchedulerType::Lsf).contains(&"no matching job found"));
        assert!(gone(SchedulerType::Pbs).contains(&"unknown job id"));
        assert!(gone(SchedulerType::Sge).contains(&"does not exist"));
        for s in [SchedulerType::Slurm, SchedulerType::Pbs, SchedulerType::Lsf, SchedulerType::Sge] {
            assert!(!gone(s).contains(&"not found"));
        }
    }

    #[test]
    fn nothing_to_send_without_remote_id() {
        let k = BatchKiller::new(SchedulerType::Slurm, &job(None));
        assert_eq!(k.command(), None);
        assert_eq!(k.alt_command(), None);
    }
}
