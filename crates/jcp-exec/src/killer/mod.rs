//! Best-effort termination of remote jobs.
//!
//! A [`JobKiller`] only knows how to spell the kill command for one kind of
//! back end; [`KillContext::attack`] is the shared driver that runs it.
//! Variants are chosen by [`killer_for`] from the execution system's
//! scheduler classification and container runtime.
mod batch;
pub use batch::BatchKiller;

mod process;
pub use process::ProcessKiller;

mod container;
pub use container::ContainerKiller;

mod driver;
pub use driver::{KillContext, KillerConfig};

mod escalation;
pub use escalation::{Escalation, LogEscalation};

use jcp_model::{ContainerRuntime, ExecSystem, JobDescriptor, SchedulerType};
use tracing::debug;

use crate::ExecError;

/// Builds kill commands for one back end.
///
/// Both builders return `None` when there is nothing to send.
pub trait JobKiller: Send + Sync {
    /// Killer name used in logs.
    fn name(&self) -> &'static str;

    /// Executable the kill command invokes.
    fn tool(&self) -> &'static str;

    /// Lower-case output fragments meaning the target no longer exists.
    fn gone_phrases(&self) -> &'static [&'static str];

    /// Primary kill command for the job's remote id.
    fn command(&self) -> Option<String>;

    /// Fallback using the numeric-only form of the remote id.
    ///
    /// `None` when no numeric form exists or it would repeat [`JobKiller::command`].
    fn alt_command(&self) -> Option<String>;
}

/// Select the killer for `job` on `system`.
///
/// Fails fast when the job and system do not belong together, and for the
/// container-orchestrator slot, which has no killer yet.
pub fn killer_for(job: &JobDescriptor, system: &ExecSystem) -> Result<Box<dyn JobKiller>, ExecError> {
    if job.uuid.trim().is_empty() {
        return Err(ExecError::InvalidJob("job uuid is blank".into()));
    }
    if job.exec_system_id != system.id {
        return Err(ExecError::InvalidJob(format!(
            "job {} is bound to system '{}', not '{}'",
            job.uuid, job.exec_system_id, system.id
        )));
    }

    let killer: Box<dyn JobKiller> = match (system.scheduler, system.runtime) {
        (s, _) if s.is_batch() => Box::new(BatchKiller::new(s, job)),
        (SchedulerType::Fork, ContainerRuntime::Docker) => Box::new(ContainerKiller::new(job)),
        (SchedulerType::Fork, _) => Box::new(ProcessKiller::new(job)),
        (other, _) => {
            return Err(ExecError::UnsupportedScheduler {
                scheduler: other.to_string(),
            });
        }
    };
    debug!(job = %job.uuid, killer = killer.name(), "job killer selected");
    Ok(killer)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn system(scheduler: SchedulerType, runtime: ContainerRuntime) -> ExecSystem {
        ExecSystem {
            id: "hpc".into(),
            host: "login.hpc.example.org".into(),
            effective_user: "alice".into(),
            root_dir: "/scratch/alice".into(),
            scheduler,
            runtime,
        }
    }

    pub(crate) fn job(remote: Option<&str>) -> JobDescriptor {
        JobDescriptor {
            uuid: "job-1".into(),
            exec_system_id: "hpc".into(),
            remote_job_id: remote.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn picks_variant_by_classification() {
        let j = job(Some("7"));
        let pick = |s, r| killer_for(&j, &system(s, r)).unwrap().name();

        assert_eq!(pick(SchedulerType::Slurm, ContainerRuntime::Singularity), "slurm");
        assert_eq!(pick(SchedulerType::Lsf, ContainerRuntime::None), "lsf");
        assert_eq!(pick(SchedulerType::Fork, ContainerRuntime::Docker), "docker");
        assert_eq!(pick(SchedulerType::Fork, ContainerRuntime::None), "process");
        assert_eq!(pick(SchedulerType::Fork, ContainerRuntime::Singularity), "process");
    }

    #[test]
    fn orchestrator_slot_is_unsupported() {
        let res = killer_for(&job(Some("7")), &system(SchedulerType::Kubernetes, ContainerRuntime::Docker));
        assert!(matches!(
            res,
            Err(ExecError::UnsupportedScheduler { scheduler }) if scheduler == "kubernetes"
        ));
    }

    #[test]
    fn mismatched_system_is_rejected() {
        let mut j = job(Some("7"));
        j.exec_system_id = "elsewhere".into();
        let res = killer_for(&j, &system(SchedulerType::Slurm, ContainerRuntime::None));
        assert!(matches!(res, Err(ExecError::InvalidJob(_))));
    }

    #[test]
    fn blank_uuid_is_rejected() {
        let mut j = job(Some("7"));
        j.uuid = " ".into();
        let res = killer_for(&j, &system(SchedulerType::Fork, ContainerRuntime::None));
        assert!(matches!(res, Err(ExecError::InvalidJob(_))));
    }
}
