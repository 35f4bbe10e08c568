use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// How an execution system accepts and tracks work.
///
/// Batch schedulers hand back their own job ids; `Fork` runs the job as a
/// plain OS process (or container) on the host; `Kubernetes` delegates to a
/// container orchestrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerType {
    Slurm,
    Pbs,
    Lsf,
    Sge,
    Fork,
    Kubernetes,
}

impl SchedulerType {
    /// Returns `true` for HPC batch schedulers.
    pub fn is_batch(&self) -> bool {
        matches!(
            self,
            SchedulerType::Slurm | SchedulerType::Pbs | SchedulerType::Lsf | SchedulerType::Sge
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchedulerType::Slurm => "slurm",
            SchedulerType::Pbs => "pbs",
            SchedulerType::Lsf => "lsf",
            SchedulerType::Sge => "sge",
            SchedulerType::Fork => "fork",
            SchedulerType::Kubernetes => "kubernetes",
        }
    }
}

impl fmt::Display for SchedulerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchedulerType {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "slurm" => Ok(SchedulerType::Slurm),
            "pbs" | "pbspro" | "torque" => Ok(SchedulerType::Pbs),
            "lsf" => Ok(SchedulerType::Lsf),
            "sge" | "uge" => Ok(SchedulerType::Sge),
            "fork" | "" => Ok(SchedulerType::Fork),
            "kubernetes" | "k8s" => Ok(SchedulerType::Kubernetes),
            other => Err(ModelError::UnknownScheduler(other.to_string())),
        }
    }
}

/// Container runtime used to launch the application, if any.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerRuntime {
    Docker,
    Singularity,
    #[default]
    None,
}

impl FromStr for ContainerRuntime {
    type Err = ModelError;
    fn from_str(s: &str) -> ModelResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "docker" => Ok(ContainerRuntime::Docker),
            "singularity" | "apptainer" => Ok(ContainerRuntime::Singularity),
            "none" | "" => Ok(ContainerRuntime::None),
            other => Err(ModelError::UnknownRuntime(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scheduler_aliases() {
        assert_eq!("SLURM".parse::<SchedulerType>().unwrap(), SchedulerType::Slurm);
        assert_eq!("torque".parse::<SchedulerType>().unwrap(), SchedulerType::Pbs);
        assert_eq!(" k8s ".parse::<SchedulerType>().unwrap(), SchedulerType::Kubernetes);
        assert!(matches!(
            "condor".parse::<SchedulerType>(),
            Err(ModelError::UnknownScheduler(s)) if s == "condor"
        ));
    }

    #[test]
    fn batch_classification() {
        assert!(SchedulerType::Slurm.is_batch());
        assert!(SchedulerType::Sge.is_batch());
        assert!(!SchedulerType::Fork.is_batch());
        assert!(!SchedulerType::Kubernetes.is_batch());
    }

    #[test]
    fn parses_runtime() {
        assert_eq!("Docker".parse::<ContainerRuntime>().unwrap(), ContainerRuntime::Docker);
        assert_eq!("apptainer".parse::<ContainerRuntime>().unwrap(), ContainerRuntime::Singularity);
        assert!("podman".parse::<ContainerRuntime>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&SchedulerType::Slurm).unwrap();
        assert_eq!(json, "\"slurm\"");
        let back: ContainerRuntime = serde_json::from_str("\"singularity\"").unwrap();
        assert_eq!(back, ContainerRuntime::Singularity);
    }
}
