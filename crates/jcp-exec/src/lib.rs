mod error;
pub use error::ExecError;

pub mod remote;
pub use remote::{RemoteConnector, RemoteError, RemoteOutput, RemoteSession};

#[cfg(feature = "local-shell")]
pub use remote::LocalShell;

pub mod killer;
pub use killer::{
    BatchKiller, ContainerKiller, Escalation, JobKiller, KillContext, KillerConfig, LogEscalation,
    ProcessKiller, killer_for,
};
pub use jcp_core::KillOutcome;

pub mod stager;
pub use stager::{DockerRunCmd, DockerStager, StagedJob, StagerConfig};
