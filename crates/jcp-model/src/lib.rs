mod domain;
pub use domain::{Env, EnvVar, Flag, Labels};

mod error;
pub use error::{ModelError, ModelResult};

mod system;
pub use system::{ContainerRuntime, ExecSystem, SchedulerType};

mod job;
pub use job::JobDescriptor;

mod docker;
pub use docker::{DockerRunSpec, Mount, MountKind};
