//! Translation of jobs into the command text a remote shell executes.
mod docker_run;
pub use docker_run::DockerRunCmd;

mod docker_stager;
pub use docker_stager::{DockerStager, StagedJob, StagerConfig};
