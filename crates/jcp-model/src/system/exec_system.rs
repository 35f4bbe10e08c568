use serde::{Deserialize, Serialize};

use crate::system::{ContainerRuntime, SchedulerType};

/// Remote system a job executes on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecSystem {
    /// System identifier, as referenced by jobs.
    pub id: String,
    /// DNS name or address used to open remote sessions.
    pub host: String,
    /// Login account commands run under.
    pub effective_user: String,
    /// Root directory every job path is resolved under.
    #[serde(default)]
    pub root_dir: String,
    pub scheduler: SchedulerType,
    #[serde(default)]
    pub runtime: ContainerRuntime,
}
