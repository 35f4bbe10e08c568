use serde::{Deserialize, Serialize};

use crate::{
    Flag,
    docker::Mount,
    domain::{Env, Labels},
};

/// Structured `docker run` specification.
///
/// The first four fields are always emitted; every optional field is emitted
/// only when set. Nothing here is validated or escaped: callers are trusted
/// to supply shell-safe values.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DockerRunSpec {
    pub name: String,
    pub user: String,
    pub cid_file: String,
    pub env_file: String,
    /// Remove the container when it exits (`--rm`).
    #[serde(default)]
    pub remove_on_exit: Flag,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub add_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpuset_cpus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpuset_mems: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpus: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip6: Option<String>,
    #[serde(default, skip_serializing_if = "Labels::is_empty")]
    pub labels: Labels,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_driver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_opts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_alias: Option<String>,
    /// Port mappings in docker's `host:container` form, one `-p` each.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub port_mappings: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workdir: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mounts: Vec<Mount>,
    /// Legacy `--tmpfs` values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tmpfs: Vec<String>,
    /// Legacy `--volume` values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub volumes: Vec<String>,

    #[serde(default, skip_serializing_if = "Env::is_empty")]
    pub env: Env,

    pub image: String,
    /// Application arguments, already prefixed with a space by the caller.
    #[serde(default)]
    pub app_args: String,
}
