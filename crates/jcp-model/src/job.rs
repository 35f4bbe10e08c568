use serde::{Deserialize, Serialize};

use crate::domain::Env;

/// Job fields the control plane reads when staging, resolving, or killing.
///
/// The authoritative job record lives elsewhere; this is a detached snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescriptor {
    pub uuid: String,
    pub name: String,
    pub tenant: String,
    pub owner: String,
    pub app_id: String,
    pub app_version: String,
    /// Id of the [`crate::ExecSystem`] the job is bound to.
    pub exec_system_id: String,
    /// Container image reference; may contain macros until staged.
    #[serde(default)]
    pub container_image: String,
    /// Application arguments passed after the image; may contain macros.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub app_args: Vec<String>,
    #[serde(default, skip_serializing_if = "Env::is_empty")]
    pub env: Env,
    #[serde(default)]
    pub exec_system_exec_dir: String,
    #[serde(default)]
    pub exec_system_input_dir: String,
    #[serde(default)]
    pub exec_system_output_dir: String,
    /// Identifier assigned by the remote scheduler or runtime once accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_job_id: Option<String>,
}

impl JobDescriptor {
    /// Remote job id, if one has been recorded and is not blank.
    pub fn remote_job_id(&self) -> Option<&str> {
        self.remote_job_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Leading decimal digits of the remote job id.
    ///
    /// Batch tools sometimes report composite ids such as `4711.head-node`
    /// or `4711;cluster`, but only accept the bare number on the kill path.
    pub fn numeric_remote_job_id(&self) -> Option<&str> {
        let id = self.remote_job_id()?;
        let end = id
            .char_indices()
            .find(|(_, c)| !c.is_ascii_digit())
            .map_or(id.len(), |(i, _)| i);
        (end > 0).then(|| &id[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::JobDescriptor;

    fn with_remote(id: Option<&str>) -> JobDescriptor {
        JobDescriptor {
            remote_job_id: id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn blank_remote_id_is_absent() {
        assert_eq!(with_remote(None).remote_job_id(), None);
        assert_eq!(with_remote(Some("   ")).remote_job_id(), None);
        assert_eq!(with_remote(Some(" 42 ")).remote_job_id(), Some("42"));
    }

    #[test]
    fn numeric_form_takes_leading_digits() {
        assert_eq!(with_remote(Some("4711.head")).numeric_remote_job_id(), Some("4711"));
        assert_eq!(with_remote(Some("4711;c1")).numeric_remote_job_id(), Some("4711"));
        assert_eq!(with_remote(Some("4711")).numeric_remote_job_id(), Some("4711"));
        assert_eq!(with_remote(Some("abc123")).numeric_remote_job_id(), None);
        assert_eq!(with_remote(None).numeric_remote_job_id(), None);
    }
}
