use jcp_model::JobDescriptor;

use crate::killer::JobKiller;

/// Killer for forked docker containers. The remote id is the container id or name.
#[derive(Debug, Clone)]
pub struct ContainerKiller {
    container: Option<String>,
}

impl ContainerKiller {
    pub fn new(job: &JobDescriptor) -> Self {
        Self {
            container: job.remote_job_id().map(str::to_string),
        }
    }
}

impl JobKiller for ContainerKiller {
    fn name(&self) -> &'static str {
        "docker"
    }

    fn tool(&self) -> &'static str {
        "docker"
    }

    fn gone_phrases(&self) -> &'static [&'static str] {
        &["no such container"]
    }

    fn command(&self) -> Option<String> {
        self.container.as_deref().map(|id| format!("docker rm -f {id}"))
    }

    fn alt_command(&self) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::killer::tests::job;

    #[test]
    fn force_removes_container() {
        let k = ContainerKiller::new(&job(Some("9f2c1ab")));
        assert_eq!(k.command().as_deref(), Some("docker rm -f 9f2c1ab"));
        assert_eq!(k.alt_command(), None);
    }
}
