use jcp_core::{MacroResolver, job_macros, resolve_job_dirs};
use jcp_model::{DockerRunSpec, Env, ExecSystem, Flag, JobDescriptor, Mount};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{ExecError, stager::DockerRunCmd};

const ENV_FILE_NAME: &str = "job.env";

/// Container-side layout and identity used when staging docker jobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StagerConfig {
    /// Value of `--user`; evaluated by the remote shell.
    pub container_user: String,
    pub input_mount: String,
    pub output_mount: String,
    pub exec_mount: String,
    pub remove_on_exit: Flag,
}

impl Default for StagerConfig {
    fn default() -> Self {
        Self {
            container_user: "$(id -u):$(id -g)".into(),
            input_mount: "/JobInput".into(),
            output_mount: "/JobOutput".into(),
            exec_mount: "/JobExec".into(),
            remove_on_exit: Flag::enabled(),
        }
    }
}

/// Everything written to the execution system to launch one job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedJob {
    pub spec: DockerRunSpec,
    pub command: String,
    pub env_file: String,
    /// Launch script wrapping `command`.
    pub script: String,
}

/// Builds docker launch material for jobs.
#[derive(Debug, Clone, Default)]
pub struct DockerStager {
    config: StagerConfig,
}

impl DockerStager {
    pub fn new(config: StagerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StagerConfig {
        &self.config
    }

    /// Map an already-resolved job onto a run spec.
    ///
    /// Directories left blank on the job get no bind mount.
    pub fn build_spec(&self, job: &JobDescriptor, _system: &ExecSystem) -> DockerRunSpec {
        let exec_dir = job.exec_system_exec_dir.trim_end_matches('/');
        let cfg = &self.config;

        DockerRunSpec {
            name: job.uuid.clone(),
            user: cfg.container_user.clone(),
            cid_file: format!("{exec_dir}/{}.cid", job.uuid),
            env_file: format!("{exec_dir}/{ENV_FILE_NAME}"),
            remove_on_exit: cfg.remove_on_exit,
            mounts: [
                (&job.exec_system_input_dir, &cfg.input_mount, true),
                (&job.exec_system_output_dir, &cfg.output_mount, false),
                (&job.exec_system_exec_dir, &cfg.exec_mount, false),
            ]
            .into_iter()
            .filter(|(source, _, _)| !source.trim().is_empty())
            .map(|(source, target, ro)| Mount::bind(source, target, ro))
            .collect(),
            env: job.env.clone(),
            image: job.container_image.clone(),
            app_args: job.app_args.iter().map(|a| format!(" {a}")).collect(),
            ..Default::default()
        }
    }

    /// Resolve the job's macros strictly, then render the command, env-file and launch script.
    #[instrument(level = "debug", skip_all, fields(job = %job.uuid))]
    pub fn stage(&self, job: &JobDescriptor, system: &ExecSystem) -> Result<StagedJob, ExecError> {
        if job.container_image.trim().is_empty() {
            return Err(ExecError::InvalidJob(format!(
                "job {} has no container image",
                job.uuid
            )));
        }

        let mut job = job.clone();
        resolve_job_dirs(&mut job, system)?;

        let defs = job_macros(&job, system);
        let resolver = MacroResolver::new(&defs);

        job.container_image = resolver.resolve(&job.container_image)?;
        job.app_args = job
            .app_args
            .iter()
            .map(|a| resolver.resolve(a))
            .collect::<Result<_, _>>()?;
        job.env = job
            .env
            .iter()
            .map(|var| match var.value() {
                Some(v) => resolver.resolve(v).map(|v| var.with_value(v)),
                None => Ok(var.clone()),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Env)?;

        let spec = self.build_spec(&job, system);
        let (command, env_file) = DockerRunCmd::new(&spec).render();
        let script = format!("#!/bin/bash\n\n{command}\n");
        debug!(command = %command, "docker job staged");

        Ok(StagedJob {
            spec,
            command,
            env_file,
            script,
        })
    }
}

#[cfg(test)]
mod tests {
    use jcp_core::MacroError;
    use jcp_model::{ContainerRuntime, EnvVar, SchedulerType};

    use super::*;

    fn system() -> ExecSystem {
        ExecSystem {
            id: "edge".into(),
            host: "edge-1.example.org".into(),
            effective_user: "bob".into(),
            root_dir: "/work/bob".into(),
            scheduler: SchedulerType::Fork,
            runtime: ContainerRuntime::Docker,
        }
    }

    fn job() -> JobDescriptor {
        let mut env = Env::new();
        env.push("OWNER", "${_jobOwner}");
        env.push_inherit("HOME");
        JobDescriptor {
            uuid: "5e1f".into(),
            name: "sim".into(),
            tenant: "dev".into(),
            owner: "bob".into(),
            app_id: "sim-app".into(),
            app_version: "1.2".into(),
            exec_system_id: "edge".into(),
            container_image: "registry.example.org/${_appId}:${_appVersion}".into(),
            app_args: vec!["--out".into(), "${_execSystemOutputDir}".into()],
            env,
            exec_system_exec_dir: "${_execSystemRootDir}/jobs/${_jobUUID}".into(),
            exec_system_input_dir: "${_execSystemExecDir}/in".into(),
            exec_system_output_dir: "${_execSystemExecDir}/out".into(),
            remote_job_id: None,
        }
    }

    #[test]
    fn stage_resolves_and_renders() {
        let staged = DockerStager::default().stage(&job(), &system()).unwrap();

        assert_eq!(
            staged.command,
            "docker run --name 5e1f --user $(id -u):$(id -g) \
             --cidfile /work/bob/jobs/5e1f/5e1f.cid \
             --env-file /work/bob/jobs/5e1f/job.env --rm \
             --mount type=bind,source=/work/bob/jobs/5e1f/in,target=/JobInput,readonly \
             --mount type=bind,source=/work/bob/jobs/5e1f/out,target=/JobOutput \
             --mount type=bind,source=/work/bob/jobs/5e1f,target=/JobExec \
             registry.example.org/sim-app:1.2 --out /work/bob/jobs/5e1f/out"
        );
        assert_eq!(staged.env_file, "OWNER=bob\nHOME\n");
        assert_eq!(staged.script, format!("#!/bin/bash\n\n{}\n", staged.command));
        assert_eq!(staged.spec.env.0[1], EnvVar::inherit("HOME"));
    }

    #[test]
    fn stage_is_deterministic() {
        let stager = DockerStager::default();
        let a = stager.stage(&job(), &system()).unwrap();
        let b = stager.stage(&job(), &system()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn unresolved_macro_fails_staging() {
        let mut j = job();
        j.app_args.push("${nope}".into());

        let err = DockerStager::default().stage(&j, &system()).unwrap_err();
        assert!(matches!(
            err,
            ExecError::Macro(MacroError::Unresolved { name }) if name == "nope"
        ));
    }

    #[test]
    fn missing_image_is_rejected() {
        let mut j = job();
        j.container_image = " ".into();
        assert!(matches!(
            DockerStager::default().stage(&j, &system()),
            Err(ExecError::InvalidJob(_))
        ));
    }

    #[test]
    fn build_spec_uses_config() {
        let cfg = StagerConfig {
            container_user: "1000:1000".into(),
            exec_mount: "/x".into(),
            remove_on_exit: Flag::disabled(),
            ..Default::default()
        };
        let mut j = job();
        j.exec_system_exec_dir = "/e/".into();
        j.exec_system_input_dir = "/i".into();
        j.exec_system_output_dir = "/o".into();

        let spec = DockerStager::new(cfg).build_spec(&j, &system());
        assert_eq!(spec.user, "1000:1000");
        assert_eq!(spec.cid_file, "/e/5e1f.cid");
        assert_eq!(spec.env_file, "/e/job.env");
        assert!(spec.remove_on_exit.is_disabled());
        assert_eq!(spec.mounts[2], Mount::bind("/e/", "/x", false));
        assert_eq!(spec.app_args, " --out ${_execSystemOutputDir}");
    }

    #[test]
    fn blank_directories_get_no_mount() {
        let mut j = job();
        j.exec_system_input_dir = String::new();
        j.exec_system_output_dir = " ".into();
        j.app_args = vec!["true".into()];

        let staged = DockerStager::default().stage(&j, &system()).unwrap();
        assert_eq!(
            staged.spec.mounts,
            vec![Mount::bind("/work/bob/jobs/5e1f", "/JobExec", false)]
        );
        assert!(!staged.command.contains("source=,"));
        assert!(!staged.command.contains("/JobInput"));
        assert!(!staged.command.contains("/JobOutput"));
    }

    #[test]
    fn config_defaults_from_json() {
        let cfg: StagerConfig = serde_json::from_str(r#"{"inputMount":"/in"}"#).unwrap();
        assert_eq!(cfg.input_mount, "/in");
        assert_eq!(cfg.output_mount, "/JobOutput");
        assert!(cfg.remove_on_exit.is_enabled());
    }
}
