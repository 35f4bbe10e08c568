mod config;

use std::sync::Arc;

use anyhow::{Context, bail};
use tracing::{info, warn};

use jcp_core::{MetricsHandle, SubmissionGate, ThrottleMap};
use jcp_exec::{DockerStager, KillContext, LocalShell, RemoteConnector};
use jcp_model::{ContainerRuntime, Env, ExecSystem, JobDescriptor, SchedulerType};
use jcp_observe::{LoggerTimeZone, init_local_offset, init_logger};
use jcp_prometheus::PrometheusMetrics;

use crate::config::ServiceConfig;

fn main() -> anyhow::Result<()> {
    // 1) config
    let cfg = match std::env::args().nth(1) {
        Some(path) => ServiceConfig::load(&path)?,
        None => ServiceConfig::default(),
    };

    // 2) logger; local offset must be captured before the runtime spawns threads
    if cfg.logger.tz == LoggerTimeZone::Local {
        init_local_offset();
    }
    init_logger(&cfg.logger)?;
    info!(format = %cfg.logger.format, level = cfg.logger.level.as_str(), "logger initialized");

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?
        .block_on(run(cfg))
}

async fn run(cfg: ServiceConfig) -> anyhow::Result<()> {
    // 3) metrics + throttle
    let prometheus = PrometheusMetrics::new()?;
    let metrics: MetricsHandle = Arc::new(prometheus.clone());
    let gate = SubmissionGate::new(ThrottleMap::spawn(&cfg.throttle, metrics.clone())?);

    let system = local_system();
    let mut job = demo_job(&system);

    // 4) admission
    if !gate.admit(&job.tenant, &job.owner) {
        bail!("submission for {}@{} rejected by throttle", job.owner, job.tenant);
    }

    // 5) staging
    let staged = DockerStager::new(cfg.stager.clone()).stage(&job, &system)?;
    info!(job = %job.uuid, command = %staged.command, "docker command staged");
    info!(job = %job.uuid, env_file = %staged.env_file.trim_end(), "env file staged");

    // 6) launch a stand-in process and kill it
    let connector: Arc<dyn RemoteConnector> = Arc::new(LocalShell);
    let mut session = connector.connect(&system).await?;
    let out = session.run("sleep 300 > /dev/null 2>&1 & echo $!").await?;
    session.close().await?;

    let pid = out.stdout.trim().to_string();
    if pid.is_empty() {
        warn!(output = %out.text(), "stand-in process did not report a pid");
        return Ok(());
    }
    job.remote_job_id = Some(pid);

    let killer = KillContext::new(connector)
        .with_metrics(metrics)
        .with_config(cfg.killer.clone());
    let outcome = killer.kill_job(&job, &system).await?;
    info!(job = %job.uuid, outcome = outcome.as_label(), "kill attempt finished");

    info!(
        families = prometheus.gather().len(),
        tracked_keys = gate.throttles().len(),
        "done"
    );
    Ok(())
}

fn local_system() -> ExecSystem {
    ExecSystem {
        id: "local".into(),
        host: "localhost".into(),
        effective_user: std::env::var("USER").unwrap_or_else(|_| "jcp".into()),
        root_dir: std::env::temp_dir().display().to_string(),
        scheduler: SchedulerType::Fork,
        runtime: ContainerRuntime::None,
    }
}

fn demo_job(system: &ExecSystem) -> JobDescriptor {
    let mut env = Env::new();
    env.push("JOB_OWNER", "${_jobOwner}");
    env.push_inherit("TZ");

    JobDescriptor {
        uuid: format!("demo-{}", std::process::id()),
        name: "demo".into(),
        tenant: "dev".into(),
        owner: system.effective_user.clone(),
        app_id: "busybox".into(),
        app_version: "1.36".into(),
        exec_system_id: system.id.clone(),
        container_image: "docker.io/library/${_appId}:${_appVersion}".into(),
        app_args: vec!["ls".into(), "${_execSystemInputDir}".into()],
        env,
        exec_system_exec_dir: "${_execSystemRootDir}/jcp/${_jobUUID}".into(),
        exec_system_input_dir: "${_execSystemExecDir}/input".into(),
        exec_system_output_dir: "${_execSystemExecDir}/output".into(),
        remote_job_id: None,
    }
}
