use std::{fmt, sync::Arc};

use jcp_core::{KillOutcome, MetricsHandle, noop_metrics};
use jcp_model::{ExecSystem, JobDescriptor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::{
    ExecError,
    killer::{Escalation, JobKiller, LogEscalation, killer_for},
    remote::{RemoteConnector, RemoteError, RemoteOutput, RemoteSession},
};

/// Shell exit status for a command that could not be found.
const EXIT_NOT_FOUND: i32 = 127;

/// Killer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KillerConfig {
    /// Shell step run before the kill command so the scheduler tools are on `PATH`.
    ///
    /// `None` or a blank string skips it.
    pub priming_command: Option<String>,
}

impl Default for KillerConfig {
    fn default() -> Self {
        Self {
            priming_command: Some("source ~/.bashrc > /dev/null 2>&1 || true".into()),
        }
    }
}

/// Shared state for kill attempts: transport, metrics and escalation.
#[derive(Clone)]
pub struct KillContext {
    connector: Arc<dyn RemoteConnector>,
    metrics: MetricsHandle,
    escalation: Arc<dyn Escalation>,
    config: KillerConfig,
}

impl KillContext {
    /// Context with no-op metrics, log-only escalation and default config.
    pub fn new(connector: Arc<dyn RemoteConnector>) -> Self {
        Self {
            connector,
            metrics: noop_metrics(),
            escalation: Arc::new(LogEscalation),
            config: KillerConfig::default(),
        }
    }

    pub fn with_metrics(mut self, metrics: MetricsHandle) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_escalation(mut self, escalation: Arc<dyn Escalation>) -> Self {
        self.escalation = escalation;
        self
    }

    pub fn with_config(mut self, config: KillerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &KillerConfig {
        &self.config
    }

    /// Pick the killer for `job` and run [`KillContext::attack`] with it.
    pub async fn kill_job(
        &self,
        job: &JobDescriptor,
        system: &ExecSystem,
    ) -> Result<KillOutcome, ExecError> {
        let killer = killer_for(job, system)?;
        Ok(self.attack(killer.as_ref(), job, system).await)
    }

    /// Best-effort kill of `job` on `system`.
    ///
    /// Never fails: transport errors and a missing kill tool are logged,
    /// handed to the escalation hook and reported as [`KillOutcome::Failed`].
    #[instrument(
        level = "debug",
        skip_all,
        fields(job = %job.uuid, killer = killer.name(), host = %system.host)
    )]
    pub async fn attack(
        &self,
        killer: &dyn JobKiller,
        job: &JobDescriptor,
        system: &ExecSystem,
    ) -> KillOutcome {
        let outcome = match killer.command() {
            None => {
                info!("no remote job id recorded, nothing to kill");
                KillOutcome::NoRemoteId
            }
            Some(primary) => match self.connector.connect(system).await {
                Err(e) => self.give_up(job, format!("connect: {e}")),
                Ok(mut session) => {
                    let res = self.run_kill(session.as_mut(), killer, &primary).await;
                    if let Err(e) = session.close().await {
                        debug!(error = %e, "failed to close remote session");
                    }
                    match res {
                        Ok(Verdict::ToolMissing) => self.give_up(
                            job,
                            format!("kill tool '{}' not available on {}", killer.tool(), system.host),
                        ),
                        Ok(verdict) => verdict.outcome(),
                        Err(e) => self.give_up(job, format!("run: {e}")),
                    }
                }
            },
        };

        debug!(outcome = outcome.as_label(), "kill attempt finished");
        self.metrics.record_kill(system.scheduler.as_str(), outcome);
        outcome
    }

    /// Prime the session, run the primary command and, unless it was clearly
    /// accepted, the fallback. The verdict of the last command run wins.
    async fn run_kill(
        &self,
        session: &mut dyn RemoteSession,
        killer: &dyn JobKiller,
        primary: &str,
    ) -> Result<Verdict, RemoteError> {
        if let Some(priming) = self.priming() {
            match session.run(priming).await {
                Ok(out) if !out.success() => {
                    debug!(exit_code = ?out.exit_code, "priming step exited non-zero");
                }
                Ok(_) => {}
                Err(e) => warn!(error = %e, "priming step failed"),
            }
        }

        let out = session.run(primary).await?;
        let verdict = classify(&out, killer);
        debug!(command = primary, output = %out.text(), ?verdict, "kill command ran");
        if matches!(verdict, Verdict::Accepted | Verdict::ToolMissing) {
            return Ok(verdict);
        }

        let Some(alt) = killer.alt_command() else {
            return Ok(verdict);
        };
        let out = session.run(&alt).await?;
        let verdict = classify(&out, killer);
        debug!(command = %alt, output = %out.text(), ?verdict, "fallback kill command ran");
        Ok(verdict)
    }

    fn priming(&self) -> Option<&str> {
        self.config
            .priming_command
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }

    fn give_up(&self, job: &JobDescriptor, reason: String) -> KillOutcome {
        warn!(reason = %reason, "remote kill failed");
        self.escalation.escalate(job, &reason);
        KillOutcome::Failed
    }
}

impl fmt::Debug for KillContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KillContext")
            .field("connector", &"<connector>")
            .field("metrics", &"<handle>")
            .field("escalation", &"<hook>")
            .field("config", &self.config)
            .finish()
    }
}

impl fmt::Display for KillContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KillContext(priming={})", self.priming().is_some())
    }
}

/// How the remote side answered one kill command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// The shell could not find the kill tool.
    ToolMissing,
    /// The tool reported the target as already gone.
    Gone,
    /// Exit status zero, or output without an exit status.
    Accepted,
    /// Output with a non-zero exit status and no known phrase.
    Rejected,
    /// No output and no zero exit status.
    Silent,
}

impl Verdict {
    fn outcome(self) -> KillOutcome {
        match self {
            Verdict::ToolMissing => KillOutcome::Failed,
            Verdict::Gone => KillOutcome::AlreadyGone,
            Verdict::Accepted => KillOutcome::Issued,
            Verdict::Rejected | Verdict::Silent => KillOutcome::Inconclusive,
        }
    }
}

fn classify(out: &RemoteOutput, killer: &dyn JobKiller) -> Verdict {
    let text = out.text().to_lowercase();
    let tool = killer.tool();

    if out.exit_code == Some(EXIT_NOT_FOUND)
        || text.contains(&format!("{tool}: not found"))
        || text.contains(&format!("{tool}: command not found"))
    {
        return Verdict::ToolMissing;
    }
    if killer.gone_phrases().iter().any(|p| text.contains(p)) {
        return Verdict::Gone;
    }
    match (text.is_empty(), out.exit_code) {
        (_, Some(0)) | (false, None) => Verdict::Accepted,
        (true, _) => Verdict::Silent,
        (false, Some(_)) => Verdict::Rejected,
    }
}
