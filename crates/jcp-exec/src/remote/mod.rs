//! Remote-execution seam.
//!
//! The control plane only needs "open a session on system X, run a command
//! string, get its output, close". Transport-level timeouts and retries are
//! the implementation's concern.
use async_trait::async_trait;
use thiserror::Error;

use jcp_model::ExecSystem;

#[cfg(feature = "local-shell")]
mod local;
#[cfg(feature = "local-shell")]
pub use local::LocalShell;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("failed to connect to {host}: {reason}")]
    Connect { host: String, reason: String },

    #[error("command failed to run: {0}")]
    Exec(String),

    #[error("session already closed")]
    Closed,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Captured result of one remote command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoteOutput {
    /// Exit status, if the transport reports one.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl RemoteOutput {
    /// Stdout followed by stderr, trimmed.
    pub fn text(&self) -> String {
        let mut s = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        s.push_str(self.stdout.trim());
        let err = self.stderr.trim();
        if !err.is_empty() {
            if !s.is_empty() {
                s.push('\n');
            }
            s.push_str(err);
        }
        s
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Opens command sessions on execution systems.
#[async_trait]
pub trait RemoteConnector: Send + Sync {
    async fn connect(&self, system: &ExecSystem) -> Result<Box<dyn RemoteSession>, RemoteError>;
}

/// An open session on one execution system.
#[async_trait]
pub trait RemoteSession: Send {
    /// Run `command` through the remote shell and capture its output.
    async fn run(&mut self, command: &str) -> Result<RemoteOutput, RemoteError>;

    async fn close(&mut self) -> Result<(), RemoteError>;
}
