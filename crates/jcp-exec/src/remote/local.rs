use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::trace;

use jcp_model::ExecSystem;

use crate::remote::{RemoteConnector, RemoteError, RemoteOutput, RemoteSession};

/// Connector that runs every command on the local host through `sh -c`.
///
/// Useful for fork-scheduled systems that are the service host itself, and
/// for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalShell;

#[async_trait]
impl RemoteConnector for LocalShell {
    async fn connect(&self, system: &ExecSystem) -> Result<Box<dyn RemoteSession>, RemoteError> {
        trace!(system = %system.id, "opening local shell session");
        Ok(Box::new(LocalSession { closed: false }))
    }
}

struct LocalSession {
    closed: bool,
}

#[async_trait]
impl RemoteSession for LocalSession {
    async fn run(&mut self, command: &str) -> Result<RemoteOutput, RemoteError> {
        if self.closed {
            return Err(RemoteError::Closed);
        }
        trace!(command, "running local shell command");

        let out = Command::new("sh")
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(RemoteOutput {
            exit_code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }

    async fn close(&mut self) -> Result<(), RemoteError> {
        self.closed = true;
        Ok(())
    }
}
