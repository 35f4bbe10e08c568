use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use jcp_core::ThrottleConfig;
use jcp_exec::{KillerConfig, StagerConfig};
use jcp_observe::LoggerConfig;

/// Process-wide settings, built once in `main` and passed down by reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub logger: LoggerConfig,
    pub throttle: ThrottleConfig,
    pub killer: KillerConfig,
    pub stager: StagerConfig,
}

impl ServiceConfig {
    /// Read a JSON config file. Missing sections and fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: ServiceConfig = serde_json::from_str(&raw)
            .with_context(|| format!("invalid config {}", path.display()))?;
        cfg.throttle.validate()?;
        Ok(cfg)
    }
}
