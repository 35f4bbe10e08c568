use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Submission throttle settings shared by every key of a [`crate::ThrottleMap`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ThrottleConfig {
    /// Length of the sliding window in seconds.
    pub window_secs: u64,
    /// Maximum admissions per key within one window.
    pub limit: usize,
    /// Period of the idle-key cleaner in seconds.
    pub cleaner_secs: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            window_secs: 60,
            limit: 50,
            cleaner_secs: 300,
        }
    }
}

/// Upper bound for `windowSecs` and `cleanerSecs` (one year).
pub const MAX_PERIOD_SECS: u64 = 365 * 24 * 60 * 60;

impl ThrottleConfig {
    /// Rules: window, limit and cleaner period are all non-zero; window and
    /// cleaner period are at most [`MAX_PERIOD_SECS`].
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.window_secs == 0 {
            return Err(CoreError::Config("throttle.windowSecs cannot be zero".into()));
        }
        if self.limit == 0 {
            return Err(CoreError::Config("throttle.limit cannot be zero".into()));
        }
        if self.cleaner_secs == 0 {
            return Err(CoreError::Config("throttle.cleanerSecs cannot be zero".into()));
        }
        if self.window_secs > MAX_PERIOD_SECS {
            return Err(CoreError::Config(format!(
                "throttle.windowSecs cannot exceed {MAX_PERIOD_SECS}"
            )));
        }
        if self.cleaner_secs > MAX_PERIOD_SECS {
            return Err(CoreError::Config(format!(
                "throttle.cleanerSecs cannot exceed {MAX_PERIOD_SECS}"
            )));
        }
        Ok(())
    }

    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    pub fn cleaner_period(&self) -> Duration {
        Duration::from_secs(self.cleaner_secs)
    }
}
