pub mod config;
pub mod error;
pub mod macros;
pub mod metrics;
pub mod throttle;

pub use config::ThrottleConfig;
pub use error::CoreError;
pub use macros::{Definitions, MacroError, MacroResolver, job_macros, resolve_job_dirs};
pub use metrics::{KillOutcome, MetricsBackend, MetricsHandle, NoOpMetrics, noop_metrics};
pub use throttle::{SubmissionGate, Throttle, ThrottleMap, throttle_key};

pub mod prelude {
    pub use crate::error::CoreError;
    pub use crate::macros::{Definitions, MacroError, MacroResolver};
    pub use crate::metrics::{KillOutcome, MetricsHandle};
    pub use crate::throttle::{SubmissionGate, ThrottleMap};
}
