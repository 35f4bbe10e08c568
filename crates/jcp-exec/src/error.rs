use thiserror::Error;

use jcp_core::MacroError;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("unsupported scheduler for job termination: {scheduler}")]
    UnsupportedScheduler { scheduler: String },

    #[error("invalid job: {0}")]
    InvalidJob(String),

    #[error("staging failed: {0}")]
    Macro(#[from] MacroError),
}
