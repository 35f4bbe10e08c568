use thiserror::Error;

use crate::macros::MacroError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("macro resolution failed: {0}")]
    Macro(#[from] MacroError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no tokio runtime available to run the throttle cleaner")]
    NoRuntime,
}
