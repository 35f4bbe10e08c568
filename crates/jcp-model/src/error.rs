use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown scheduler type: {0}")]
    UnknownScheduler(String),

    #[error("unknown container runtime: {0}")]
    UnknownRuntime(String),

    #[error("unknown mount kind: {0}")]
    UnknownMountKind(String),
}

pub type ModelResult<T> = Result<T, ModelError>;
