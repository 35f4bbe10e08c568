use thiserror::Error;

/// Why strict macro resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MacroError {
    #[error("unresolved macro: ${{{name}}}")]
    Unresolved { name: String },

    #[error("macro cycle detected: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("macro syntax error at offset {position}: {reason}")]
    Syntax {
        position: usize,
        reason: &'static str,
    },
}
