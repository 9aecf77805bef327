use crate::aspect::AspectError;
use std::process::ExitStatus;

/// Errors from the external media tools and the fast-start pipeline
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Invalid {tool} path: {path}")]
    InvalidToolPath { tool: &'static str, path: String },

    #[error("Failed to run {tool}: {source}")]
    Spawn {
        tool: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} failed with {status}: {stderr}")]
    CommandFailed {
        tool: &'static str,
        status: ExitStatus,
        stderr: String,
    },

    #[error("Unexpected {tool} output: {reason}")]
    InvalidOutput { tool: &'static str, reason: String },

    #[error(transparent)]
    Aspect(#[from] AspectError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
