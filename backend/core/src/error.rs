use thiserror::Error;

/// A signal arrived without an argument its kind requires.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SignalError {
    #[error("signal {key} is missing its {argument} argument")]
    MissingArgument { key: String, argument: &'static str },

    #[error("signal {0} is not recognized")]
    Unrecognized(String),
}

/// Failure while looking a node up in the content store.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("lookup of node {identifier} in workspace {workspace} failed: {message}")]
    Lookup {
        identifier: String,
        workspace: String,
        message: String,
    },

    #[error("content store unavailable: {0}")]
    Unavailable(String),
}

/// Top-level error type for the nodehook runtime.
#[derive(Debug, Error)]
pub enum NodehookError {
    #[error(transparent)]
    Signal(#[from] SignalError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
