use thiserror::Error;

/// Why a single webhook delivery did not succeed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("endpoint responded with HTTP {status}")]
    Status { status: u16 },

    #[error("request timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },

    #[error("network error: {0}")]
    Network(String),

    #[error("payload could not be encoded: {0}")]
    Encode(String),
}
