//! Transport failure type for a single probe attempt.

use thiserror::Error;

/// Why one request attempt produced no usable status code.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Curl reported an error (DNS, connect, TLS, timeout, ...).
    #[error("{0}")]
    Curl(#[from] curl::Error),
    /// The transfer finished but no valid status code came back.
    #[error("malformed response: status code {0}")]
    Malformed(u32),
}
