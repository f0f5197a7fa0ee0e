//! Classify transport failures for logging.
//!
//! The classification never changes the fallback decision; every failure is
//! treated the same way by the prober.

use super::error::ProbeError;
use std::fmt;

/// Coarse reason a probe attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Resolve,
    Connect,
    Tls,
    Malformed,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Resolve => "resolve",
            FailureKind::Connect => "connect",
            FailureKind::Tls => "tls",
            FailureKind::Malformed => "malformed",
            FailureKind::Other => "other",
        };
        f.write_str(s)
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_couldnt_resolve_host() || e.is_couldnt_resolve_proxy() {
        return FailureKind::Resolve;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cipher()
        || e.is_ssl_cacert()
    {
        return FailureKind::Tls;
    }
    if e.is_couldnt_connect()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_read_error()
    {
        return FailureKind::Connect;
    }
    if e.is_unsupported_protocol() || e.is_url_malformed() {
        return FailureKind::Malformed;
    }
    FailureKind::Other
}

/// Classify a probe error.
pub fn classify(e: &ProbeError) -> FailureKind {
    match e {
        ProbeError::Curl(ce) => classify_curl_error(ce),
        ProbeError::Malformed(_) => FailureKind::Malformed,
    }
}
