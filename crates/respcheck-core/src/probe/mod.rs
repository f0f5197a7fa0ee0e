//! HTTP status probing.
//!
//! A probe is one GET against a normalized URL. When an `https` attempt fails
//! at the transport level, exactly one retry is made against the same URL with
//! the scheme switched to `http`. Whatever happens, the caller gets a
//! [`ProbeOutcome`] value; no per-URL failure is ever returned as an error.

mod classify;
mod error;
mod transport;

pub use classify::{classify, classify_curl_error, FailureKind};
pub use error::ProbeError;
pub use transport::{CurlTransport, Transport};

use crate::config::ProbeConfig;
use crate::url_model::http_fallback;
use std::fmt;

/// Cell text written when no HTTP response could be obtained.
pub const SITE_NOT_FOUND: &str = "Site Not Found";

/// Result of probing one URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// Final HTTP status code, passed through without interpretation.
    Status(u32),
    /// No response after all attempts.
    NotFound,
}

impl ProbeOutcome {
    pub fn code(self) -> Option<u32> {
        match self {
            ProbeOutcome::Status(code) => Some(code),
            ProbeOutcome::NotFound => None,
        }
    }

    /// Text stored in the status column.
    pub fn cell_value(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Status(code) => write!(f, "{}", code),
            ProbeOutcome::NotFound => f.write_str(SITE_NOT_FOUND),
        }
    }
}

/// Issues probes through a [`Transport`].
#[derive(Debug, Clone)]
pub struct Prober<T = CurlTransport> {
    transport: T,
}

impl Prober<CurlTransport> {
    pub fn from_config(cfg: &ProbeConfig) -> Self {
        Self::new(CurlTransport::new(cfg.clone()))
    }
}

impl<T: Transport> Prober<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Probes `url` and reduces the result to an outcome.
    ///
    /// Returns `None` for an empty URL (nothing probed). Any other input yields
    /// `Some`, at most two transport attempts later.
    pub fn probe(&self, url: &str) -> Option<ProbeOutcome> {
        if url.is_empty() {
            return None;
        }
        let _span = tracing::debug_span!("probe", url).entered();

        let err = match self.attempt(url) {
            Ok(code) => return Some(ProbeOutcome::Status(code)),
            Err(e) => e,
        };

        let Some(fallback) = http_fallback(url) else {
            tracing::debug!(kind = %classify(&err), "probe failed: {}", err);
            return Some(ProbeOutcome::NotFound);
        };

        tracing::debug!(
            fallback = %fallback,
            kind = %classify(&err),
            "https probe failed, retrying over http: {}",
            err
        );
        match self.attempt(&fallback) {
            Ok(code) => Some(ProbeOutcome::Status(code)),
            Err(e) => {
                tracing::debug!(url = %fallback, kind = %classify(&e), "fallback probe failed: {}", e);
                Some(ProbeOutcome::NotFound)
            }
        }
    }

    fn attempt(&self, url: &str) -> Result<u32, ProbeError> {
        let code = self.transport.get_status(url)?;
        tracing::trace!(attempt = url, code, "probe response");
        Ok(code)
    }
}
