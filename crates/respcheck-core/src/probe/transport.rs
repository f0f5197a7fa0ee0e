//! HTTP transport used by the prober.

use super::error::ProbeError;
use crate::config::ProbeConfig;

/// One GET attempt that yields the final status code (after redirects).
pub trait Transport {
    fn get_status(&self, url: &str) -> Result<u32, ProbeError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get_status(&self, url: &str) -> Result<u32, ProbeError> {
        (**self).get_status(url)
    }
}

/// libcurl-backed transport.
///
/// Certificate and host-name verification are off: a probe reports
/// reachability, and sites with broken TLS still have a status to report.
#[derive(Debug, Clone)]
pub struct CurlTransport {
    options: ProbeConfig,
}

impl CurlTransport {
    pub fn new(options: ProbeConfig) -> Self {
        Self { options }
    }
}

impl Default for CurlTransport {
    fn default() -> Self {
        Self::new(ProbeConfig::default())
    }
}

/// Follows the header lines libcurl reports, across redirects.
#[derive(Debug, Default)]
struct HeaderWatch {
    code: u32,
    redirect: bool,
    /// Status of a response whose headers are complete and that curl will
    /// not follow.
    final_code: Option<u32>,
}

impl HeaderWatch {
    fn line(&mut self, raw: &[u8]) {
        let line = String::from_utf8_lossy(raw);
        let line = line.trim_end();
        if line.starts_with("HTTP/") {
            self.code = line
                .split_whitespace()
                .nth(1)
                .and_then(|c| c.parse().ok())
                .unwrap_or(0);
            self.redirect = false;
            self.final_code = None;
        } else if line.is_empty() {
            // 1xx interim responses are followed by the real one.
            if self.code >= 200 && !self.redirect {
                self.final_code = Some(self.code);
            }
        } else if let Some((name, _)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("location") && (300..400).contains(&self.code) {
                self.redirect = true;
            }
        }
    }
}

impl Transport for CurlTransport {
    fn get_status(&self, url: &str) -> Result<u32, ProbeError> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.options.max_redirects)?;
        easy.timeout(self.options.timeout())?;
        easy.useragent(&self.options.user_agent)?;
        easy.ssl_verify_peer(false)?;
        easy.ssl_verify_host(false)?;

        let mut headers = HeaderWatch::default();
        let mut body_started = false;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.header_function(|line| {
                headers.line(line);
                true
            })?;
            // Body is never inspected: stop at its first byte.
            transfer.write_function(|_| {
                body_started = true;
                Ok(0)
            })?;
            transfer.perform()
        };

        if let Err(e) = performed {
            let stopped_at_body = e.is_write_error() && body_started;
            let stalled_in_body = e.is_operation_timedout() && headers.final_code.is_some();
            if !(stopped_at_body || stalled_in_body) {
                return Err(e.into());
            }
        }

        let code = match easy.response_code()? {
            0 => headers.final_code.unwrap_or(0),
            code => code,
        };
        if code == 0 {
            return Err(ProbeError::Malformed(code));
        }
        Ok(code)
    }
}
