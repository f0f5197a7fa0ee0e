//! Minimal JSON-over-HTTPS client for the Sheets API (libcurl).

use crate::store::StoreError;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Method {
    Get,
    Put,
    Post,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Put => "PUT",
            Method::Post => "POST",
        }
    }
}

#[derive(Clone)]
pub(crate) struct ApiClient {
    token: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiClient {
    pub(crate) fn new(token: String, timeout: Duration) -> Self {
        Self {
            token: Some(token),
            timeout,
        }
    }

    /// Client without credentials, for the token endpoint.
    pub(crate) fn anonymous(timeout: Duration) -> Self {
        Self { token: None, timeout }
    }

    /// Sends one request with an optional JSON body.
    pub(crate) fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<serde_json::Value, StoreError> {
        let payload = body.map(|b| b.to_string());
        let body = payload
            .as_deref()
            .map(|p| ("application/json", p.as_bytes()));
        self.send(method, url, body)
    }

    /// Sends one request; `body` is `(content type, bytes)`. Returns the
    /// parsed JSON response body.
    pub(crate) fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<(&str, &[u8])>,
    ) -> Result<serde_json::Value, StoreError> {
        let mut response: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.timeout(self.timeout)?;
        easy.follow_location(true)?;

        let mut headers = curl::easy::List::new();
        if let Some(token) = &self.token {
            headers.append(&format!("Authorization: Bearer {}", token))?;
        }
        headers.append("Accept: application/json")?;

        match (method, body) {
            (Method::Get, _) => easy.get(true)?,
            (_, body) => {
                let (content_type, bytes) = body.unwrap_or(("application/json", &[][..]));
                headers.append(&format!("Content-Type: {}", content_type))?;
                easy.custom_request(method.as_str())?;
                easy.post_fields_copy(bytes)?;
            }
        }
        easy.http_headers(headers)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                response.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = easy.response_code()?;
        tracing::debug!(method = method.as_str(), url, status, "sheets api request");
        if !(200..300).contains(&status) {
            return Err(StoreError::Api {
                status,
                message: error_message(&response),
            });
        }
        if response.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&response)?)
    }
}

/// Pulls `error.message` out of a Google API error body, or falls back to the raw text.
pub(crate) fn error_message(body: &[u8]) -> String {
    serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| String::from_utf8_lossy(body).trim().to_string())
}
