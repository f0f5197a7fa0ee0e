//! Tabular store errors.

use thiserror::Error;

/// Failure talking to the store. Any of these aborts a run, except during the
/// per-sheet batch write where the failure is recorded on the sheet instead.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sheet '{0}' not found")]
    SheetNotFound(String),
    #[error("no credentials: set the {0} environment variable or `service_account_key` in config")]
    MissingToken(String),
    #[error("service account assertion: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("API request failed with HTTP {status}: {message}")]
    Api { status: u32, message: String },
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("HTTP transport: {0}")]
    Curl(#[from] curl::Error),
    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}
