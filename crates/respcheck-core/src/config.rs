use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Header the URLs are read from.
pub const DEFAULT_URL_COLUMN: &str = "Source";
/// Header the outcomes are written to (appended when missing).
pub const DEFAULT_STATUS_COLUMN: &str = "Response code";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP probe parameters (optional `[probe]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Timeout for one request attempt, in seconds. A probe makes at most two attempts.
    pub timeout_secs: u64,
    /// User-Agent header sent with every probe.
    pub user_agent: String,
    /// Maximum redirects followed per attempt.
    pub max_redirects: u32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_redirects: 30,
        }
    }
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Google Sheets REST access (optional `[sheets_api]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetsApiConfig {
    pub base_url: String,
    /// Environment variable holding the OAuth access token.
    pub token_env: String,
    /// Service-account key file, used when the token variable is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_key: Option<PathBuf>,
    /// Timeout for API requests, in seconds.
    pub timeout_secs: u64,
}

impl Default for SheetsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://sheets.googleapis.com".to_string(),
            token_env: "RESPCHECK_ACCESS_TOKEN".to_string(),
            service_account_key: None,
            timeout_secs: 30,
        }
    }
}

/// Column names used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Columns {
    pub url: String,
    pub status: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL_COLUMN.to_string(),
            status: DEFAULT_STATUS_COLUMN.to_string(),
        }
    }
}

/// Global configuration loaded from `~/.config/respcheck/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespcheckConfig {
    pub url_column: String,
    pub status_column: String,
    /// Spreadsheet used when the CLI gets neither `--workbook` nor `--spreadsheet`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_spreadsheet: Option<String>,
    pub probe: ProbeConfig,
    pub sheets_api: SheetsApiConfig,
}

impl Default for RespcheckConfig {
    fn default() -> Self {
        Self {
            url_column: DEFAULT_URL_COLUMN.to_string(),
            status_column: DEFAULT_STATUS_COLUMN.to_string(),
            default_spreadsheet: None,
            probe: ProbeConfig::default(),
            sheets_api: SheetsApiConfig::default(),
        }
    }
}

impl RespcheckConfig {
    pub fn columns(&self) -> Columns {
        Columns {
            url: self.url_column.clone(),
            status: self.status_column.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("respcheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RespcheckConfig> {
    load_or_init_at(&config_path()?)
}

pub fn load_or_init_at(path: &Path) -> Result<RespcheckConfig> {
    if !path.exists() {
        let default_cfg = RespcheckConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: RespcheckConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}
