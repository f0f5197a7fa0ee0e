//! Log setup for the CLI.
//!
//! Events go to `respcheck.log` under the XDG state dir. Probe and sheet work
//! run inside `probe{url}` and `sheet{name}` spans, so every line carries the
//! URL or sheet it belongs to.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Subscriber;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,respcheck_core=debug,respcheck=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `~/.local/state/respcheck/respcheck.log`
pub fn log_file_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("respcheck")?;
    Ok(xdg_dirs.get_state_home().join("respcheck.log"))
}

/// Subscriber appending plain-text lines to `path`, creating parent dirs.
pub fn file_subscriber(path: &Path) -> Result<impl Subscriber + Send + Sync + 'static> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .finish())
}

/// Installs the file subscriber globally. Errors leave no subscriber set, so
/// the caller can use [`init_logging_stderr`] instead.
pub fn init_logging() -> Result<()> {
    let path = log_file_path()?;
    let subscriber = file_subscriber(&path)?;
    tracing::subscriber::set_global_default(subscriber).context("installing log subscriber")?;
    tracing::info!(log = %path.display(), "respcheck logging initialized");
    Ok(())
}

pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
