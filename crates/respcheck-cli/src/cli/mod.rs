//! CLI for respcheck.

mod commands;
mod progress;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use respcheck_core::config::{self, RespcheckConfig};
use respcheck_core::store::{SheetsApi, TabularStore, WorkbookFile};
use std::path::PathBuf;

use commands::{run_check, run_probe, run_sheets};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "respcheck")]
#[command(
    about = "Check HTTP response codes for the URLs in a spreadsheet and write them back",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Where the sheets live. Without either flag, `default_spreadsheet` from the config is used.
#[derive(Debug, Clone, Default, Args)]
pub struct StoreArgs {
    /// JSON workbook file.
    #[arg(long, value_name = "PATH", conflicts_with = "spreadsheet")]
    pub workbook: Option<PathBuf>,

    /// Google Sheets spreadsheet id or URL.
    #[arg(long, value_name = "ID")]
    pub spreadsheet: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List the sheets available for checking.
    Sheets {
        #[command(flatten)]
        store: StoreArgs,
    },

    /// Probe every URL in the selected sheets and write the response codes back.
    Check {
        #[command(flatten)]
        store: StoreArgs,

        /// Sheet to check (repeatable). All sheets when omitted.
        #[arg(long = "sheet", value_name = "NAME")]
        sheets: Vec<String>,

        /// Print every probed row after the summary.
        #[arg(long)]
        details: bool,

        /// Only print rows whose outcome contains this text (implies --details).
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Normalize and probe a single URL.
    Probe {
        /// URL as it would appear in a sheet cell.
        url: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Sheets { store } => {
                let store = open_store(&store, &cfg)?;
                run_sheets(&*store)?;
            }
            CliCommand::Check {
                store,
                sheets,
                details,
                filter,
            } => {
                let mut store = open_store(&store, &cfg)?;
                run_check(&mut *store, &cfg, &sheets, details, filter.as_deref())?;
            }
            CliCommand::Probe { url } => run_probe(&cfg, &url)?,
        }

        Ok(())
    }
}

/// Opens the store selected by the flags (or the configured default spreadsheet).
fn open_store(args: &StoreArgs, cfg: &RespcheckConfig) -> Result<Box<dyn TabularStore>> {
    if let Some(path) = &args.workbook {
        let store = WorkbookFile::open(path)
            .with_context(|| format!("opening workbook {}", path.display()))?;
        return Ok(Box::new(store));
    }
    let spreadsheet = args
        .spreadsheet
        .as_deref()
        .or(cfg.default_spreadsheet.as_deref())
        .context("no store given: pass --workbook or --spreadsheet, or set default_spreadsheet in the config")?;
    let store = SheetsApi::from_config(&cfg.sheets_api, spreadsheet)
        .with_context(|| format!("connecting to spreadsheet {}", spreadsheet))?;
    tracing::info!(spreadsheet = store.spreadsheet_id(), "using Google Sheets store");
    Ok(Box::new(store))
}

#[cfg(test)]
mod tests;
