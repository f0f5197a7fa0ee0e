//! Value types produced by a run.

use crate::probe::ProbeOutcome;
use std::fmt;

/// Outcome of probing one spreadsheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowResult {
    pub sheet: String,
    /// 1-based row number; the header is row 1.
    pub row: usize,
    /// Normalized URL that was probed.
    pub url: String,
    pub outcome: ProbeOutcome,
}

/// Why a sheet produced no probes at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptySheet,
    MissingUrlColumn,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptySheet => f.write_str("empty sheet"),
            SkipReason::MissingUrlColumn => f.write_str("URL column missing"),
        }
    }
}

/// Whether a sheet's status cells made it back to the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WriteStatus {
    /// Nothing to write (skipped sheet or no URLs).
    #[default]
    NotNeeded,
    Saved,
    /// Probed but not saved; the batch write was rejected.
    Failed(String),
}

/// Per-sheet counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetSummary {
    pub sheet: String,
    /// Non-empty URL cells seen.
    pub total_urls: usize,
    /// Probes completed.
    pub processed_urls: usize,
    pub skipped: Option<SkipReason>,
    pub write: WriteStatus,
}

impl SheetSummary {
    pub fn new(sheet: impl Into<String>) -> Self {
        Self {
            sheet: sheet.into(),
            total_urls: 0,
            processed_urls: 0,
            skipped: None,
            write: WriteStatus::NotNeeded,
        }
    }

    pub fn skipped(sheet: impl Into<String>, reason: SkipReason) -> Self {
        Self {
            skipped: Some(reason),
            ..Self::new(sheet)
        }
    }
}

/// One addressed cell update (1-based row and column).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub row: usize,
    pub column: usize,
    pub value: String,
}
