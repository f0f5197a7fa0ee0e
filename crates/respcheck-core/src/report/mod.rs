//! Run results: per-sheet summaries plus the flat list of row results.
//!
//! A [`RunReport`] is built while sheets are walked and handed back to the
//! caller, which keeps it for as long as it wants to render or filter it.

mod types;

pub use types::{CellWrite, RowResult, SheetSummary, SkipReason, WriteStatus};

/// Everything one invocation produced, in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub sheets: Vec<SheetSummary>,
    pub rows: Vec<RowResult>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finished sheet and its rows.
    pub fn push_sheet(&mut self, summary: SheetSummary, rows: Vec<RowResult>) {
        self.sheets.push(summary);
        self.rows.extend(rows);
    }

    pub fn total_urls(&self) -> usize {
        self.sheets.iter().map(|s| s.total_urls).sum()
    }

    pub fn processed_urls(&self) -> usize {
        self.sheets.iter().map(|s| s.processed_urls).sum()
    }

    pub fn sheet(&self, name: &str) -> Option<&SheetSummary> {
        self.sheets.iter().find(|s| s.sheet == name)
    }

    pub fn rows_for_sheet<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a RowResult> + 'a {
        self.rows.iter().filter(move |r| r.sheet == name)
    }

    /// Rows whose outcome text contains `needle` (case-insensitive), e.g. `"404"`
    /// or `"not found"`.
    pub fn rows_matching<'a>(&'a self, needle: &str) -> impl Iterator<Item = &'a RowResult> + 'a {
        let needle = needle.to_lowercase();
        self.rows
            .iter()
            .filter(move |r| r.outcome.to_string().to_lowercase().contains(&needle))
    }

    /// Sheets whose results were probed but could not be saved.
    pub fn unsaved_sheets(&self) -> impl Iterator<Item = &SheetSummary> {
        self.sheets
            .iter()
            .filter(|s| matches!(s.write, WriteStatus::Failed(_)))
    }
}

/// Status-column updates for a sheet's rows.
pub fn cell_writes(rows: &[RowResult], status_column: usize) -> Vec<CellWrite> {
    rows.iter()
        .map(|r| CellWrite {
            row: r.row,
            column: status_column,
            value: r.outcome.cell_value(),
        })
        .collect()
}
