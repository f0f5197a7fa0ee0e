//! Run pipeline: pre-scan selected sheets, probe every URL, write one batch of
//! status cells per sheet.
//!
//! Store failures while reading sheets or adding the status column abort the
//! run before anything is probed. A rejected batch write only marks that sheet
//! as unsaved; its results stay in the report.

use crate::config::Columns;
use crate::probe::{Prober, Transport};
use crate::progress::{ProgressSink, ProgressTracker};
use crate::report::{cell_writes, RunReport, SheetSummary, SkipReason, WriteStatus};
use crate::store::{SheetData, TabularStore};
use crate::walker::{self, walk_sheet};
use anyhow::{Context, Result};

/// A sheet loaded by the pre-scan.
#[derive(Debug, Clone)]
struct Prepared {
    data: SheetData,
    /// 1-based status column; `None` for skipped sheets.
    status_column: Option<usize>,
    skipped: Option<SkipReason>,
}

/// Loads every selected sheet, adds the status column where the URL column
/// exists, and counts URLs. Returns the sheets and the grand total.
fn prescan<S>(store: &mut S, sheets: &[String], columns: &Columns) -> Result<(Vec<Prepared>, usize)>
where
    S: TabularStore + ?Sized,
{
    let mut prepared = Vec::with_capacity(sheets.len());
    let mut total = 0usize;

    for name in sheets {
        let _span = tracing::info_span!("sheet", name = %name).entered();
        let mut data = store
            .read_sheet(name)
            .with_context(|| format!("reading sheet '{}'", name))?;
        let skipped = walker::skip_reason(&data, &columns.url);
        let status_column = match (skipped, walker::locate_column(&data.header, &columns.url)) {
            (None, Some(url_col)) => {
                total += walker::count_urls(&data.rows, url_col);
                let col = store
                    .ensure_column(name, &mut data.header, &columns.status)
                    .with_context(|| format!("adding '{}' column to sheet '{}'", columns.status, name))?;
                Some(col)
            }
            _ => {
                if skipped == Some(SkipReason::MissingUrlColumn) {
                    tracing::warn!(column = %columns.url, "URL column not found, sheet skipped");
                }
                None
            }
        };
        prepared.push(Prepared {
            data,
            status_column,
            skipped,
        });
    }

    Ok((prepared, total))
}

/// Probes the URLs of `sheets` (in the given order) and writes the outcomes
/// back into the status column.
pub fn run_checks<S, T, P>(
    store: &mut S,
    prober: &Prober<T>,
    sheets: &[String],
    columns: &Columns,
    progress: &mut P,
) -> Result<RunReport>
where
    S: TabularStore + ?Sized,
    T: Transport,
    P: ProgressSink + ?Sized,
{
    let (prepared, total) = prescan(store, sheets, columns)?;
    tracing::info!(sheets = prepared.len(), urls = total, "pre-scan complete");

    let mut report = RunReport::new();
    if total == 0 {
        tracing::warn!(column = %columns.url, "no URLs found in the selected sheets");
        for p in prepared {
            let summary = match p.skipped {
                Some(reason) => SheetSummary::skipped(p.data.name, reason),
                None => SheetSummary::new(p.data.name),
            };
            report.push_sheet(summary, Vec::new());
        }
        return Ok(report);
    }

    let mut tracker = ProgressTracker::new(total);

    for p in prepared {
        let _span = tracing::info_span!("sheet", name = %p.data.name).entered();
        let walk = walk_sheet(&p.data, &columns.url, prober, |_, sheet| {
            tracker.advance();
            let line = tracker.status_line(&sheet.sheet, sheet.processed_urls, sheet.total_urls);
            progress.update(tracker.fraction(), &line);
        });
        let mut summary = walk.summary;

        if let Some(status_column) = p.status_column {
            let writes = cell_writes(&walk.rows, status_column);
            if !writes.is_empty() {
                summary.write = match store.write_cells(&summary.sheet, &writes) {
                    Ok(()) => {
                        tracing::info!(cells = writes.len(), "status cells saved");
                        WriteStatus::Saved
                    }
                    Err(e) => {
                        tracing::warn!("batch write failed, results not saved: {}", e);
                        WriteStatus::Failed(e.to_string())
                    }
                };
            }
        }

        report.push_sheet(summary, walk.rows);
    }

    tracing::info!(
        total = report.total_urls(),
        processed = report.processed_urls(),
        "run complete"
    );
    Ok(report)
}
