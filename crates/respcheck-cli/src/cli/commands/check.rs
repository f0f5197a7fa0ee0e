//! `respcheck check` – probe the selected sheets and write results back.

use anyhow::{Context, Result};
use respcheck_core::config::RespcheckConfig;
use respcheck_core::probe::Prober;
use respcheck_core::report::{RowResult, RunReport, WriteStatus};
use respcheck_core::run::run_checks;
use respcheck_core::store::TabularStore;

use crate::cli::progress::TerminalProgress;

pub fn run_check(
    store: &mut dyn TabularStore,
    cfg: &RespcheckConfig,
    sheets: &[String],
    details: bool,
    filter: Option<&str>,
) -> Result<()> {
    let selected = if sheets.is_empty() {
        store.list_sheets().context("listing sheets")?
    } else {
        sheets.to_vec()
    };
    if selected.is_empty() {
        println!("No sheets to check.");
        return Ok(());
    }

    let prober = Prober::from_config(&cfg.probe);
    let mut progress = TerminalProgress::new();
    let report = run_checks(store, &prober, &selected, &cfg.columns(), &mut progress)?;
    progress.finish();

    if report.total_urls() == 0 {
        println!(
            "No URLs found in column '{}' on the selected sheets.",
            cfg.url_column
        );
    }
    print_summary(&report);

    if details || filter.is_some() {
        println!();
        match filter {
            Some(text) => print_rows(report.rows_matching(text)),
            None => print_rows(report.rows.iter()),
        }
    }

    let unsaved: Vec<&str> = report.unsaved_sheets().map(|s| s.sheet.as_str()).collect();
    if !unsaved.is_empty() {
        anyhow::bail!(
            "results were probed but not saved for: {}",
            unsaved.join(", ")
        );
    }
    Ok(())
}

fn print_summary(report: &RunReport) {
    println!(
        "{:<24} {:>6} {:>10}  {}",
        "SHEET", "URLS", "PROCESSED", "NOTE"
    );
    for s in &report.sheets {
        let note = match (&s.skipped, &s.write) {
            (Some(reason), _) => format!("skipped: {}", reason),
            (None, WriteStatus::Failed(e)) => format!("not saved: {}", e),
            (None, WriteStatus::Saved) => "saved".to_string(),
            (None, WriteStatus::NotNeeded) => String::new(),
        };
        println!(
            "{:<24} {:>6} {:>10}  {}",
            s.sheet, s.total_urls, s.processed_urls, note
        );
    }
    println!(
        "Total URLs found: {}, processed: {}",
        report.total_urls(),
        report.processed_urls()
    );
}

fn print_rows<'a>(rows: impl Iterator<Item = &'a RowResult>) {
    println!("{:<24} {:>5}  {:<16} {}", "SHEET", "ROW", "STATUS", "URL");
    for r in rows {
        println!(
            "{:<24} {:>5}  {:<16} {}",
            r.sheet,
            r.row,
            r.outcome.to_string(),
            r.url
        );
    }
}
