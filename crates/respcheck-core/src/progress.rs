//! Progress reporting for a run (URLs probed out of the pre-scanned total).
//!
//! The pipeline calls the sink after every probed row; sinks only observe
//! and cannot fail the run.

/// Receives progress after each probed row.
pub trait ProgressSink {
    /// `fraction` is in `[0.0, 1.0]` and never decreases during a run.
    fn update(&mut self, fraction: f64, line: &str);
}

/// Sink that drops every update.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&mut self, _fraction: f64, _line: &str) {}
}

impl<F: FnMut(f64, &str)> ProgressSink for F {
    fn update(&mut self, fraction: f64, line: &str) {
        self(fraction, line)
    }
}

/// Running count of probed URLs against the total found by the pre-scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressTracker {
    pub processed: usize,
    pub total: usize,
}

impl ProgressTracker {
    pub fn new(total: usize) -> Self {
        Self {
            processed: 0,
            total,
        }
    }

    pub fn advance(&mut self) {
        self.processed += 1;
    }

    /// Fraction complete in [0.0, 1.0].
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.processed as f64 / self.total as f64).min(1.0)
    }

    /// Human-readable line for the current sheet.
    pub fn status_line(&self, sheet: &str, sheet_done: usize, sheet_total: usize) -> String {
        format!(
            "sheet '{}': {} of {} (all sheets: {} / {})",
            sheet, sheet_done, sheet_total, self.processed, self.total
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_grows_and_caps() {
        let mut p = ProgressTracker::new(4);
        assert_eq!(p.fraction(), 0.0);
        p.advance();
        assert!((p.fraction() - 0.25).abs() < 1e-9);
        for _ in 0..5 {
            p.advance();
        }
        assert_eq!(p.fraction(), 1.0);
    }

    #[test]
    fn zero_total_is_complete() {
        assert_eq!(ProgressTracker::new(0).fraction(), 1.0);
    }

    #[test]
    fn status_line_format() {
        let mut p = ProgressTracker::new(10);
        p.advance();
        p.advance();
        assert_eq!(
            p.status_line("Links", 1, 3),
            "sheet 'Links': 1 of 3 (all sheets: 2 / 10)"
        );
    }

    #[test]
    fn closures_are_sinks() {
        let mut seen = Vec::new();
        {
            let mut sink = |f: f64, line: &str| seen.push((f, line.to_string()));
            sink.update(0.5, "half");
        }
        assert_eq!(seen, vec![(0.5, "half".to_string())]);
    }
}
