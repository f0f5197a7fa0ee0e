//! Terminal progress sink: a single line redrawn on stderr.

use respcheck_core::progress::ProgressSink;
use std::io::Write;

const BAR_WIDTH: usize = 24;

#[derive(Debug, Default)]
pub struct TerminalProgress {
    drawn: bool,
}

impl TerminalProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the progress line so later output starts on a fresh line.
    pub fn finish(&mut self) {
        if self.drawn {
            eprintln!();
            self.drawn = false;
        }
    }
}

impl ProgressSink for TerminalProgress {
    fn update(&mut self, fraction: f64, line: &str) {
        let mut stderr = std::io::stderr().lock();
        let _ = write!(stderr, "\r\x1b[2K  {}  {:>5.1}%  {}", bar(fraction), fraction * 100.0, line);
        let _ = stderr.flush();
        self.drawn = true;
    }
}

impl Drop for TerminalProgress {
    fn drop(&mut self) {
        self.finish();
    }
}

pub(crate) fn bar(fraction: f64) -> String {
    let filled = ((fraction.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
