//! CLI command handlers, one per file.

mod check;
mod probe;
mod sheets;

pub use check::run_check;
pub use probe::run_probe;
pub use sheets::run_sheets;
