pub mod config;
pub mod logging;

pub mod probe;
pub mod progress;
pub mod report;
pub mod run;
pub mod store;
pub mod url_model;
pub mod walker;
