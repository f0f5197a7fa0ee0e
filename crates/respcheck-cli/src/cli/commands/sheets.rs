//! `respcheck sheets` – list sheet names.

use anyhow::{Context, Result};
use respcheck_core::store::TabularStore;

pub fn run_sheets(store: &dyn TabularStore) -> Result<()> {
    let names = store.list_sheets().context("listing sheets")?;
    if names.is_empty() {
        println!("No sheets found.");
    } else {
        for name in names {
            println!("{}", name);
        }
    }
    Ok(())
}
