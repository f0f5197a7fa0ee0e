//! `respcheck probe` – check a single URL.

use anyhow::Result;
use respcheck_core::config::RespcheckConfig;
use respcheck_core::probe::Prober;
use respcheck_core::url_model::normalize;

pub fn run_probe(cfg: &RespcheckConfig, raw: &str) -> Result<()> {
    let url = normalize(raw);
    if url.is_empty() {
        anyhow::bail!("empty URL");
    }
    let prober = Prober::from_config(&cfg.probe);
    if let Some(outcome) = prober.probe(&url) {
        println!("{}  {}", outcome, url);
    }
    Ok(())
}
