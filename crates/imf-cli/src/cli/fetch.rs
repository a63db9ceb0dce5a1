//! Runs one batch and prints a status line per URL.

use anyhow::Result;
use imf_core::batch::{Batch, BatchSummary};
use imf_core::config::FetchPolicy;
use imf_core::transport::CurlTransport;
use std::path::Path;

/// Creates `target_dir`, fetches every URL in order and prints the outcome lines.
/// Per-URL failures are reported, never returned; only directory creation can fail.
pub fn run_fetch(urls: &[String], target_dir: &Path, policy: FetchPolicy) -> Result<()> {
    let mut batch = Batch::new(CurlTransport::new(), policy, target_dir);
    batch.prepare()?;

    let summary = batch.run(urls, |url, result| println!("{}", result.line(url)));

    println!();
    println!("{}", counts_line(&summary));
    println!("📦 All done. Images saved in '{}'.", target_dir.display());
    println!("🤝 Connection strengthened. Community enriched.");
    Ok(())
}

fn counts_line(summary: &BatchSummary) -> String {
    format!(
        "Processed {} URL(s): {} saved, {} skipped, {} failed.",
        summary.total(),
        summary.saved,
        summary.skipped,
        summary.failed
    )
}
