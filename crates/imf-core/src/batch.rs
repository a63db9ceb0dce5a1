//! Sequential batch driver: one pipeline call per URL, one fresh duplicate set per batch.

use crate::config::FetchPolicy;
use crate::outcome::{FetchResult, OutcomeKind};
use crate::pipeline::fetch_image;
use crate::seen::SeenHashes;
use crate::transport::Transport;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Splits a comma-separated line into trimmed, non-empty URLs.
pub fn split_urls(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Totals for a finished batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, result: &FetchResult) {
        match result.kind() {
            OutcomeKind::Saved => self.saved += 1,
            OutcomeKind::Skipped => self.skipped += 1,
            OutcomeKind::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.saved + self.skipped + self.failed
    }
}

/// One run over a list of URLs. Owns the duplicate set for that run.
pub struct Batch<T: Transport> {
    transport: T,
    policy: FetchPolicy,
    target_dir: PathBuf,
    seen: SeenHashes,
}

impl<T: Transport> Batch<T> {
    pub fn new(transport: T, policy: FetchPolicy, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            policy,
            target_dir: target_dir.into(),
            seen: SeenHashes::new(),
        }
    }

    pub fn seen(&self) -> &SeenHashes {
        &self.seen
    }

    /// Creates the target directory (and parents) if absent.
    pub fn prepare(&self) -> Result<()> {
        std::fs::create_dir_all(&self.target_dir).with_context(|| {
            format!(
                "failed to create target directory {}",
                self.target_dir.display()
            )
        })
    }

    /// Fetches one URL with this batch's policy and duplicate set.
    pub fn fetch(&mut self, url: &str) -> FetchResult {
        fetch_image(
            &self.transport,
            url,
            &self.policy,
            &mut self.seen,
            &self.target_dir,
        )
    }

    /// Fetches every URL in order, handing each outcome to `on_result` as soon
    /// as it is known.
    pub fn run<S, F>(&mut self, urls: &[S], mut on_result: F) -> BatchSummary
    where
        S: AsRef<str>,
        F: FnMut(&str, &FetchResult),
    {
        let mut summary = BatchSummary::default();
        for url in urls {
            let url = url.as_ref();
            tracing::debug!(url, "fetching");
            let result = self.fetch(url);
            tracing::info!(url, outcome = ?result, "processed");
            summary.record(&result);
            on_result(url, &result);
        }
        tracing::info!(
            saved = summary.saved,
            skipped = summary.skipped,
            failed = summary.failed,
            "batch finished"
        );
        summary
    }
}
