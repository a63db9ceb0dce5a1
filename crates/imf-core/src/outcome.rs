//! Terminal outcome of fetching one URL, and its console line.

use std::fmt;
use std::path::PathBuf;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Where an over-size figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSource {
    /// `Content-Length` header.
    Declared,
    /// Bytes actually received.
    Actual,
    /// Bytes received before the transfer was abandoned; the body is at least this large.
    Partial,
}

/// Exactly one of these is produced per URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResult {
    /// Written to `path`; `file_name` is the name derived from the URL before collision suffixes.
    Saved { file_name: String, path: PathBuf },
    SkippedNotImage { mime_type: String },
    SkippedTooLarge { actual_bytes: u64, source: SizeSource },
    SkippedDuplicate,
    FailedNetwork { message: String },
    FailedOther { message: String },
}

/// Coarse grouping used for batch totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Saved,
    Skipped,
    Failed,
}

impl FetchResult {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            FetchResult::Saved { .. } => OutcomeKind::Saved,
            FetchResult::SkippedNotImage { .. }
            | FetchResult::SkippedTooLarge { .. }
            | FetchResult::SkippedDuplicate => OutcomeKind::Skipped,
            FetchResult::FailedNetwork { .. } | FetchResult::FailedOther { .. } => {
                OutcomeKind::Failed
            }
        }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, FetchResult::Saved { .. })
    }

    /// Console line for this outcome of `url`.
    pub fn line<'a>(&'a self, url: &'a str) -> ConsoleLine<'a> {
        ConsoleLine { url, result: self }
    }
}

/// `Display` adapter rendering the fixed-prefix status line.
pub struct ConsoleLine<'a> {
    url: &'a str,
    result: &'a FetchResult,
}

impl fmt::Display for ConsoleLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let url = self.url;
        match self.result {
            FetchResult::Saved { file_name, path } => {
                write!(f, "✓ Saved: {} → {}", file_name, path.display())
            }
            FetchResult::SkippedNotImage { mime_type } => write!(
                f,
                "✗ Skipping {}: Content-Type is not an image ({})",
                url, mime_type
            ),
            FetchResult::SkippedTooLarge {
                actual_bytes,
                source,
            } => {
                let mb = *actual_bytes as f64 / BYTES_PER_MB;
                let (label, bound) = match source {
                    SizeSource::Declared => ("File size too large", ""),
                    SizeSource::Actual => ("Actual file size too large", ""),
                    SizeSource::Partial => ("Actual file size too large", "over "),
                };
                write!(f, "✗ Skipping {}: {} ({}{:.2} MB)", url, label, bound, mb)
            }
            FetchResult::SkippedDuplicate => write!(f, "⚠ Duplicate image skipped: {}", url),
            FetchResult::FailedNetwork { message } => {
                write!(f, "✗ Network error while fetching {}: {}", url, message)
            }
            FetchResult::FailedOther { message } => {
                write!(f, "✗ Error processing {}: {}", url, message)
            }
        }
    }
}
