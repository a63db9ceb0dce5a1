//! Fetch-validate-dedupe-persist pipeline for a single URL.
//!
//! `fetch_image` turns one URL into exactly one [`FetchResult`]. At most one
//! file is written; nothing is retried and no error escapes the call.

use crate::checksum;
use crate::config::FetchPolicy;
use crate::outcome::{FetchResult, SizeSource};
use crate::seen::SeenHashes;
use crate::storage;
use crate::transport::{Response, Transport};
use crate::url_model;
use anyhow::{Context, Result};
use std::path::Path;

/// Fetches `url` and classifies it against `policy`, saving new content
/// under `target_dir`.
///
/// `seen` gains the content fingerprint only when the content is new; the
/// fingerprint stays recorded even if writing the file then fails.
pub fn fetch_image<T: Transport + ?Sized>(
    transport: &T,
    url: &str,
    policy: &FetchPolicy,
    seen: &mut SeenHashes,
    target_dir: &Path,
) -> FetchResult {
    let response = match transport.get(url, policy) {
        Ok(response) => response,
        Err(e) if e.is_network() => {
            tracing::debug!(url, error = %e, "transport failure");
            return FetchResult::FailedNetwork {
                message: e.to_string(),
            };
        }
        Err(e) => {
            tracing::warn!(url, error = %e, "unusable response");
            return FetchResult::FailedOther {
                message: e.to_string(),
            };
        }
    };

    match classify_and_store(url, response, policy, seen, target_dir) {
        Ok(result) => result,
        Err(e) => {
            tracing::warn!(url, "processing failed: {:#}", e);
            FetchResult::FailedOther {
                message: format!("{:#}", e),
            }
        }
    }
}

/// Policy checks, dedupe and write, in that order. Errors are unexpected failures.
fn classify_and_store(
    url: &str,
    response: Response,
    policy: &FetchPolicy,
    seen: &mut SeenHashes,
    target_dir: &Path,
) -> Result<FetchResult> {
    let mime_type = response.headers.content_type();
    if !mime_type.starts_with(policy.required_mime_prefix.as_str()) {
        return Ok(FetchResult::SkippedNotImage {
            mime_type: mime_type.to_string(),
        });
    }

    if let Some(raw) = response.headers.content_length() {
        let declared: u64 = raw
            .trim()
            .parse()
            .with_context(|| format!("invalid Content-Length header {:?}", raw))?;
        if declared > policy.max_bytes {
            return Ok(FetchResult::SkippedTooLarge {
                actual_bytes: declared,
                source: SizeSource::Declared,
            });
        }
    }

    // Covers a missing or understated Content-Length.
    let actual = response.body_len.max(response.body.len() as u64);
    if actual > policy.max_bytes {
        let source = if response.body_complete {
            SizeSource::Actual
        } else {
            SizeSource::Partial
        };
        return Ok(FetchResult::SkippedTooLarge {
            actual_bytes: actual,
            source,
        });
    }

    let fingerprint = checksum::sha256_hex(&response.body);
    if !seen.insert(&fingerprint) {
        tracing::debug!(url, %fingerprint, "duplicate content");
        return Ok(FetchResult::SkippedDuplicate);
    }

    let file_name = url_model::derive_filename(url);
    let path = storage::save_new(target_dir, &file_name, &response.body)?;
    tracing::info!(
        url,
        path = %path.display(),
        bytes = response.body.len(),
        %fingerprint,
        "saved"
    );
    Ok(FetchResult::Saved { file_name, path })
}
