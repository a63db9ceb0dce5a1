//! Per-run set of content fingerprints that have already been saved.

use std::collections::HashSet;

/// Fingerprints recorded during one batch. Never persisted; a new batch starts empty.
#[derive(Debug, Default, Clone)]
pub struct SeenHashes {
    hashes: HashSet<String>,
}

impl SeenHashes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test-and-set: records `fingerprint` and returns true if it was not already present.
    /// Returns false (and leaves the set unchanged) for a repeat.
    pub fn insert(&mut self, fingerprint: &str) -> bool {
        if self.hashes.contains(fingerprint) {
            return false;
        }
        self.hashes.insert(fingerprint.to_string())
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.hashes.contains(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}
