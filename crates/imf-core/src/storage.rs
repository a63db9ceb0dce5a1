//! Disk I/O for saved images.
//!
//! Every file is created with `create_new` (O_CREAT|O_EXCL), so picking a free
//! name and claiming it is one atomic step and an existing file is never
//! overwritten. Names collide into `base_1.ext`, `base_2.ext`, ...

use crate::url_model::split_extension;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Candidate path for the `counter`-th attempt; 0 is the unsuffixed name.
pub fn candidate_path(dir: &Path, file_name: &str, counter: u64) -> PathBuf {
    if counter == 0 {
        return dir.join(file_name);
    }
    let (base, ext) = split_extension(file_name);
    dir.join(format!("{base}_{counter}{ext}"))
}

/// Creates a new, empty file under `dir`, probing `file_name`, then `_1`, `_2`, ...
/// until a name that does not exist yet is claimed. Returns the path and the open file.
pub fn create_unique(dir: &Path, file_name: &str) -> Result<(PathBuf, File)> {
    let mut counter = 0u64;
    loop {
        let candidate = candidate_path(dir, file_name, counter);
        match File::options().write(true).create_new(true).open(&candidate) {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                tracing::debug!(path = %candidate.display(), "name taken, probing next suffix");
                counter += 1;
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to create {}", candidate.display()));
            }
        }
    }
}

/// Writes `data` to a freshly created file under `dir` and syncs it. Returns the final path.
/// If the write fails the partially written file is removed.
pub fn save_new(dir: &Path, file_name: &str, data: &[u8]) -> Result<PathBuf> {
    let (path, mut file) = create_unique(dir, file_name)?;
    let written = file.write_all(data).and_then(|()| file.sync_all());
    if let Err(e) = written {
        drop(file);
        if let Err(rm) = std::fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), "failed to remove partial file: {}", rm);
        }
        return Err(e).with_context(|| format!("failed to write {}", path.display()));
    }
    Ok(path)
}
