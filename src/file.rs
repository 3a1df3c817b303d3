//! Bootstrap file discovery.
//!
//! The walker checks `{dir}/{file_name}` in the start directory and, in
//! [`WalkMode::Upward`], in every parent up to the filesystem root (the first
//! directory with no parent). The nearest match wins.
//!
//! Only regular files match. During an upward walk a directory that happens
//! to carry the bootstrap name is skipped like a miss; in
//! [`WalkMode::SingleDirectory`] the path was named explicitly, so anything
//! other than a regular file is reported as [`MandrelError::NotAFile`].
//! Missing entries are silently skipped. Other I/O errors (a symlink loop,
//! a permission failure) are propagated in single-directory mode and logged
//! then skipped during an upward walk.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::MandrelError;
use crate::types::WalkMode;

/// A bootstrap file located by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Discovered {
    /// Directory holding the file; becomes the root when the root is not forced.
    pub dir: PathBuf,
    /// `dir.join(file_name)`.
    pub file: PathBuf,
}

/// Directories the walker visits from `start`, nearest first.
pub(crate) fn candidate_dirs(start: &Path, mode: WalkMode) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let mut current = start;

    loop {
        dirs.push(current.to_path_buf());

        if mode == WalkMode::SingleDirectory {
            break;
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => break, // reached root
        }
    }

    dirs
}

/// Look for `file_name` starting at `start`.
///
/// Returns `Ok(None)` when no directory holds the file. Whether that is fatal
/// is the caller's call.
pub(crate) fn find_bootstrap(
    start: &Path,
    file_name: &str,
    mode: WalkMode,
) -> Result<Option<Discovered>, MandrelError> {
    for dir in candidate_dirs(start, mode) {
        let file = dir.join(file_name);
        tracing::trace!(path = %file.display(), "checking for bootstrap file");

        match std::fs::metadata(&file) {
            Ok(meta) if meta.is_file() => return Ok(Some(Discovered { dir, file })),
            Ok(_) if mode == WalkMode::SingleDirectory => {
                return Err(MandrelError::NotAFile(file));
            }
            Ok(_) => continue,
            Err(e) if is_absent(&e) => continue,
            Err(e) if mode == WalkMode::Upward => {
                tracing::debug!(path = %file.display(), error = %e, "skipping unreadable candidate");
                continue;
            }
            Err(e) => {
                return Err(MandrelError::IoError {
                    path: file,
                    source: e,
                });
            }
        }
    }
    Ok(None)
}

fn is_absent(e: &std::io::Error) -> bool {
    matches!(e.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory)
}
