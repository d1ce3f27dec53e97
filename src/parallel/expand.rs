//! Glob pattern expansion

use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{ImgaiError, Result};

/// Whether `pattern` contains any glob metacharacter
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(|c| matches!(c, '*' | '?' | '['))
}

/// Expand shell-style patterns into a list of paths
///
/// Results keep first-seen order across all patterns and never contain the
/// same path twice. A pattern without metacharacters is taken as a literal
/// path and passed through even if nothing exists there, leaving the
/// per-file operation to report it. A pattern that matches nothing
/// contributes nothing; an invalid pattern fails the whole expansion.
pub fn expand_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    // Keyed on the path text, so `a//b.jpg` and `a/b.jpg` stay distinct
    let mut seen: HashSet<OsString> = HashSet::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        if !is_glob(pattern) {
            let path = PathBuf::from(pattern);
            if seen.insert(path.as_os_str().to_os_string()) {
                files.push(path);
            }
            continue;
        }

        let paths = glob::glob(pattern).map_err(|source| ImgaiError::PatternExpansion {
            pattern: pattern.to_string(),
            source,
        })?;

        let before = files.len();
        for entry in paths {
            match entry {
                Ok(path) => {
                    if seen.insert(path.as_os_str().to_os_string()) {
                        files.push(path);
                    }
                }
                Err(e) => debug!("Skipping unreadable entry {:?}: {}", e.path(), e.error()),
            }
        }
        debug!("Pattern {:?} added {} files", pattern, files.len() - before);
    }

    Ok(files)
}
