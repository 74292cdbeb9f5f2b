//! Build artifact cleanup.
//!
//! - [`wildcard_rm`] removes every match of one pattern in the working directory
//! - [`remove_matching`] does the same inside a given directory
//! - [`clean`] runs every pattern of a space-delimited list in each directory
//!
//! Directories are addressed by path; the process working directory is never
//! changed.

use super::args::split_tokens;
use super::glob::Pattern;
use crate::error::CookError;
use colored::*;
use std::fs;
use std::path::{Path, PathBuf};

/// A file that matched but could not be removed.
#[derive(Debug)]
pub struct DeleteWarning {
    pub path: PathBuf,
    pub error: std::io::Error,
}

#[derive(Debug, Default)]
pub struct CleanReport {
    pub removed: Vec<PathBuf>,
    pub warnings: Vec<DeleteWarning>,
}

impl CleanReport {
    fn merge(&mut self, other: CleanReport) {
        self.removed.extend(other.removed);
        self.warnings.extend(other.warnings);
    }

    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.warnings.is_empty()
    }
}

/// Remove every match of `pattern` in the current working directory.
pub fn wildcard_rm(pattern: &str) -> Result<CleanReport, CookError> {
    remove_matching(Path::new("."), pattern)
}

/// Remove every match of `pattern` under `dir`.
///
/// A malformed pattern or an unreadable directory fails before anything is
/// deleted. Per-file failures are warnings.
pub fn remove_matching(dir: &Path, pattern: &str) -> Result<CleanReport, CookError> {
    remove_in(dir, dir, pattern)
}

fn remove_in(root: &Path, shown: &Path, pattern: &str) -> Result<CleanReport, CookError> {
    let matches = Pattern::new(pattern)?.expand(root)?;
    let mut report = CleanReport::default();

    for path in matches {
        let display = display_path(root, shown, &path);
        println!("Removing: {}", display.display());
        match remove_path(&path) {
            Ok(()) => report.removed.push(path),
            Err(error) => {
                eprintln!(
                    "{} WARNING: failed to remove {}: {}",
                    "!".yellow(),
                    display.display(),
                    error
                );
                report.warnings.push(DeleteWarning { path, error });
            }
        }
    }

    Ok(report)
}

/// Run every pattern in `patterns` inside each of `dirs`, in order.
///
/// Relative directories are resolved against the working directory captured
/// at the start. The first failure aborts the remaining patterns and
/// directories; whatever was already removed stays removed.
pub fn clean<P: AsRef<Path>>(dirs: &[P], patterns: &str) -> Result<CleanReport, CookError> {
    let cwd = std::env::current_dir().map_err(CookError::CwdQuery)?;
    let patterns = split_tokens(patterns);
    let mut report = CleanReport::default();

    for dir in dirs {
        let dir = dir.as_ref();
        let target = cwd.join(dir);
        enter_dir(&target, dir)?;

        for pattern in &patterns {
            report.merge(remove_in(&target, dir, pattern)?);
        }
    }

    Ok(report)
}

fn enter_dir(target: &Path, dir: &Path) -> Result<(), CookError> {
    let meta = fs::metadata(target).map_err(|source| CookError::DirectoryChange {
        dir: dir.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(CookError::DirectoryChange {
            dir: dir.to_path_buf(),
            source: std::io::Error::other("not a directory"),
        });
    }
    Ok(())
}

// Matched directories are only removed when empty, like remove(3).
fn remove_path(path: &Path) -> std::io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

fn display_path(root: &Path, shown: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) if shown == Path::new(".") => rel.to_path_buf(),
        Ok(rel) => shown.join(rel),
        Err(_) => path.to_path_buf(),
    }
}
