//! Source tree scanning.
//!
//! Recursively walks a directory and produces the files to package, with
//! relative paths normalized to forward slashes.

use std::path::{Path, PathBuf};

use crate::error::PackageError;
use crate::exclude::ExcludeRules;

/// A file selected for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path inside the archive, `/`-separated.
    pub relative_path: String,
    /// Path on disk.
    pub path: PathBuf,
    pub size: u64,
}

/// Scans `root` and returns the files to package, sorted by relative path,
/// plus their total size in bytes.
///
/// Excluded directories are not descended into. Symlinks are skipped.
pub fn scan_source_files(
    root: &Path,
    rules: &ExcludeRules,
) -> Result<(Vec<SourceFile>, u64), PackageError> {
    let mut files = Vec::new();
    let mut total_size = 0;

    walk_dir(root, root, rules, &mut files, &mut total_size)?;
    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    Ok((files, total_size))
}

fn walk_dir(
    root: &Path,
    current: &Path,
    rules: &ExcludeRules,
    files: &mut Vec<SourceFile>,
    total_size: &mut u64,
) -> Result<(), PackageError> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        let rel_path = path.strip_prefix(root).map_err(std::io::Error::other)?;

        if rules.is_excluded(rel_path) {
            continue;
        }

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            walk_dir(root, &path, rules, files, total_size)?;
        } else if file_type.is_file() {
            let size = entry.metadata()?.len();
            files.push(SourceFile {
                relative_path: rel_path.to_string_lossy().replace('\\', "/"),
                path,
                size,
            });
            *total_size += size;
        }
    }

    Ok(())
}
