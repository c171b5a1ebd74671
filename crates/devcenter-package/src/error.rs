//! Packaging error types.

use std::path::PathBuf;

/// Errors produced while preparing a package archive.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid ignore pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("prebuilt package not found or not a file: {}", .0.display())]
    MissingArchive(PathBuf),

    #[error("nothing to package in {}: every file is excluded", .0.display())]
    Empty(PathBuf),
}
