//! Package archive creation.
//!
//! Produces the zip file handed to the uploader, either by packaging a
//! source directory into a temporary file or by validating a prebuilt one.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tempfile::TempPath;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

use crate::error::PackageError;
use crate::exclude::ExcludeRules;
use crate::scanner::{SourceFile, scan_source_files};

/// Where the package comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageSource {
    /// A ready archive supplied by the caller. Never deleted.
    Prebuilt(PathBuf),
    /// A source directory to zip, minus the ignored paths.
    Directory { root: PathBuf, ignored_paths: String },
}

#[derive(Debug)]
enum ArchiveFile {
    /// Removed from disk when dropped.
    Temporary(TempPath),
    Prebuilt(PathBuf),
}

/// A readable package archive.
#[derive(Debug)]
pub struct PackageArchive {
    file: ArchiveFile,
    size: u64,
    sha256: String,
    entries: usize,
}

impl PackageArchive {
    pub fn path(&self) -> &Path {
        match &self.file {
            ArchiveFile::Temporary(path) => &**path,
            ArchiveFile::Prebuilt(path) => path.as_path(),
        }
    }

    /// Archive size in bytes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Hex-encoded SHA-256 of the archive.
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Number of files packaged; zero for prebuilt archives.
    pub fn entries(&self) -> usize {
        self.entries
    }

    pub fn is_temporary(&self) -> bool {
        matches!(self.file, ArchiveFile::Temporary(_))
    }
}

impl AsRef<Path> for PackageArchive {
    fn as_ref(&self) -> &Path {
        self.path()
    }
}

/// Prepares the archive described by `source`.
///
/// Blocking; run it on a blocking thread from async code.
pub fn prepare_archive(source: &PackageSource) -> Result<PackageArchive, PackageError> {
    let archive = match source {
        PackageSource::Prebuilt(path) => prebuilt_archive(path)?,
        PackageSource::Directory {
            root,
            ignored_paths,
        } => {
            let rules = ExcludeRules::from_ignored_paths(ignored_paths)?;
            build_archive(root, &rules)?
        }
    };

    info!(
        path = %archive.path().display(),
        bytes = archive.size,
        sha256 = %archive.sha256,
        "Zip file size: {} bytes",
        archive.size
    );
    Ok(archive)
}

fn prebuilt_archive(path: &Path) -> Result<PackageArchive, PackageError> {
    if !path.is_file() {
        return Err(PackageError::MissingArchive(path.to_path_buf()));
    }
    info!(path = %path.display(), "Using prebuilt package");

    let (size, sha256) = digest_file(path)?;
    Ok(PackageArchive {
        file: ArchiveFile::Prebuilt(path.to_path_buf()),
        size,
        sha256,
        entries: 0,
    })
}

/// Zips the selected files of `root` into a temporary file.
///
/// The file is finished and synced to disk before this returns.
pub fn build_archive(root: &Path, rules: &ExcludeRules) -> Result<PackageArchive, PackageError> {
    info!(root = %root.display(), ignored = ?rules.patterns(), "Generating zipped package for app");

    let (files, total_size) = scan_source_files(root, rules)?;
    if files.is_empty() {
        return Err(PackageError::Empty(root.to_path_buf()));
    }
    debug!(files = files.len(), total_bytes = total_size, "scan complete");

    let (file, temp_path) = tempfile::Builder::new()
        .prefix("package-")
        .suffix(".zip")
        .tempfile()?
        .into_parts();

    let mut writer = ZipWriter::new(file);
    for source in &files {
        add_file(&mut writer, source)?;
    }
    let file = writer.finish()?;
    file.sync_all()?;
    drop(file);

    let (size, sha256) = digest_file(&temp_path)?;
    Ok(PackageArchive {
        file: ArchiveFile::Temporary(temp_path),
        size,
        sha256,
        entries: files.len(),
    })
}

fn add_file<W: Write + io::Seek>(
    writer: &mut ZipWriter<W>,
    source: &SourceFile,
) -> Result<(), PackageError> {
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    #[cfg(unix)]
    let options = {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&source.path)?.permissions().mode();
        options.unix_permissions(mode & 0o777)
    };

    writer.start_file(source.relative_path.as_str(), options)?;
    let mut input = File::open(&source.path)?;
    io::copy(&mut input, writer)?;
    Ok(())
}

/// Returns the size and hex SHA-256 of a file.
fn digest_file(path: &Path) -> Result<(u64, String), PackageError> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let size = io::copy(&mut file, &mut hasher)?;
    Ok((size, hex::encode(hasher.finalize())))
}
