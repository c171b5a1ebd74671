//! Packaging for Dev Center deploys.
//!
//! Turns an app source directory into a zip archive ready for upload, or
//! validates a prebuilt one:
//!
//! - [`exclude`]: built-in and user ignore patterns
//! - [`scanner`]: recursive source tree walk
//! - [`archive`]: zip creation, size and digest
//!
//! Generated archives live in the system temp dir and are removed when the
//! returned [`PackageArchive`] is dropped.

pub mod archive;
pub mod error;
pub mod exclude;
pub mod scanner;

pub use archive::{PackageArchive, PackageSource, build_archive, prepare_archive};
pub use error::PackageError;
pub use exclude::ExcludeRules;
pub use scanner::{SourceFile, scan_source_files};
