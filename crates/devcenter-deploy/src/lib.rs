//! App deploy flow: resolve app, upload package, notes, poll, publish.
//!
//! This crate holds the **business logic** of a deploy. It has no HTTP or
//! filesystem dependency: the deployer app provides a `DevCenterApi`
//! implementation backed by `devcenter_api::Client`, and a packaging step
//! hands over a ready archive.
//!
//! # Pipeline
//!
//! 1. **Resolve**: map the app key to its numeric app id
//! 2. **Upload**: send the archive with the skip flags, get a package id
//! 3. **Notes**: attach release notes (best-effort)
//! 4. **Poll**: wait for `draft` (success) or `failure`, bounded
//! 5. **Publish**: optionally flip the package to `published` (best-effort)

pub mod deploy;
pub mod error;
pub mod notes;
pub mod poller;
pub mod publisher;
pub mod remote;
pub mod resolver;
pub mod types;
pub mod uploader;

#[cfg(test)]
mod mock;

// Re-export primary types for convenience.
pub use deploy::DeployOrchestrator;
pub use error::{DeployError, DeployWarning};
pub use poller::CompletionPoller;
pub use remote::{ApiFuture, DevCenterApi, Sleeper, TokioSleeper};
pub use types::{
    ArchiveHandle, DeployReport, DeployRequest, PollConfig, PollOutcome, PollState,
};
pub use devcenter_api::{ApplicationId, PackageId, PackageStatus, UploadFlags};
