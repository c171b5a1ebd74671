//! Data types for the deploy flow.

use std::path::Path;
use std::time::Duration;

use devcenter_api::{ApplicationId, PackageId, PackageStatus, UploadFlags};

use crate::error::DeployWarning;

/// Default maximum number of status checks.
pub const DEFAULT_MAX_CHECKS: u32 = 50;

/// Default wait between two status checks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Polling limits for the completion poller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Maximum number of status queries before the run is declared timed out.
    pub max_checks: u32,
    /// Fixed wait between two queries.
    pub interval: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_checks: DEFAULT_MAX_CHECKS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Poller state. `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    Pending,
    Success,
    Failure,
    /// Synthetic: the check budget ran out while still pending.
    TimedOut,
}

impl PollState {
    /// State reached after observing `status`.
    pub fn observe(status: &PackageStatus) -> Self {
        match status {
            PackageStatus::Failure => Self::Failure,
            PackageStatus::Draft => Self::Success,
            PackageStatus::Other(_) => Self::Pending,
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Terminal result of a poll run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollOutcome {
    /// `Success`, `Failure` or `TimedOut`.
    pub state: PollState,
    /// Last status reported by the remote; `None` when no check ran.
    pub last_status: Option<PackageStatus>,
    /// Notes attached to the last status.
    pub notes: Option<String>,
    /// Number of status queries issued.
    pub checks: u32,
}

/// Archive handle passed to the uploader.
///
/// The handle is dropped right after the upload call; generated archives
/// use this to clean up their temporary file.
pub type ArchiveHandle = Box<dyn AsRef<Path> + Send + Sync>;

/// Everything a single deploy run needs from the caller.
pub struct DeployRequest {
    pub app_key: String,
    pub archive: ArchiveHandle,
    pub flags: UploadFlags,
    pub notes: Option<String>,
    pub publish: bool,
}

impl DeployRequest {
    pub fn archive_path(&self) -> &Path {
        (*self.archive).as_ref()
    }
}

impl std::fmt::Debug for DeployRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployRequest")
            .field("app_key", &self.app_key)
            .field("archive", &self.archive_path())
            .field("flags", &self.flags)
            .field("notes", &self.notes)
            .field("publish", &self.publish)
            .finish()
    }
}

/// Report of a successful deploy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployReport {
    pub app_id: ApplicationId,
    pub package_id: PackageId,
    pub status: PackageStatus,
    pub checks: u32,
    pub published: bool,
    pub warnings: Vec<DeployWarning>,
}
