//! Seams between the deploy flow and the outside world.
//!
//! `DevCenterApi` is implemented by the deployer app on top of
//! `devcenter_api::Client`. `Sleeper` abstracts the wait between status
//! checks so the poller can be driven without wall-clock delays.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::time::Duration;

use devcenter_api::{ApplicationId, Error as ApiError, PackageId, UploadFlags};

/// Boxed future returned by [`DevCenterApi`] calls.
pub type ApiFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, ApiError>> + Send + 'a>>;

/// The remote operations a deploy run issues.
///
/// Each call returns the decoded JSON body of a 2xx response. Shape
/// validation is left to the caller. Implementations never retry.
pub trait DevCenterApi: Send + Sync {
    /// `GET /v2/apps?app_key=...`
    fn lookup_application<'a>(&'a self, app_key: &'a str) -> ApiFuture<'a>;

    /// Multipart upload of the archive at `archive`.
    fn upload_package<'a>(
        &'a self,
        app_id: ApplicationId,
        archive: &'a Path,
        flags: UploadFlags,
    ) -> ApiFuture<'a>;

    /// `PATCH` of the package's release notes.
    fn patch_package_notes<'a>(
        &'a self,
        app_id: ApplicationId,
        package_id: PackageId,
        notes: &'a str,
    ) -> ApiFuture<'a>;

    /// `GET` of the package record including its status.
    fn get_package(&self, app_id: ApplicationId, package_id: PackageId) -> ApiFuture<'_>;

    /// `PATCH` flipping the package to `published`.
    fn publish_package(&self, app_id: ApplicationId, package_id: PackageId) -> ApiFuture<'_>;
}

/// Suspends the run between two status checks.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}

/// [`Sleeper`] backed by `tokio::time::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        Box::pin(tokio::time::sleep(duration))
    }
}
