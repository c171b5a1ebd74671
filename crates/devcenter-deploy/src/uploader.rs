//! Package upload.

use std::path::Path;

use devcenter_api::{ApplicationId, PackageId, UploadFlags, UploadResponse};
use tracing::{error, info};

use crate::error::{DeployError, remote_reason};
use crate::remote::DevCenterApi;

/// Uploads the archive and returns the package id assigned by Dev Center.
///
/// The response must have the `{ "data": { "id": ... } }` shape; anything
/// else is reported as an upload failure rather than guessed at.
pub async fn upload_package(
    api: &dyn DevCenterApi,
    app_id: ApplicationId,
    archive: &Path,
    flags: UploadFlags,
) -> Result<PackageId, DeployError> {
    info!(
        %app_id,
        archive = %archive.display(),
        skip_analysis = flags.skip_analysis,
        skip_testing = flags.skip_testing,
        "Uploading package"
    );

    let body = api
        .upload_package(app_id, archive, flags)
        .await
        .map_err(|e| {
            error!(error = %e, "package upload rejected");
            DeployError::Upload(remote_reason(&e))
        })?;

    let upload: UploadResponse = serde_json::from_value(body).map_err(|e| {
        DeployError::Upload(format!("malformed upload response, expected data.id: {e}"))
    })?;

    let package_id = upload.data.id;
    info!(%package_id, "Package uploaded");
    Ok(package_id)
}
