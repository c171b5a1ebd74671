//! Optional publish step.

use devcenter_api::{ApplicationId, PackageId};
use tracing::{info, warn};

use crate::error::{DeployWarning, remote_reason};
use crate::remote::DevCenterApi;

/// Flips a successfully built package to `published`.
///
/// Best-effort: a rejected or failed request is logged and returned as a
/// warning, it never fails the run retroactively.
pub async fn publish_package(
    api: &dyn DevCenterApi,
    app_id: ApplicationId,
    package_id: PackageId,
) -> Option<DeployWarning> {
    info!(%package_id, "Publishing package");

    match api.publish_package(app_id, package_id).await {
        Ok(_) => {
            info!(%package_id, "Package was successfully published.");
            None
        }
        Err(e) => {
            let warning = DeployWarning::Publish(remote_reason(&e));
            warn!(%package_id, "{warning}");
            Some(warning)
        }
    }
}
