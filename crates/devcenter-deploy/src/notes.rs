//! Best-effort release notes update.

use devcenter_api::{ApplicationId, PackageId};
use tracing::{info, warn};

use crate::error::{DeployWarning, remote_reason};
use crate::remote::DevCenterApi;

/// Attaches release notes to the uploaded package.
///
/// Never fails the run: an absent or empty note is a no-op, and any
/// remote failure is logged and returned as a warning.
pub async fn update_notes(
    api: &dyn DevCenterApi,
    app_id: ApplicationId,
    package_id: PackageId,
    notes: Option<&str>,
) -> Option<DeployWarning> {
    let Some(notes) = notes.filter(|n| !n.is_empty()) else {
        info!("No package version notes. Continuing.");
        return None;
    };

    info!(%package_id, "Updating package version notes");
    match api.patch_package_notes(app_id, package_id, notes).await {
        Ok(_) => None,
        Err(e) => {
            let warning = DeployWarning::NotesUpdate(remote_reason(&e));
            warn!(%package_id, "{warning} Continuing to verify package upload.");
            Some(warning)
        }
    }
}
