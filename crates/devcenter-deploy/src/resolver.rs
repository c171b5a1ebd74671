//! App key to app id resolution.

use devcenter_api::{AppLookupResponse, ApplicationId};
use tracing::{debug, info};

use crate::error::DeployError;
use crate::remote::DevCenterApi;

/// Resolves a human-readable app key to its numeric app id.
///
/// An empty result set means the app does not exist or the API key
/// cannot see it; the API does not distinguish the two. When several
/// apps match, the first one wins.
pub async fn resolve_app_id(
    api: &dyn DevCenterApi,
    app_key: &str,
) -> Result<ApplicationId, DeployError> {
    info!(app_key, "Requesting App ID from App Key");

    let body = api
        .lookup_application(app_key)
        .await
        .map_err(|error| DeployError::Lookup {
            app_key: app_key.to_string(),
            error,
        })?;
    debug!(%body, "app lookup response");

    // An empty body carries no matches either.
    let lookup: AppLookupResponse = if body.is_null() {
        AppLookupResponse::default()
    } else {
        serde_json::from_value(body).map_err(|e| DeployError::Protocol {
            operation: "app lookup",
            detail: e.to_string(),
        })?
    };

    let records = lookup.data.unwrap_or_default();
    let Some(first) = records.first() else {
        return Err(DeployError::NotFound {
            app_key: app_key.to_string(),
        });
    };
    if records.len() > 1 {
        debug!(matches = records.len(), "several apps matched, using the first");
    }

    info!(app_id = %first.id, "App ID resolved");
    Ok(first.id)
}
