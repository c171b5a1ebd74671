//! Deploy run: package, hand over to the orchestrator, report outputs.

use anyhow::Context;
use tracing::{error, info, warn};

use devcenter_api::{Client, RequestContext};
use devcenter_deploy::{DeployOrchestrator, DeployReport, DeployRequest};
use devcenter_package::prepare_archive;

use crate::adapter::ApiAdapter;
use crate::config::Settings;
use crate::outputs::{OutputTarget, write_outputs};

/// Runs one deploy and writes its outputs on success.
pub async fn run(settings: Settings, target: &OutputTarget) -> anyhow::Result<DeployReport> {
    info!(app_key = %settings.app_key, api_url = %settings.api_url, "starting deploy");

    let source = settings.package.clone();
    let archive = tokio::task::spawn_blocking(move || prepare_archive(&source))
        .await
        .context("packaging task failed")?
        .inspect_err(|e| error!(error = %e, "packaging failed"))
        .context("Unable to prepare the package")?;
    info!(
        entries = archive.entries(),
        temporary = archive.is_temporary(),
        "package ready for upload"
    );

    let client = Client::new(&RequestContext {
        api_key: settings.api_key,
        app_key: settings.app_key.clone(),
        base_url: settings.api_url,
    })?;
    let api = ApiAdapter::new(client);

    let request = DeployRequest {
        app_key: settings.app_key,
        archive: Box::new(archive),
        flags: settings.flags,
        notes: settings.notes,
        publish: settings.publish,
    };

    let report = DeployOrchestrator::new(&api)
        .with_poll_config(settings.poll)
        .deploy(request)
        .await?;

    write_outputs(target, &report)?;

    for warning in &report.warnings {
        warn!("{warning}");
    }
    info!(
        package_id = %report.package_id,
        status = %report.status,
        published = report.published,
        "deploy finished"
    );
    Ok(report)
}
