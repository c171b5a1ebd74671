//! Deploy orchestrator.
//!
//! Sequences resolve → upload → notes → poll → publish for one package
//! and stops at the first fatal error.

use devcenter_api::PackageStatus;
use tracing::{error, info};

use crate::error::DeployError;
use crate::notes::update_notes;
use crate::poller::CompletionPoller;
use crate::publisher::publish_package;
use crate::remote::{DevCenterApi, Sleeper, TokioSleeper};
use crate::resolver::resolve_app_id;
use crate::types::{DeployReport, DeployRequest, PollConfig};
use crate::uploader::upload_package;

static TOKIO_SLEEPER: TokioSleeper = TokioSleeper;

/// Runs a single deploy against Dev Center.
pub struct DeployOrchestrator<'a> {
    api: &'a dyn DevCenterApi,
    sleeper: &'a dyn Sleeper,
    poll: PollConfig,
}

impl<'a> DeployOrchestrator<'a> {
    /// Creates an orchestrator that waits with `tokio::time::sleep`.
    pub fn new(api: &'a dyn DevCenterApi) -> Self {
        Self {
            api,
            sleeper: &TOKIO_SLEEPER,
            poll: PollConfig::default(),
        }
    }

    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_poll_config(mut self, poll: PollConfig) -> Self {
        self.poll = poll;
        self
    }

    /// Runs the whole flow.
    ///
    /// Resolver, uploader and poller failures abort the run. Notes and
    /// publish failures are collected as warnings in the report. The
    /// archive handle is released right after the upload, whatever its
    /// outcome.
    pub async fn deploy(&self, request: DeployRequest) -> Result<DeployReport, DeployError> {
        let result = self.run(request).await;
        if let Err(e) = &result {
            error!(error = %e, "deploy failed");
        }
        result
    }

    async fn run(&self, request: DeployRequest) -> Result<DeployReport, DeployError> {
        let DeployRequest {
            app_key,
            archive,
            flags,
            notes,
            publish,
        } = request;
        let mut warnings = Vec::new();

        // 1. Resolve
        let app_id = resolve_app_id(self.api, &app_key).await?;

        // 2. Upload
        let uploaded = upload_package(self.api, app_id, (*archive).as_ref(), flags).await;
        drop(archive);
        let package_id = uploaded?;

        // 3. Notes (best-effort)
        warnings.extend(update_notes(self.api, app_id, package_id, notes.as_deref()).await);

        // 4. Poll
        let outcome = CompletionPoller::new(self.api, self.sleeper, self.poll)
            .wait_for_completion(app_id, package_id)
            .await?;
        // A successful run always observed the `draft` status.
        let status = outcome.last_status.unwrap_or(PackageStatus::Draft);

        // 5. Publish (optional, best-effort)
        let mut published = false;
        if publish {
            match publish_package(self.api, app_id, package_id).await {
                Some(warning) => warnings.push(warning),
                None => published = true,
            }
        }

        info!(
            %app_id,
            %package_id,
            %status,
            published,
            warnings = warnings.len(),
            "deploy completed"
        );

        Ok(DeployReport {
            app_id,
            package_id,
            status,
            checks: outcome.checks,
            published,
            warnings,
        })
    }
}
