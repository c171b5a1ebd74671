//! Completion poller.
//!
//! Drives the package status state machine:
//!
//! ```text
//! Pending --draft-->   Success
//! Pending --failure--> Failure   (remote notes attached)
//! Pending --other-->   Pending   (sleep, check again)
//! Pending --budget exhausted--> TimedOut
//! ```
//!
//! Only non-terminal statuses lead to another query. Failed requests are
//! not retried.

use devcenter_api::{ApplicationId, PackageAttributes, PackageId, PackageResponse};
use tracing::{error, info};

use crate::error::DeployError;
use crate::remote::{DevCenterApi, Sleeper};
use crate::types::{PollConfig, PollOutcome, PollState};

/// Polls the package status until it is terminal or the budget runs out.
pub struct CompletionPoller<'a> {
    api: &'a dyn DevCenterApi,
    sleeper: &'a dyn Sleeper,
    config: PollConfig,
}

impl<'a> CompletionPoller<'a> {
    pub fn new(api: &'a dyn DevCenterApi, sleeper: &'a dyn Sleeper, config: PollConfig) -> Self {
        Self {
            api,
            sleeper,
            config,
        }
    }

    /// Runs the state machine until it leaves `Pending`.
    ///
    /// The outcome is `Success`, `Failure` or `TimedOut`. At most
    /// `max_checks` queries are issued, with one sleep between consecutive
    /// queries. Only request and shape errors are returned as `Err`.
    pub async fn run(
        &self,
        app_id: ApplicationId,
        package_id: PackageId,
    ) -> Result<PollOutcome, DeployError> {
        let max_checks = self.config.max_checks;
        info!(max_checks, "Polling for package status updates");

        let mut state = PollState::Pending;
        let mut last_status = None;
        let mut notes = None;
        let mut checks = 0;

        while checks < max_checks {
            if checks > 0 {
                self.sleeper.sleep(self.config.interval).await;
            }
            let attributes = self.query(app_id, package_id).await?;
            checks += 1;

            let status = attributes.status;
            info!(check = checks, %status, "Checking package status [{checks}]: {status}");
            state = PollState::observe(&status);
            last_status = Some(status);
            notes = attributes.notes;

            if state.is_terminal() {
                break;
            }
        }

        if !state.is_terminal() {
            state = PollState::TimedOut;
        }
        Ok(PollOutcome {
            state,
            last_status,
            notes,
            checks,
        })
    }

    /// Runs the state machine and keeps only a successful build.
    ///
    /// `Failure` and `TimedOut` become [`DeployError::BuildFailure`] and
    /// [`DeployError::Timeout`].
    pub async fn wait_for_completion(
        &self,
        app_id: ApplicationId,
        package_id: PackageId,
    ) -> Result<PollOutcome, DeployError> {
        let outcome = self.run(app_id, package_id).await?;

        match outcome.state {
            PollState::Success => {
                info!(%package_id, "Successful package upload");
                Ok(outcome)
            }
            PollState::Failure => {
                error!(%package_id, notes = ?outcome.notes, "Package build failed");
                Err(DeployError::BuildFailure {
                    notes: outcome.notes,
                })
            }
            PollState::TimedOut | PollState::Pending => {
                error!(
                    %package_id,
                    checks = outcome.checks,
                    last_status = ?outcome.last_status,
                    "package status never became terminal"
                );
                Err(DeployError::Timeout {
                    checks: outcome.checks,
                    last_status: outcome.last_status,
                })
            }
        }
    }

    async fn query(
        &self,
        app_id: ApplicationId,
        package_id: PackageId,
    ) -> Result<PackageAttributes, DeployError> {
        let body = self
            .api
            .get_package(app_id, package_id)
            .await
            .map_err(DeployError::Poll)?;
        let resp: PackageResponse =
            serde_json::from_value(body).map_err(|e| DeployError::Protocol {
                operation: "package status",
                detail: e.to_string(),
            })?;
        Ok(resp.data.attributes)
    }
}
