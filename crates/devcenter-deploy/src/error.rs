//! Deploy error types.
//!
//! [`DeployError`] is fatal and aborts the run. [`DeployWarning`] comes
//! from best-effort steps and is only logged and reported.

use devcenter_api::{Error as ApiError, PackageStatus};

/// Fatal errors produced during a deploy run.
#[derive(Debug, thiserror::Error)]
pub enum DeployError {
    #[error("App {app_key} not found, or your API key doesn't have permissions to see it")]
    NotFound { app_key: String },

    #[error("Invalid response while looking up App {app_key}: {}", remote_reason(.error))]
    Lookup { app_key: String, error: ApiError },

    #[error("unexpected {operation} response: {detail}")]
    Protocol {
        operation: &'static str,
        detail: String,
    },

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Package build failed: {}", .notes.as_deref().unwrap_or("no failure notes reported"))]
    BuildFailure { notes: Option<String> },

    #[error(
        "Package build went too long without updates ({checks} status checks). Please check your upload in Dev Center."
    )]
    Timeout {
        checks: u32,
        last_status: Option<PackageStatus>,
    },

    #[error("Package status check failed: {}", remote_reason(.0))]
    Poll(ApiError),
}

/// Non-fatal outcomes of best-effort steps.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeployWarning {
    #[error("Unable to update package notes ({0}). Please manually update notes in Dev Center.")]
    NotesUpdate(String),

    #[error("Publishing failed ({0}). Please go to the app page and publish it manually.")]
    Publish(String),
}

/// Human-readable reason for a remote failure: the remote message when
/// present, otherwise a generic fallback naming the HTTP status.
pub(crate) fn remote_reason(err: &ApiError) -> String {
    if let Some(message) = err.remote_message() {
        return message.to_string();
    }
    match err {
        ApiError::Api { status, .. } => format!("HTTP {status} with no error message"),
        other => other.to_string(),
    }
}
