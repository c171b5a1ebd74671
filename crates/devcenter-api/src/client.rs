//! Dev Center API client.
//!
//! Async HTTP client using `reqwest`. Authentication and app identification
//! headers come from a [`RequestContext`] fixed when the client is built.

use std::path::Path;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, RequestBuilder};
use tracing::debug;

use crate::types::{
    ApplicationId, ErrorBody, NotesUpdate, PackageId, PackageStateUpdate, UploadFlags,
};

/// User agent sent with every request.
pub const USER_AGENT_VALUE: &str = "corva/app-deployer";

/// Header naming the app the request acts on behalf of.
pub const APP_KEY_HEADER: &str = "x-corva-app";

/// Errors from the Dev Center client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {}", .message.as_deref().unwrap_or("no error message returned"))]
    Api { status: u16, message: Option<String> },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
}

impl Error {
    /// The message supplied by the remote service, if any.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Authenticated request context shared by every call of a run.
#[derive(Clone)]
pub struct RequestContext {
    pub api_key: String,
    pub app_key: String,
    pub base_url: String,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("api_key", &"<redacted>")
            .field("app_key", &self.app_key)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Dev Center API client.
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Client {
    /// Creates a client whose default headers carry the given context.
    pub fn new(ctx: &RequestContext) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("API {}", ctx.api_key))
                .map_err(|_| Error::InvalidHeader("api key"))?,
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            HeaderName::from_static(APP_KEY_HEADER),
            HeaderValue::from_str(&ctx.app_key).map_err(|_| Error::InvalidHeader("app key"))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: ctx.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, endpoint))
    }

    /// Sends a request and normalizes the response.
    ///
    /// Non-2xx responses become [`Error::Api`] carrying the remote
    /// `message` when the body has one. A 2xx with an empty body yields
    /// `null`.
    async fn send(&self, request: RequestBuilder) -> Result<serde_json::Value, Error> {
        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }

        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Looks up applications matching a human-readable app key.
    pub async fn lookup_application(&self, app_key: &str) -> Result<serde_json::Value, Error> {
        let request = self
            .request(Method::GET, "/v2/apps")
            .query(&[("app_key", app_key)]);
        self.send(request).await
    }

    /// Uploads a package archive as a multipart form.
    pub async fn upload_package(
        &self,
        app_id: ApplicationId,
        archive: &Path,
        flags: UploadFlags,
    ) -> Result<serde_json::Value, Error> {
        let data = tokio::fs::read(archive).await?;
        let file_name = archive
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package.zip".into());
        debug!(%app_id, file = %file_name, bytes = data.len(), ?flags, "uploading package");

        let part = Part::bytes(data)
            .file_name(file_name)
            .mime_str("application/zip")?;
        let form = Form::new()
            .part("package", part)
            .text("skip_analysis", flags.skip_analysis.to_string())
            .text("skip_testing", flags.skip_testing.to_string());

        let request = self
            .request(Method::POST, &format!("/v2/apps/{app_id}/packages/upload"))
            .multipart(form);
        self.send(request).await
    }

    /// Replaces the release notes of a package.
    pub async fn patch_package_notes(
        &self,
        app_id: ApplicationId,
        package_id: PackageId,
        notes: &str,
    ) -> Result<serde_json::Value, Error> {
        let body = NotesUpdate {
            notes: notes.to_string(),
        };
        let request = self
            .request(Method::PATCH, &package_endpoint(app_id, package_id))
            .json(&body);
        self.send(request).await
    }

    /// Fetches a package record, including its build status.
    pub async fn get_package(
        &self,
        app_id: ApplicationId,
        package_id: PackageId,
    ) -> Result<serde_json::Value, Error> {
        let request = self.request(Method::GET, &package_endpoint(app_id, package_id));
        self.send(request).await
    }

    /// Flips a package to the `published` state.
    pub async fn publish_package(
        &self,
        app_id: ApplicationId,
        package_id: PackageId,
    ) -> Result<serde_json::Value, Error> {
        let request = self
            .request(Method::PATCH, &package_endpoint(app_id, package_id))
            .json(&PackageStateUpdate::published());
        self.send(request).await
    }
}

fn package_endpoint(app_id: ApplicationId, package_id: PackageId) -> String {
    format!("/v2/apps/{app_id}/packages/{package_id}")
}
