//! Scripted test doubles for the deploy seams.

use std::collections::VecDeque;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Mutex;
use std::time::Duration;

use devcenter_api::{ApplicationId, Error as ApiError, PackageId, RecordId, UploadFlags};
use serde_json::{Value, json};

use crate::remote::{ApiFuture, DevCenterApi, Sleeper};

/// A call observed by [`MockApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Lookup(String),
    Upload {
        app_id: u64,
        archive: PathBuf,
        archive_existed: bool,
        flags: UploadFlags,
    },
    PatchNotes {
        app_id: u64,
        package_id: u64,
        notes: String,
    },
    GetPackage {
        app_id: u64,
        package_id: u64,
    },
    Publish {
        app_id: u64,
        package_id: u64,
    },
}

type Scripted = Mutex<VecDeque<Result<Value, ApiError>>>;

/// Scripted [`DevCenterApi`]: each operation pops its next queued
/// response. An exhausted queue answers with a 500 without message.
#[derive(Default)]
pub struct MockApi {
    lookups: Scripted,
    uploads: Scripted,
    notes: Scripted,
    packages: Scripted,
    publishes: Scripted,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lookup(self, resp: Result<Value, ApiError>) -> Self {
        self.lookups.lock().unwrap().push_back(resp);
        self
    }

    pub fn with_upload(self, resp: Result<Value, ApiError>) -> Self {
        self.uploads.lock().unwrap().push_back(resp);
        self
    }

    pub fn with_notes(self, resp: Result<Value, ApiError>) -> Self {
        self.notes.lock().unwrap().push_back(resp);
        self
    }

    /// Queues one package-status response per label.
    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        {
            let mut queue = self.packages.lock().unwrap();
            for status in statuses {
                queue.push_back(Ok(package_body(status, None)));
            }
        }
        self
    }

    pub fn with_package(self, resp: Result<Value, ApiError>) -> Self {
        self.packages.lock().unwrap().push_back(resp);
        self
    }

    pub fn with_publish(self, resp: Result<Value, ApiError>) -> Self {
        self.publishes.lock().unwrap().push_back(resp);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    fn answer(&self, queue: &Scripted, call: Call) -> ApiFuture<'_> {
        self.calls.lock().unwrap().push(call);
        let resp = queue.lock().unwrap().pop_front().unwrap_or(Err(ApiError::Api {
            status: 500,
            message: None,
        }));
        Box::pin(async move { resp })
    }
}

impl DevCenterApi for MockApi {
    fn lookup_application<'a>(&'a self, app_key: &'a str) -> ApiFuture<'a> {
        self.answer(&self.lookups, Call::Lookup(app_key.to_string()))
    }

    fn upload_package<'a>(
        &'a self,
        app_id: ApplicationId,
        archive: &'a Path,
        flags: UploadFlags,
    ) -> ApiFuture<'a> {
        self.answer(
            &self.uploads,
            Call::Upload {
                app_id: app_id.get(),
                archive: archive.to_path_buf(),
                archive_existed: archive.exists(),
                flags,
            },
        )
    }

    fn patch_package_notes<'a>(
        &'a self,
        app_id: ApplicationId,
        package_id: PackageId,
        notes: &'a str,
    ) -> ApiFuture<'a> {
        self.answer(
            &self.notes,
            Call::PatchNotes {
                app_id: app_id.get(),
                package_id: package_id.get(),
                notes: notes.to_string(),
            },
        )
    }

    fn get_package(&self, app_id: ApplicationId, package_id: PackageId) -> ApiFuture<'_> {
        self.answer(
            &self.packages,
            Call::GetPackage {
                app_id: app_id.get(),
                package_id: package_id.get(),
            },
        )
    }

    fn publish_package(&self, app_id: ApplicationId, package_id: PackageId) -> ApiFuture<'_> {
        self.answer(
            &self.publishes,
            Call::Publish {
                app_id: app_id.get(),
                package_id: package_id.get(),
            },
        )
    }
}

/// [`Sleeper`] that records requested durations and returns immediately.
#[derive(Default)]
pub struct RecordingSleeper {
    slept: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn durations(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + '_>> {
        self.slept.lock().unwrap().push(duration);
        Box::pin(async {})
    }
}

pub fn id(raw: u64) -> RecordId {
    RecordId::new(raw).unwrap()
}

pub fn lookup_body(ids: &[&str]) -> Value {
    let data: Vec<Value> = ids.iter().map(|id| json!({ "id": id, "type": "app" })).collect();
    json!({ "data": data })
}

pub fn upload_body(id: &str) -> Value {
    json!({ "data": { "id": id, "type": "package" } })
}

pub fn package_body(status: &str, notes: Option<&str>) -> Value {
    json!({ "data": { "id": "1", "attributes": { "status": status, "notes": notes } } })
}

pub fn api_error(status: u16, message: Option<&str>) -> ApiError {
    ApiError::Api {
        status,
        message: message.map(str::to_string),
    }
}

pub fn transport_error() -> ApiError {
    ApiError::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "connection reset by peer",
    ))
}
