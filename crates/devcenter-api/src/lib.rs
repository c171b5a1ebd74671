//! Dev Center API client for the app deploy flow.
//!
//! Wraps the handful of endpoints a deploy needs (app lookup, package
//! upload, notes, status, publish) and normalizes non-2xx responses into
//! [`Error::Api`] carrying the remote message.

pub mod client;
pub mod types;

pub use client::{Client, Error, RequestContext};
pub use types::{
    AppLookupResponse, AppRecord, ApplicationId, NotesUpdate, PackageAttributes, PackageData,
    PackageId, PackageRecord, PackageResponse, PackageStateUpdate, PackageStatus, RecordId,
    UploadFlags, UploadResponse,
};
