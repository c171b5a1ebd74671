//! Adapter bridging `devcenter_api::Client` to the `DevCenterApi` seam
//! required by `devcenter-deploy`.

use std::path::Path;

use devcenter_api::{ApplicationId, Client, PackageId, UploadFlags};
use devcenter_deploy::{ApiFuture, DevCenterApi};

/// Implements `devcenter_deploy::DevCenterApi` by delegating to the HTTP client.
pub struct ApiAdapter {
    client: Client,
}

impl ApiAdapter {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl DevCenterApi for ApiAdapter {
    fn lookup_application<'a>(&'a self, app_key: &'a str) -> ApiFuture<'a> {
        Box::pin(self.client.lookup_application(app_key))
    }

    fn upload_package<'a>(
        &'a self,
        app_id: ApplicationId,
        archive: &'a Path,
        flags: UploadFlags,
    ) -> ApiFuture<'a> {
        Box::pin(self.client.upload_package(app_id, archive, flags))
    }

    fn patch_package_notes<'a>(
        &'a self,
        app_id: ApplicationId,
        package_id: PackageId,
        notes: &'a str,
    ) -> ApiFuture<'a> {
        Box::pin(self.client.patch_package_notes(app_id, package_id, notes))
    }

    fn get_package(&self, app_id: ApplicationId, package_id: PackageId) -> ApiFuture<'_> {
        Box::pin(self.client.get_package(app_id, package_id))
    }

    fn publish_package(&self, app_id: ApplicationId, package_id: PackageId) -> ApiFuture<'_> {
        Box::pin(self.client.publish_package(app_id, package_id))
    }
}
