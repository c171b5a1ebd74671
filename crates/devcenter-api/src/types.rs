//! Wire types for the Dev Center API.
//!
//! Response bodies follow a JSON:API-like envelope (`{ "data": ... }`).
//! Only the fields the deploy flow relies on are modelled; unknown fields
//! are ignored.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};

/// A positive numeric identifier as it appears on the wire.
///
/// The API has sent ids both as JSON numbers and as base-10 strings.
/// Both are accepted; zero, negative, fractional or non-numeric values
/// are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(u64);

impl RecordId {
    /// Wraps a raw id. Returns `None` for zero.
    pub fn new(raw: u64) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Parses a base-10 id string (surrounding whitespace allowed).
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let value: u64 = trimmed
            .parse()
            .map_err(|_| format!("id {raw:?} is not a base-10 integer"))?;
        Self::new(value).ok_or_else(|| format!("id {raw:?} is not positive"))
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => n
                .as_u64()
                .and_then(RecordId::new)
                .ok_or_else(|| de::Error::custom(format!("id {n} is not a positive integer"))),
            Raw::Text(s) => RecordId::parse(&s).map_err(de::Error::custom),
        }
    }
}

/// Numeric id of an application in Dev Center.
pub type ApplicationId = RecordId;

/// Numeric id of an uploaded package, assigned by Dev Center.
pub type PackageId = RecordId;

/// Remote-reported package state.
///
/// Only `draft` and `failure` carry meaning for the deploy flow; every
/// other label is kept verbatim and treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PackageStatus {
    Draft,
    Failure,
    Other(String),
}

impl PackageStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Failure => "failure",
            Self::Other(label) => label,
        }
    }

    /// Whether no further transition will be reported for this package.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Draft | Self::Failure)
    }
}

impl From<String> for PackageStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "draft" => Self::Draft,
            "failure" => Self::Failure,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for PackageStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<PackageStatus> for String {
    fn from(value: PackageStatus) -> Self {
        match value {
            PackageStatus::Other(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for PackageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags forwarded with a package upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFlags {
    pub skip_analysis: bool,
    pub skip_testing: bool,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

/// Body of `GET /v2/apps?app_key=...`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppLookupResponse {
    /// `null` and a missing `data` field both mean "no matches".
    #[serde(default)]
    pub data: Option<Vec<AppRecord>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub id: ApplicationId,
}

/// Body of `POST /v2/apps/{app_id}/packages/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub data: PackageRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub id: PackageId,
}

/// Body of `GET /v2/apps/{app_id}/packages/{package_id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageResponse {
    pub data: PackageData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageData {
    pub attributes: PackageAttributes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageAttributes {
    pub status: PackageStatus,
    /// Build notes; on failure this carries the remote diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

/// `PATCH` body that replaces a package's release notes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotesUpdate {
    pub notes: String,
}

/// `PATCH` body that changes a package's visibility state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageStateUpdate {
    pub package: PackageStateChange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageStateChange {
    pub status: String,
}

impl PackageStateUpdate {
    /// The body that flips a package to `published`.
    pub fn published() -> Self {
        Self {
            package: PackageStateChange {
                status: "published".into(),
            },
        }
    }
}
