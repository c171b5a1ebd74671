//! Deployer configuration.
//!
//! Settings are layered, highest first: command-line flag, `INPUT_<NAME>`
//! environment variable, TOML file given with `--config`, built-in default.
//! Empty values count as unset, which is how CI runners pass omitted inputs.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, bail};
use serde::Deserialize;

use devcenter_api::UploadFlags;
use devcenter_deploy::PollConfig;
use devcenter_deploy::types::{DEFAULT_MAX_CHECKS, DEFAULT_POLL_INTERVAL};
use devcenter_package::PackageSource;

use crate::cli::Cli;

pub const DEFAULT_API_URL: &str = "https://api.corva.ai";

/// Contents of the optional TOML config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default)]
    pub app_key: String,

    #[serde(default)]
    pub notes: String,

    #[serde(default)]
    pub skip_analysis: bool,

    #[serde(default)]
    pub skip_testing: bool,

    #[serde(default)]
    pub prebuild_package_path: String,

    /// Space-separated glob patterns.
    #[serde(default)]
    pub ignored_paths: String,

    #[serde(default)]
    pub publish: bool,

    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    #[serde(default = "default_max_status_checks")]
    pub max_status_checks: u32,

    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.into()
}

fn default_source_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_status_checks() -> u32 {
    DEFAULT_MAX_CHECKS
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            app_key: String::new(),
            notes: String::new(),
            skip_analysis: false,
            skip_testing: false,
            prebuild_package_path: String::new(),
            ignored_paths: String::new(),
            publish: false,
            source_dir: default_source_dir(),
            max_status_checks: default_max_status_checks(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl FileConfig {
    /// Reads and parses a TOML config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration file loaded");
        Ok(config)
    }
}

/// Validated settings for one deploy run.
#[derive(Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_url: String,
    pub app_key: String,
    pub notes: Option<String>,
    pub flags: UploadFlags,
    pub package: PackageSource,
    pub publish: bool,
    pub poll: PollConfig,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("app_key", &self.app_key)
            .field("notes", &self.notes)
            .field("flags", &self.flags)
            .field("package", &self.package)
            .field("publish", &self.publish)
            .field("poll", &self.poll)
            .finish()
    }
}

impl Settings {
    /// Resolves settings from parsed arguments, loading `--config` if given.
    pub fn resolve(cli: Cli) -> anyhow::Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::merge(cli, file)
    }

    /// Layers `cli` over `file` and validates the result.
    pub fn merge(cli: Cli, file: FileConfig) -> anyhow::Result<Self> {
        let api_key = pick(cli.api_key).unwrap_or(file.api_key);
        if api_key.trim().is_empty() {
            bail!("missing required option `api-key`");
        }
        let app_key = pick(cli.app_key).unwrap_or(file.app_key);
        if app_key.trim().is_empty() {
            bail!("missing required option `app-key`");
        }

        let api_url = pick(cli.api_url).unwrap_or(file.api_url);
        let url = reqwest::Url::parse(&api_url)
            .with_context(|| format!("invalid `api-url` {api_url:?}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("invalid `api-url` {api_url:?}: expected an http or https URL");
        }

        let notes = pick(cli.notes).or_else(|| Some(file.notes).filter(|n| !n.is_empty()));

        let flags = UploadFlags {
            skip_analysis: pick_bool(cli.skip_analysis, "skip-analysis")?
                .unwrap_or(file.skip_analysis),
            skip_testing: pick_bool(cli.skip_testing, "skip-testing")?
                .unwrap_or(file.skip_testing),
        };
        let publish = pick_bool(cli.publish, "publish")?.unwrap_or(file.publish);

        let prebuilt = pick(cli.prebuild_package_path).unwrap_or(file.prebuild_package_path);
        let package = if prebuilt.is_empty() {
            PackageSource::Directory {
                root: pick(cli.source_dir).map_or(file.source_dir, PathBuf::from),
                ignored_paths: pick(cli.ignored_paths).unwrap_or(file.ignored_paths),
            }
        } else {
            PackageSource::Prebuilt(PathBuf::from(prebuilt))
        };

        let max_checks = pick_number(cli.max_status_checks, "max-status-checks")?
            .unwrap_or(file.max_status_checks);
        if max_checks == 0 {
            bail!("`max-status-checks` must be at least 1");
        }
        let interval_secs = pick_number(cli.poll_interval_secs, "poll-interval-secs")?
            .unwrap_or(file.poll_interval_secs);

        Ok(Self {
            api_key,
            api_url,
            app_key,
            notes,
            flags,
            package,
            publish,
            poll: PollConfig {
                max_checks,
                interval: Duration::from_secs(interval_secs),
            },
        })
    }
}

/// A set, non-blank value.
fn pick(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn pick_bool(value: Option<String>, option: &str) -> anyhow::Result<Option<bool>> {
    let Some(raw) = pick(value) else {
        return Ok(None);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Ok(Some(true)),
        "false" | "no" | "0" | "off" => Ok(Some(false)),
        _ => bail!("invalid `{option}` {raw:?}: expected true or false"),
    }
}

fn pick_number<T: std::str::FromStr>(
    value: Option<String>,
    option: &str,
) -> anyhow::Result<Option<T>> {
    let Some(raw) = pick(value) else {
        return Ok(None);
    };
    match raw.trim().parse() {
        Ok(n) => Ok(Some(n)),
        Err(_) => bail!("invalid `{option}` {raw:?}: expected a non-negative integer"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> Cli {
        Cli {
            api_key: Some("secret".into()),
            app_key: Some("corva.my-app".into()),
            ..Cli::default()
        }
    }

    #[test]
    fn defaults_applied() {
        let settings = Settings::merge(cli(), FileConfig::default()).unwrap();

        assert_eq!(settings.api_url, "https://api.corva.ai");
        assert_eq!(settings.notes, None);
        assert_eq!(settings.flags, UploadFlags::default());
        assert!(!settings.publish);
        assert_eq!(settings.poll, PollConfig::default());
        assert_eq!(
            settings.package,
            PackageSource::Directory {
                root: PathBuf::from("."),
                ignored_paths: String::new(),
            }
        );
    }

    #[test]
    fn cli_overrides_file() {
        let file = FileConfig {
            api_url: "https://file.example".into(),
            notes: "from file".into(),
            skip_testing: true,
            publish: true,
            max_status_checks: 5,
            ..FileConfig::default()
        };
        let cli = Cli {
            api_url: Some("http://localhost:8080".into()),
            publish: Some("false".into()),
            max_status_checks: Some("7".into()),
            ..cli()
        };

        let settings = Settings::merge(cli, file).unwrap();
        assert_eq!(settings.api_url, "http://localhost:8080");
        assert_eq!(settings.notes.as_deref(), Some("from file"));
        assert!(settings.flags.skip_testing);
        assert!(!settings.flags.skip_analysis);
        assert!(!settings.publish);
        assert_eq!(settings.poll.max_checks, 7);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let file = FileConfig {
            skip_analysis: true,
            ..FileConfig::default()
        };
        let cli = Cli {
            notes: Some(String::new()),
            skip_analysis: Some(String::new()),
            prebuild_package_path: Some("  ".into()),
            ..cli()
        };

        let settings = Settings::merge(cli, file).unwrap();
        assert_eq!(settings.notes, None);
        assert!(settings.flags.skip_analysis);
        assert!(matches!(settings.package, PackageSource::Directory { .. }));
    }

    #[test]
    fn skip_flags_stay_independent() {
        let cli = Cli {
            skip_analysis: Some("true".into()),
            skip_testing: Some("false".into()),
            ..cli()
        };
        let settings = Settings::merge(cli, FileConfig::default()).unwrap();
        assert_eq!(
            settings.flags,
            UploadFlags {
                skip_analysis: true,
                skip_testing: false,
            }
        );
    }

    #[test]
    fn prebuilt_path_bypasses_packaging() {
        let cli = Cli {
            prebuild_package_path: Some("dist/app.zip".into()),
            ignored_paths: Some("node_modules".into()),
            ..cli()
        };
        let settings = Settings::merge(cli, FileConfig::default()).unwrap();
        assert_eq!(
            settings.package,
            PackageSource::Prebuilt(PathBuf::from("dist/app.zip"))
        );
    }

    #[test]
    fn missing_credentials_rejected() {
        let err = Settings::merge(Cli::default(), FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("api-key"));

        let cli = Cli {
            api_key: Some("k".into()),
            ..Cli::default()
        };
        let err = Settings::merge(cli, FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("app-key"));
    }

    #[test]
    fn invalid_values_rejected() {
        for cli in [
            Cli {
                api_url: Some("ftp://example.com".into()),
                ..cli()
            },
            Cli {
                api_url: Some("not a url".into()),
                ..cli()
            },
            Cli {
                max_status_checks: Some("0".into()),
                ..cli()
            },
            Cli {
                poll_interval_secs: Some("-1".into()),
                ..cli()
            },
            Cli {
                publish: Some("maybe".into()),
                ..cli()
            },
        ] {
            assert!(Settings::merge(cli, FileConfig::default()).is_err());
        }
    }

    #[test]
    fn toml_file_parses() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(
            &path,
            r#"
api_key = "file-key"
app_key = "corva.from-file"
ignored_paths = "tests docs"
publish = true
poll_interval_secs = 3
"#,
        )
        .unwrap();

        let cli = Cli {
            config: Some(path),
            ..Cli::default()
        };
        let settings = Settings::resolve(cli).unwrap();
        assert_eq!(settings.api_key, "file-key");
        assert_eq!(settings.app_key, "corva.from-file");
        assert!(settings.publish);
        assert_eq!(settings.poll.interval, Duration::from_secs(3));
        assert_eq!(settings.poll.max_checks, 50);
        assert_eq!(
            settings.package,
            PackageSource::Directory {
                root: PathBuf::from("."),
                ignored_paths: "tests docs".into(),
            }
        );
    }

    #[test]
    fn unknown_toml_key_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("deploy.toml");
        std::fs::write(&path, "api_kye = \"typo\"\n").unwrap();
        assert!(FileConfig::load(&path).is_err());
    }

    #[test]
    fn debug_redacts_api_key() {
        let settings = Settings::merge(cli(), FileConfig::default()).unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }
}
