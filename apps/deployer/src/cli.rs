//! Command-line interface.
//!
//! Every option can also be given through an action-style `INPUT_<NAME>`
//! environment variable. Values stay raw here; [`crate::config`] merges
//! them with the optional TOML file and validates the result.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Default, Parser)]
#[command(name = "app-deployer")]
#[command(about = "Deploy an app package to Dev Center", version)]
pub struct Cli {
    /// API key sent with every request
    #[arg(long, env = "INPUT_API-KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the Dev Center API
    #[arg(long, env = "INPUT_API-URL")]
    pub api_url: Option<String>,

    /// App key to deploy, e.g. "provider.my-app"
    #[arg(long, env = "INPUT_APP-KEY")]
    pub app_key: Option<String>,

    /// Release notes attached to the uploaded package
    #[arg(long, env = "INPUT_NOTES")]
    pub notes: Option<String>,

    /// Skip the remote static analysis step
    #[arg(long, env = "INPUT_SKIP-ANALYSIS", num_args = 0..=1, default_missing_value = "true")]
    pub skip_analysis: Option<String>,

    /// Skip the remote test step
    #[arg(long, env = "INPUT_SKIP-TESTING", num_args = 0..=1, default_missing_value = "true")]
    pub skip_testing: Option<String>,

    /// Upload this archive instead of packaging the source directory
    #[arg(long, env = "INPUT_PREBUILD-PACKAGE-PATH")]
    pub prebuild_package_path: Option<String>,

    /// Space-separated glob patterns left out of the package
    #[arg(long, env = "INPUT_IGNORED-PATHS")]
    pub ignored_paths: Option<String>,

    /// Publish the package once its build succeeds
    #[arg(long, env = "INPUT_PUBLISH", num_args = 0..=1, default_missing_value = "true")]
    pub publish: Option<String>,

    /// Directory to package (default: current directory)
    #[arg(long, env = "INPUT_SOURCE-DIR")]
    pub source_dir: Option<String>,

    /// Maximum number of build status checks
    #[arg(long, env = "INPUT_MAX-STATUS-CHECKS")]
    pub max_status_checks: Option<String>,

    /// Seconds to wait between two status checks
    #[arg(long, env = "INPUT_POLL-INTERVAL-SECS")]
    pub poll_interval_secs: Option<String>,

    /// Path to a TOML config file
    #[arg(long, short = 'c', env = "INPUT_CONFIG")]
    pub config: Option<PathBuf>,
}
