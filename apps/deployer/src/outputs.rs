//! Run outputs: `package-id` and `package-status`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;

use devcenter_deploy::DeployReport;

/// Where outputs are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Appended to a `GITHUB_OUTPUT`-style file.
    File(PathBuf),
    Stdout,
}

impl OutputTarget {
    /// The file named by `GITHUB_OUTPUT`, or stdout when unset.
    pub fn from_env() -> Self {
        match std::env::var_os("GITHUB_OUTPUT") {
            Some(path) if !path.is_empty() => Self::File(PathBuf::from(path)),
            _ => Self::Stdout,
        }
    }
}

/// Formats outputs as `key=value` lines.
pub fn render(report: &DeployReport) -> String {
    format!(
        "package-id={}\npackage-status={}\n",
        report.package_id, report.status
    )
}

pub fn write_outputs(target: &OutputTarget, report: &DeployReport) -> anyhow::Result<()> {
    let text = render(report);
    match target {
        OutputTarget::File(path) => {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open output file {}", path.display()))?;
            file.write_all(text.as_bytes())
                .with_context(|| format!("failed to write output file {}", path.display()))?;
        }
        OutputTarget::Stdout => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            stdout.flush()?;
        }
    }
    tracing::debug!(?target, "outputs written");
    Ok(())
}
