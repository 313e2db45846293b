//! # Version Detection
//!
//! Two kinds of version strings matter to the pipeline:
//!
//! 1.  **The library version**, which names the docset, the contribution
//!     branch and the commit. It is read from a pip dry-run install report
//!     of the pinned requirements file, or from `pip show` for an already
//!     installed package.
//!
//! 2.  **Release tags**, from which the newest numeric one is chosen when the
//!     hosting API's "latest release" is not used.

use std::path::Path;

use regex::Regex;
use semver::Version;
use serde::Deserialize;

use crate::config::{PipelineConfig, VersionSource};
use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

#[derive(Debug, Deserialize)]
struct InstallReport {
    #[serde(default)]
    install: Vec<InstallEntry>,
}

#[derive(Debug, Deserialize)]
struct InstallEntry {
    metadata: PackageMetadata,
}

#[derive(Debug, Deserialize)]
struct PackageMetadata {
    version: String,
}

/// Extract the single package version from a pip `--report` JSON document.
pub fn version_from_install_report(report: &str) -> Result<String> {
    let report: InstallReport = serde_json::from_str(report)?;

    match report.install.as_slice() {
        [] => Err(Error::EmptyInstallReport),
        [entry] => Ok(entry.metadata.version.clone()),
        entries => Err(Error::MultiplePackages {
            count: entries.len(),
        }),
    }
}

/// Extract the version from `pip show` output.
pub fn version_from_pip_show(output: &str) -> Result<String> {
    let re = Regex::new(r"(?m)^Version:\s*(\S+)\s*$")?;
    re.captures(output)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::VersionNotFound {
            source_name: "pip show".to_string(),
        })
}

/// Parse a tag such as `v0.13.2` or `0.13.2` into a numeric version.
///
/// Pre-release and build suffixes are rejected, as are tags with fewer or
/// more than three components.
pub fn parse_numeric_tag(tag: &str) -> Option<Version> {
    let version_str = tag.strip_prefix('v').unwrap_or(tag);
    let version = Version::parse(version_str).ok()?;

    if version.pre.is_empty() && version.build.is_empty() {
        Some(version)
    } else {
        None
    }
}

/// The tag with the greatest `(major, minor, patch)` tuple.
pub fn latest_numeric_tag<S: AsRef<str>>(tags: &[S]) -> Option<String> {
    tags.iter()
        .filter_map(|tag| parse_numeric_tag(tag.as_ref()).map(|v| (v, tag.as_ref())))
        .max_by(|(a, _), (b, _)| a.cmp(b))
        .map(|(_, tag)| tag.to_string())
}

/// Resolve the library version with the configured strategy.
pub fn resolve_library_version(
    runner: &dyn CommandRunner,
    config: &PipelineConfig,
    root: &Path,
) -> Result<String> {
    let version = match config.docset.version_source {
        VersionSource::Report => {
            let report_file = tempfile::NamedTempFile::new()?;
            let report_path = report_file.path().display().to_string();
            runner.run(
                &Invocation::new("python")
                    .args([
                        "-m",
                        "pip",
                        "install",
                        "--dry-run",
                        "--no-deps",
                        "--ignore-installed",
                        "--report",
                    ])
                    .arg(report_path)
                    .arg("--requirement")
                    .arg(config.docset.requirements_file.as_str())
                    .current_dir(root),
            )?;
            let report = std::fs::read_to_string(report_file.path())?;
            version_from_install_report(&report)?
        }
        VersionSource::Installed => {
            let output = runner.output(
                &Invocation::new("python")
                    .args(["-m", "pip", "show"])
                    .arg(config.library.name.as_str())
                    .current_dir(root),
            )?;
            version_from_pip_show(&output)?
        }
    };

    log::info!("Resolved {} version {}", config.library.name, version);
    Ok(version)
}
