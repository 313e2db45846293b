//! # Error Handling
//!
//! This module defines the centralized error type for the `docset-pipeline`
//! library. It uses `thiserror` to build an `Error` enum covering the few ways
//! a session can fail: an external tool exiting unsuccessfully, a tool that
//! cannot be spawned, or expected data missing from a tool's output.
//!
//! The binary wraps these in `anyhow` at the CLI boundary; inside the library
//! every fallible function returns [`Result<T>`].

use thiserror::Error;

/// Main error type for docset-pipeline operations
#[derive(Error, Debug)]
pub enum Error {
    /// An external command ran but exited with a non-zero status.
    #[error("Command failed ({status}): {command}{}", if stderr.is_empty() { String::new() } else { format!("\n  stderr: {}", stderr.trim_end()) })]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    /// An external command could not be started at all, usually because the
    /// program is not installed.
    #[error("Failed to run {program}: {message}")]
    Spawn { program: String, message: String },

    /// The pip install report resolved more than one package.
    #[error("Multiple dependencies detected in requirements file ({count}). Expected one.")]
    MultiplePackages { count: usize },

    /// The pip install report resolved no package at all.
    #[error("Install report lists no packages")]
    EmptyInstallReport,

    /// A version string could not be found in tool output.
    #[error("No version found in {source_name} output")]
    VersionNotFound { source_name: String },

    /// No release tag could be determined for a repository.
    #[error("No release tag found for {repository}")]
    NoReleaseTag { repository: String },

    /// The hosting API response did not name a default branch.
    #[error("No default branch detected for {repository}")]
    NoTrunkBranch { repository: String },

    /// The git remote has no URL configured.
    #[error("No remote URL detected for {remote}")]
    NoRemoteUrl { remote: String },

    /// A generated docset.json failed validation.
    #[error("Invalid docset config {path}: {message}")]
    InvalidDocsetConfig { path: String, message: String },

    /// The pipeline configuration file could not be used.
    #[error("Configuration error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    /// An error while walking glob matches.
    #[error("Glob error: {0}")]
    Glob(#[from] glob::GlobError),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
