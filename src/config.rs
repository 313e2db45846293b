//! # Pipeline Configuration
//!
//! The pipeline is configured by an optional `docset-pipeline.yaml` file. Every
//! field has a default, and the defaults describe the seaborn docset, so an
//! empty or missing file reproduces the stock pipeline. A partial file only
//! overrides the fields it names.
//!
//! ```yaml
//! library:
//!   name: seaborn
//!   owner: mwaskom
//! contributor:
//!   github_user: paw-lu
//!   author: Paulo S. Costa
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "docset-pipeline.yaml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub library: LibraryConfig,
    pub upstream: UpstreamConfig,
    pub contributor: ContributorConfig,
    pub docset: DocsetSettings,
}

/// The documented library and how its HTML docs are built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LibraryConfig {
    /// Library name; also names the docset, archive and branch.
    pub name: String,
    /// Owner of the library's source repository.
    pub owner: String,
    /// Source repository name (and clone directory).
    pub repository: String,
    /// Docs directory relative to the clone.
    pub docs_dir: String,
    /// Built HTML relative to the docs directory.
    pub html_dir: String,
    /// pip requirement installed from inside the clone.
    pub install_spec: String,
    /// Logo rasterized into the docset icons, relative to the working directory.
    pub logo: String,
    pub online_redirect_url: String,
    /// How the release to check out is chosen.
    pub release_lookup: ReleaseLookup,
    /// Extra `owner/name` repositories cloned before building docs.
    pub data_repositories: Vec<String>,
    pub build_steps: Vec<BuildStep>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        let docs_env: BTreeMap<String, String> = [
            ("MPLBACKEND", "Agg"),
            ("SEABORN_DATA", "{root}/seaborn-data"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let mut notebooks_env = docs_env.clone();
        notebooks_env.insert("NB_KERNEL".to_string(), "python".to_string());

        Self {
            name: "seaborn".to_string(),
            owner: "mwaskom".to_string(),
            repository: "seaborn".to_string(),
            docs_dir: "doc".to_string(),
            html_dir: "_build/html".to_string(),
            install_spec: ".[stats,docs]".to_string(),
            logo: "seaborn/doc/_build/html/_static/logo-mark-lightbg.png".to_string(),
            online_redirect_url: "https://seaborn.pydata.org/".to_string(),
            release_lookup: ReleaseLookup::Latest,
            data_repositories: vec!["mwaskom/seaborn-data".to_string()],
            build_steps: vec![
                BuildStep {
                    program: "make".to_string(),
                    args: vec!["notebooks".to_string()],
                    env: notebooks_env,
                },
                BuildStep {
                    program: "make".to_string(),
                    args: vec!["html".to_string()],
                    env: docs_env,
                },
            ],
        }
    }
}

impl LibraryConfig {
    /// `owner/repository` address of the library source.
    pub fn address(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }

    /// Docs directory relative to the working directory.
    pub fn docs_path(&self) -> PathBuf {
        Path::new(&self.repository).join(&self.docs_dir)
    }

    /// Built HTML directory relative to the working directory.
    pub fn html_path(&self) -> PathBuf {
        self.docs_path().join(&self.html_dir)
    }
}

/// Strategy for picking the release tag to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReleaseLookup {
    /// The hosting API's "latest release".
    #[default]
    Latest,
    /// The greatest numeric tag in the release list.
    ReleaseList,
}

/// One documentation build command, run in the docs directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildStep {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Environment values may contain `{root}`.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl BuildStep {
    /// Environment with `{root}` replaced by `root`.
    pub fn resolved_env(&self, root: &Path) -> BTreeMap<String, String> {
        let root = root.display().to_string();
        self.env
            .iter()
            .map(|(k, v)| (k.clone(), v.replace("{root}", &root)))
            .collect()
    }
}

/// The docset repository pull requests are opened against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UpstreamConfig {
    pub owner: String,
    pub repository: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            owner: "Kapeli".to_string(),
            repository: "Dash-User-Contributions".to_string(),
        }
    }
}

impl UpstreamConfig {
    pub fn address(&self) -> String {
        format!("{}/{}", self.owner, self.repository)
    }
}

/// Who contributes the docset, and where the generator lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContributorConfig {
    pub github_user: String,
    /// Repository hosting this pipeline's configuration.
    pub generator_repository: String,
    pub author: String,
    /// Defaults to the user's GitHub profile.
    pub author_url: Option<String>,
}

impl Default for ContributorConfig {
    fn default() -> Self {
        Self {
            github_user: "paw-lu".to_string(),
            generator_repository: "seaborn-dash2doc".to_string(),
            author: "Paulo S. Costa".to_string(),
            author_url: None,
        }
    }
}

impl ContributorConfig {
    pub fn author_url(&self) -> String {
        self.author_url
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{}", self.github_user))
    }

    /// `user/generator_repository`.
    pub fn generator_path(&self) -> String {
        format!("{}/{}", self.github_user, self.generator_repository)
    }
}

/// Docset packaging and metadata settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocsetSettings {
    pub aliases: Vec<String>,
    pub index_page: String,
    /// Requirements file pinning the documented library.
    pub requirements_file: String,
    pub version_source: VersionSource,
    /// Environment variable holding a push token, used in CI.
    pub token_env: String,
}

impl Default for DocsetSettings {
    fn default() -> Self {
        Self {
            aliases: ["python", "graph", "matplotlib", "visualization", "data"]
                .into_iter()
                .map(String::from)
                .collect(),
            index_page: "index.html".to_string(),
            requirements_file: "doc-requirements.txt".to_string(),
            version_source: VersionSource::Report,
            token_env: "GITHUB_TOKEN".to_string(),
        }
    }
}

/// Where the library version comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VersionSource {
    /// A pip dry-run install report of the requirements file.
    #[default]
    Report,
    /// Metadata of the already installed package (`pip show`).
    Installed,
}

/// Parse configuration from YAML text.
pub fn parse(yaml_content: &str) -> Result<PipelineConfig> {
    if yaml_content.trim().is_empty() {
        return Ok(PipelineConfig::default());
    }

    serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
        message: e.to_string(),
        hint: Some(format!(
            "see {} for the supported sections: library, upstream, contributor, docset",
            DEFAULT_CONFIG_FILE
        )),
    })
}

/// Load configuration from a file.
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse(&content)
}

/// Load `path` if given, else the default file in `root` if it exists, else
/// the built-in defaults.
pub fn load(path: Option<&Path>, root: &Path) -> Result<PipelineConfig> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(Error::ConfigParse {
                    message: format!("config file not found: {}", path.display()),
                    hint: Some("Omit --config to use the built-in defaults".to_string()),
                });
            }
            from_file(path)
        }
        None => {
            let default_path = root.join(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                log::debug!("Loading configuration from {}", default_path.display());
                from_file(default_path)
            } else {
                log::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                Ok(PipelineConfig::default())
            }
        }
    }
}
