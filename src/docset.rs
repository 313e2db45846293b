//! # Docset Contribution Files
//!
//! A contribution to Dash-User-Contributions lives in
//! `docsets/{Name}/` of the fork and consists of:
//!
//! - `{name}.tgz`, the archived `.docset` bundle
//! - `icon.png` and `icon@2x.png`
//! - `docset.json`, the metadata record ([`DocsetConfig`])
//! - `README.md`, rendered by [`render_readme`]
//!
//! Older contributions may also carry a `versions/` directory and
//! differently named archives, which [`remove_stale`] clears before a new
//! archive is written.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

/// Docset author, as listed in `docset.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub url: String,
}

/// The `docset.json` record. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocsetConfig {
    pub name: String,
    pub version: String,
    pub archive: String,
    pub author: Author,
    pub aliases: Vec<String>,
}

impl DocsetConfig {
    pub fn new(name: &str, version: &str, author: Author, aliases: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            archive: archive_name(name),
            author,
            aliases,
        }
    }

    /// Pretty JSON with two-space indentation and no trailing newline.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that the record is internally consistent.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name is empty".to_string());
        }
        if self.version.trim().is_empty() {
            return Err("version is empty".to_string());
        }
        if self.archive != archive_name(&self.name) {
            return Err(format!(
                "archive {:?} does not match name (expected {:?})",
                self.archive,
                archive_name(&self.name)
            ));
        }
        if self.author.name.trim().is_empty() {
            return Err("author name is empty".to_string());
        }
        Url::parse(&self.author.url)
            .map_err(|e| format!("author url {:?}: {}", self.author.url, e))?;
        if self.aliases.iter().any(|alias| alias.trim().is_empty()) {
            return Err("aliases contain an empty entry".to_string());
        }
        Ok(())
    }
}

/// `{name}.tgz`
pub fn archive_name(name: &str) -> String {
    format!("{}.tgz", name)
}

/// `{name}.docset`
pub fn bundle_name(name: &str) -> String {
    format!("{}.docset", name)
}

/// Values interpolated into the README template.
#[derive(Debug, Clone)]
pub struct ReadmeContext<'a> {
    pub library: &'a str,
    pub author: &'a str,
    pub author_url: &'a str,
    /// `user/repository` of the generator.
    pub generator_path: &'a str,
    pub generator_repository: &'a str,
}

pub fn render_readme(ctx: &ReadmeContext<'_>) -> String {
    format!(
        r#"# {library}

## Who am I

[{author}]({author_url})

## How to generate docset

This docset is automatically generated via [{path}](https://github.com/{path}).

### Requirements

- [git](https://git-scm.com/)
- [GitHub CLI (gh)](https://cli.github.com/)
- [GNU Make](https://www.gnu.org/software/make/)
- [GNU Tar](https://www.gnu.org/software/tar/)
- [ImageMagick](https://imagemagick.org/index.php)
- [Rust](https://www.rust-lang.org/)
- [Python 3](https://www.python.org/)

### Build directions

To build the docs, run:

```console
$ gh repo clone {path}

$ cd {repository}

$ cargo run --release -- run --sessions clone docs icon dash
```
"#,
        library = ctx.library,
        author = ctx.author,
        author_url = ctx.author_url,
        path = ctx.generator_path,
        repository = ctx.generator_repository,
    )
}

/// Pull request title for a docset version.
pub fn pull_request_title(library: &str, version: &str) -> String {
    format!("Add docset for {} {}", library, version)
}

pub fn render_pull_request_body(title: &str, generator_path: &str) -> String {
    format!(
        "{title}.\n\nThis pull request was generated by [{path}](https://github.com/{path}).\n",
        title = title,
        path = generator_path,
    )
}

/// Existing docset directory matching `name` case-insensitively, or
/// `docsets_root/name` when there is none.
pub fn find_docset_dir(docsets_root: &Path, name: &str) -> Result<PathBuf> {
    let lowered = name.to_lowercase();

    for entry in fs::read_dir(docsets_root)? {
        let path = entry?.path();
        let matches = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase() == lowered)
            .unwrap_or(false);

        if matches && path.is_dir() {
            return Ok(path);
        }
    }

    Ok(docsets_root.join(name))
}

/// Remove `versions/` and every `*.tgz*` file from a docset directory.
///
/// Returns the number of removed entries.
pub fn remove_stale(dir: &Path) -> Result<usize> {
    let mut removed = 0;

    let versions = dir.join("versions");
    if versions.exists() {
        fs::remove_dir_all(&versions)?;
        log::info!("Removed {}", versions.display());
        removed += 1;
    }

    let pattern = format!("{}/*.tgz*", glob::Pattern::escape(&dir.to_string_lossy()));
    for entry in glob::glob(&pattern)? {
        let path = entry?;
        if path.is_file() {
            fs::remove_file(&path)?;
            log::info!("Removed {}", path.display());
            removed += 1;
        }
    }

    Ok(removed)
}

/// Copy `icon*.png` from a built docset into `dest`.
pub fn copy_icons(build: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let pattern = format!("{}/icon*.png", glob::Pattern::escape(&build.to_string_lossy()));
    let mut copied = Vec::new();

    for entry in glob::glob(&pattern)? {
        let source = entry?;
        if let Some(file_name) = source.file_name() {
            let target = dest.join(file_name);
            fs::copy(&source, &target)?;
            copied.push(target);
        }
    }

    Ok(copied)
}

/// Read back a written `docset.json` and check it against the typed record.
pub fn validate_config_file(path: &Path) -> Result<DocsetConfig> {
    let invalid = |message: String| Error::InvalidDocsetConfig {
        path: path.display().to_string(),
        message,
    };

    let content = fs::read_to_string(path)?;
    let config: DocsetConfig =
        serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
    config.validate().map_err(invalid)?;
    Ok(config)
}
