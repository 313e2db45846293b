//! Wrappers over the GitHub CLI (`gh`).
//!
//! `gh` handles authentication itself (`gh auth login` or `GH_TOKEN`), so
//! nothing here deals with credentials.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};
use crate::version::latest_numeric_tag;

const ACCEPT_HEADER: &str = "--header=Accept: application/vnd.github+json";

/// Clone `owner/name` into `cwd`.
pub fn clone_repository(runner: &dyn CommandRunner, address: &str, cwd: &Path) -> Result<()> {
    runner.run(
        &Invocation::new("gh")
            .args(["repo", "clone", address])
            .current_dir(cwd),
    )
}

/// Fork `owner/name` to the authenticated user and clone the fork into `cwd`.
///
/// `gh` adds the original repository as the `upstream` remote.
pub fn fork_and_clone(runner: &dyn CommandRunner, address: &str, cwd: &Path) -> Result<()> {
    runner.run(
        &Invocation::new("gh")
            .args(["repo", "fork", "--clone", address])
            .current_dir(cwd),
    )
}

/// Tag name of the repository's latest published release.
pub fn latest_release_tag(
    runner: &dyn CommandRunner,
    owner: &str,
    repository: &str,
    cwd: &Path,
) -> Result<String> {
    let output = runner.output(
        &Invocation::new("gh")
            .arg("api")
            .arg(ACCEPT_HEADER)
            .arg(format!("/repos/{}/{}/releases/latest", owner, repository))
            .arg("--jq=.tag_name")
            .current_dir(cwd),
    )?;

    let tag = output.trim();
    if tag.is_empty() {
        return Err(Error::NoReleaseTag {
            repository: format!("{}/{}", owner, repository),
        });
    }
    Ok(tag.to_string())
}

/// Tag column of `gh release list` output.
///
/// Lines are tab separated: title, type, tag name, published date. The type
/// column may be empty, so columns are located by position, not by content.
pub fn tags_from_release_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let columns: Vec<&str> = line.split('\t').collect();
            match columns.as_slice() {
                [_, _, tag, ..] if !tag.trim().is_empty() => Some(tag.trim().to_string()),
                _ => None,
            }
        })
        .collect()
}

/// Greatest numeric tag from the repository's release list.
pub fn release_tag_from_list(
    runner: &dyn CommandRunner,
    owner: &str,
    repository: &str,
    cwd: &Path,
) -> Result<String> {
    let address = format!("{}/{}", owner, repository);
    let output = runner.output(
        &Invocation::new("gh")
            .args(["release", "list", "--limit", "100"])
            .arg(format!("--repo={}", address))
            .current_dir(cwd),
    )?;

    let tags = tags_from_release_list(&output);
    log::debug!("{} releases listed for {}", tags.len(), address);
    latest_numeric_tag(&tags).ok_or(Error::NoReleaseTag {
        repository: address,
    })
}

#[derive(Debug, Deserialize)]
struct RepositoryResponse {
    default_branch: Option<String>,
}

/// Default branch name from a `GET /repos/{owner}/{name}` response.
pub fn trunk_branch_from_response(response: &str, repository: &str) -> Result<String> {
    let response: RepositoryResponse = serde_json::from_str(response)?;

    match response.default_branch.as_deref().map(str::trim) {
        Some(branch) if !branch.is_empty() => Ok(branch.to_string()),
        _ => Err(Error::NoTrunkBranch {
            repository: repository.to_string(),
        }),
    }
}

/// Name of the repository's trunk branch.
pub fn trunk_branch(
    runner: &dyn CommandRunner,
    owner: &str,
    repository: &str,
    cwd: &Path,
) -> Result<String> {
    let output = runner.output(
        &Invocation::new("gh")
            .arg("api")
            .arg(ACCEPT_HEADER)
            .arg(format!("/repos/{}/{}", owner, repository))
            .current_dir(cwd),
    )?;
    trunk_branch_from_response(&output, &format!("{}/{}", owner, repository))
}

/// What to open a pull request with.
#[derive(Debug, Clone)]
pub struct PullRequest<'a> {
    pub repository: &'a str,
    pub base: &'a str,
    pub title: &'a str,
    pub body: &'a str,
}

pub fn create_pull_request(
    runner: &dyn CommandRunner,
    request: &PullRequest<'_>,
    cwd: &Path,
) -> Result<()> {
    runner.run(
        &Invocation::new("gh")
            .args(["pr", "create"])
            .arg(format!("--repo={}", request.repository))
            .arg(format!("--base={}", request.base))
            .arg(format!("--title={}", request.title))
            .arg(format!("--body={}", request.body))
            .current_dir(cwd),
    )
}
