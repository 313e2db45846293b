//! Wrappers over the `git` command line.
//!
//! Each function runs one `git` subcommand inside the given repository.

use std::path::Path;

use url::Url;

use crate::error::{Error, Result};
use crate::runner::{CommandRunner, Invocation};

fn git(repo: &Path) -> Invocation {
    Invocation::new("git").current_dir(repo)
}

/// Check out `tags/{tag}` into a new branch with the tag's name.
pub fn checkout_tag(runner: &dyn CommandRunner, repo: &Path, tag: &str) -> Result<()> {
    runner.run(
        &git(repo)
            .arg("checkout")
            .arg(format!("tags/{}", tag))
            .args(["-b", tag]),
    )
}

/// Create and switch to `branch`.
pub fn switch_create(runner: &dyn CommandRunner, repo: &Path, branch: &str) -> Result<()> {
    runner.run(&git(repo).args(["switch", "--create", branch]))
}

pub fn fetch(runner: &dyn CommandRunner, repo: &Path, remote: &str) -> Result<()> {
    runner.run(&git(repo).args(["fetch", remote]))
}

pub fn reset_hard(runner: &dyn CommandRunner, repo: &Path, target: &str) -> Result<()> {
    runner.run(&git(repo).args(["reset", "--hard", target]))
}

/// Stage everything under `dir`.
pub fn add_all(runner: &dyn CommandRunner, dir: &Path) -> Result<()> {
    runner.run(&git(dir).args(["add", "."]))
}

pub fn commit(runner: &dyn CommandRunner, dir: &Path, message: &str) -> Result<()> {
    runner.run(&git(dir).arg("commit").arg(format!("--message={}", message)))
}

pub fn push_set_upstream(
    runner: &dyn CommandRunner,
    repo: &Path,
    remote: &str,
    branch: &str,
) -> Result<()> {
    runner.run(&git(repo).args(["push", "--set-upstream", remote, branch]))
}

/// URL configured for `remote`.
pub fn remote_url(runner: &dyn CommandRunner, repo: &Path, remote: &str) -> Result<String> {
    let output = runner.output(&git(repo).args(["remote", "get-url", remote]))?;
    let url = output.trim();
    if url.is_empty() {
        return Err(Error::NoRemoteUrl {
            remote: remote.to_string(),
        });
    }
    Ok(url.to_string())
}

/// Point `remote` at `url`. A password embedded in `url` is masked in logs.
pub fn set_remote_url(
    runner: &dyn CommandRunner,
    repo: &Path,
    remote: &str,
    url: &str,
) -> Result<()> {
    let mut invocation = git(repo).args(["remote", "set-url", remote, url]);
    if let Some(password) = Url::parse(url).ok().and_then(|u| u.password().map(String::from)) {
        invocation = invocation.redact(password);
    }
    runner.run(&invocation)
}

/// Embed `token` as `x-access-token` credentials in an https remote URL.
///
/// SSH and other non-https remotes are returned unchanged, since the token
/// cannot be used with them.
pub fn authenticated_url(remote: &str, token: &str) -> Result<String> {
    let remote = remote.trim();
    if remote.is_empty() {
        return Err(Error::NoRemoteUrl {
            remote: "origin".to_string(),
        });
    }

    let mut url = match Url::parse(remote) {
        Ok(url) if url.scheme() == "https" => url,
        _ => return Ok(remote.to_string()),
    };

    // Url only rejects credentials on cannot-be-a-base URLs, excluded above.
    let _ = url.set_username("x-access-token");
    let _ = url.set_password(Some(token));
    Ok(url.to_string())
}
