//! # External Command Execution
//!
//! Every session is a sequence of external tool invocations. This module
//! separates *describing* an invocation ([`Invocation`]) from *executing* it
//! ([`CommandRunner`]), so sessions can be exercised in tests without `git`,
//! `gh`, or `pip` being installed.
//!
//! - **`SystemRunner`** spawns real processes.
//! - **`RecordingRunner`** records each invocation and answers captured
//!   output from canned responses.
//!
//! The process working directory is never changed; each invocation carries
//! its own `cwd` instead.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::Mutex;

use log::{debug, info};

use crate::error::{Error, Result};

/// A single external command, fully described.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: BTreeMap<String, String>,
    /// Values masked in [`Invocation::command_line`].
    pub redacted: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: BTreeMap::new(),
            redacted: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run the command inside `dir` instead of the process working directory.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in vars {
            self.env.insert(key.into(), value.into());
        }
        self
    }

    /// Mask `secret` wherever it appears in the logged command line.
    pub fn redact(mut self, secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if !secret.is_empty() {
            self.redacted.push(secret);
        }
        self
    }

    /// The command as a single shell-like line, used for logs and errors.
    ///
    /// Arguments containing whitespace are single-quoted.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .map(|part| {
                let part = self
                    .redacted
                    .iter()
                    .fold(part.to_string(), |acc, secret| acc.replace(secret.as_str(), "***"));
                let part = part.as_str();
                if part.is_empty() || part.contains(char::is_whitespace) {
                    format!("'{}'", part.replace('\'', r"'\''"))
                } else {
                    part.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(cwd) = &self.cwd {
            command.current_dir(cwd);
        }
        command.envs(&self.env);
        command
    }
}

/// Trait for executing invocations - allows recording in tests
pub trait CommandRunner {
    /// Run with inherited stdio, failing on a non-zero exit status.
    fn run(&self, invocation: &Invocation) -> Result<()>;

    /// Run silently and return captured stdout, failing on a non-zero exit
    /// status.
    fn output(&self, invocation: &Invocation) -> Result<String>;
}

/// Runs invocations as real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    fn spawn_error(invocation: &Invocation, e: std::io::Error) -> Error {
        Error::Spawn {
            program: invocation.program.clone(),
            message: e.to_string(),
        }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        info!("> {}", invocation.command_line());
        if let Some(cwd) = &invocation.cwd {
            debug!("  in {}", cwd.display());
        }

        let status = invocation
            .to_command()
            .status()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        if !status.success() {
            return Err(Error::Command {
                command: invocation.command_line(),
                status: status.to_string(),
                stderr: String::new(),
            });
        }

        Ok(())
    }

    fn output(&self, invocation: &Invocation) -> Result<String> {
        info!("> {}", invocation.command_line());

        let output = invocation
            .to_command()
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Self::spawn_error(invocation, e))?;

        if !output.status.success() {
            return Err(Error::Command {
                command: invocation.command_line(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

/// Records invocations instead of executing them.
///
/// Captured output is answered from responses registered with
/// [`RecordingRunner::respond`], matched by the longest command-line prefix.
/// Commands registered with [`RecordingRunner::fail_on`] return
/// `Error::Command`.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<Invocation>>,
    responses: Vec<(String, String)>,
    failures: Vec<String>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `output` calls whose command line starts with `prefix`.
    pub fn respond(mut self, prefix: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.responses.push((prefix.into(), stdout.into()));
        self
    }

    /// Fail any call whose command line starts with `prefix`.
    pub fn fail_on(mut self, prefix: impl Into<String>) -> Self {
        self.failures.push(prefix.into());
        self
    }

    /// Every invocation seen so far, in order.
    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// Command lines of every invocation seen so far, in order.
    pub fn command_lines(&self) -> Vec<String> {
        self.calls().iter().map(Invocation::command_line).collect()
    }

    fn record(&self, invocation: &Invocation) -> Result<()> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(invocation.clone());
        }

        let line = invocation.command_line();
        if self.failures.iter().any(|prefix| line.starts_with(prefix)) {
            return Err(Error::Command {
                command: line,
                status: "exit status: 1".to_string(),
                stderr: String::new(),
            });
        }
        Ok(())
    }
}

impl CommandRunner for RecordingRunner {
    fn run(&self, invocation: &Invocation) -> Result<()> {
        self.record(invocation)
    }

    fn output(&self, invocation: &Invocation) -> Result<String> {
        self.record(invocation)?;

        let line = invocation.command_line();
        Ok(self
            .responses
            .iter()
            .filter(|(prefix, _)| line.starts_with(prefix.as_str()))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, stdout)| stdout.clone())
            .unwrap_or_default())
    }
}
