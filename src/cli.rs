//! CLI argument parsing and command dispatch

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use docset_pipeline::output::OutputConfig;

use crate::commands;

/// Docset Pipeline - Build a Dash docset and contribute it upstream
#[derive(Parser, Debug)]
#[command(name = "docset-pipeline")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Pipeline configuration file (defaults to ./docset-pipeline.yaml when present)
    #[arg(short, long, global = true, value_name = "FILE", env = "DOCSET_PIPELINE_CONFIG")]
    config: Option<PathBuf>,

    /// Working directory that repositories are cloned into
    #[arg(long, global = true, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run sessions by name or tag
    Run(commands::run::RunArgs),

    /// List sessions with their tags
    List(commands::list::ListArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

/// Options shared by every command.
#[derive(Debug)]
pub struct GlobalOptions {
    pub config: Option<PathBuf>,
    pub root: PathBuf,
    pub output: OutputConfig,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);

        let root = self
            .root
            .canonicalize()
            .with_context(|| format!("Working directory not found: {}", self.root.display()))?;
        let globals = GlobalOptions {
            config: self.config,
            root,
            output: OutputConfig::from_env_and_flag(&self.color),
        };

        match self.command {
            Commands::Run(args) => commands::run::execute(args, &globals),
            Commands::List(args) => commands::list::execute(args, &globals),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// `RUST_LOG` wins over `--log-level` when set.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
