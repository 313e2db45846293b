//! # Run Command Implementation
//!
//! Runs pipeline sessions, picked by name (`--sessions`) and/or by tag
//! (`--tags`). Selected sessions run in declaration order and the command
//! stops at the first failing session, exiting non-zero.
//!
//! Arguments after `--` are passed through to `doc2dash` by the `dash`
//! session:
//!
//! ```bash
//! docset-pipeline run --tags build -- --force
//! docset-pipeline run --sessions fill-forms check-types
//! ```

use anyhow::{bail, Context, Result};
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Args;

use docset_pipeline::config;
use docset_pipeline::output::emoji;
use docset_pipeline::runner::SystemRunner;
use docset_pipeline::session::{self, Session, SessionContext, Tag};

use crate::cli::GlobalOptions;

/// Run sessions by name or tag
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Sessions to run
    #[arg(
        short,
        long,
        value_name = "SESSION",
        num_args = 1..,
        value_parser = PossibleValuesParser::new(Session::ALL.map(Session::name))
            .try_map(|s| s.parse::<Session>()),
    )]
    pub sessions: Vec<Session>,

    /// Run every session carrying one of these tags
    #[arg(
        short,
        long,
        value_name = "TAG",
        num_args = 1..,
        value_parser = PossibleValuesParser::new(Tag::ALL.map(Tag::name))
            .try_map(|s| s.parse::<Tag>()),
    )]
    pub tags: Vec<Tag>,

    /// Arguments passed through to doc2dash
    #[arg(last = true, value_name = "POSARGS")]
    pub posargs: Vec<String>,
}

/// Execute the `run` command.
pub fn execute(args: RunArgs, globals: &GlobalOptions) -> Result<()> {
    let selected = session::select(&args.sessions, &args.tags);
    if selected.is_empty() {
        bail!("No sessions selected. Pass --sessions or --tags (see `docset-pipeline list`)");
    }

    let config = config::load(globals.config.as_deref(), &globals.root)
        .context("Failed to load pipeline configuration")?;

    let runner = SystemRunner;
    let ctx = SessionContext::new(config, &runner, globals.root.clone()).with_posargs(args.posargs);
    let output = &globals.output;

    let mut current = None;
    let result = session::run_all(&ctx, &selected, |s| {
        current = Some(s);
        eprintln!("{} Running session {}", emoji(output, "📦", "[SESSION]"), s);
    });

    match result {
        Ok(()) => {
            eprintln!(
                "{} {} session(s) successful",
                emoji(output, "✅", "[OK]"),
                selected.len()
            );
            Ok(())
        }
        Err(e) => {
            let failed = current.map(|s| s.name()).unwrap_or("unknown");
            Err(anyhow::Error::new(e).context(format!("Session {} failed", failed)))
        }
    }
}
