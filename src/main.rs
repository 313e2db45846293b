//! # Docset Pipeline CLI
//!
//! Binary entry point for the `docset-pipeline` command-line tool. It parses
//! arguments with `clap`, sets up logging and dispatches to a command; the
//! pipeline itself lives in the library crate.

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli.execute()
}
