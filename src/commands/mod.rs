//! # CLI Command Implementations
//!
//! Each subcommand of `docset-pipeline` lives in its own file with an `Args`
//! struct derived with `clap` and an `execute` function that calls into the
//! `docset_pipeline` library.

pub mod completions;
pub mod list;
pub mod run;
