//! # Docset Pipeline Library
//!
//! This library builds a [Dash](https://kapeli.com/dash) docset for a Python
//! library and contributes it to the community docset repository. It backs
//! the `docset-pipeline` command-line tool.
//!
//! ## Quick Example
//!
//! ```
//! use docset_pipeline::config::PipelineConfig;
//! use docset_pipeline::runner::RecordingRunner;
//! use docset_pipeline::session::{self, Session, SessionContext, Tag};
//!
//! let runner = RecordingRunner::new();
//! let ctx = SessionContext::new(PipelineConfig::default(), &runner, ".".into());
//!
//! let build = session::select(&[], &[Tag::Build]);
//! assert_eq!(build.first(), Some(&Session::Clone));
//!
//! Session::Icon.run(&ctx).unwrap();
//! assert_eq!(runner.calls().len(), 2);
//! ```
//!
//! ## Core Concepts
//!
//! - **Sessions (`session`)**: Named steps such as `clone`, `dash` or
//!   `pull-request`, grouped by the `build` and `contribute` tags.
//! - **Runner (`runner`)**: Every step shells out to an external tool
//!   (`git`, `gh`, `pip`, `convert`, `tar`, `doc2dash`) through the
//!   `CommandRunner` trait.
//! - **Configuration (`config`)**: An optional YAML file describing the
//!   library, the upstream docset repository and the contributor. Defaults
//!   describe the seaborn docset.
//! - **Helpers (`version`, `github`, `git`, `docset`)**: Parsing of tool
//!   output and generation of the contribution files.

pub mod config;
pub mod docset;
pub mod error;
pub mod git;
pub mod github;
pub mod output;
pub mod runner;
pub mod session;
pub mod version;
