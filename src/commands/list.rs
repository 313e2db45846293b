//! # List Command Implementation
//!
//! Prints every session with its tags and a one-line description.

use anyhow::Result;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::Args;

use docset_pipeline::session::{Session, Tag};

use crate::cli::GlobalOptions;

/// List sessions with their tags
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Only list sessions carrying this tag
    #[arg(
        short,
        long,
        value_name = "TAG",
        value_parser = PossibleValuesParser::new(Tag::ALL.map(Tag::name))
            .try_map(|s| s.parse::<Tag>()),
    )]
    pub tag: Option<Tag>,
}

pub fn execute(args: ListArgs, _globals: &GlobalOptions) -> Result<()> {
    for session in Session::ALL {
        if let Some(tag) = args.tag {
            if !session.tags().contains(&tag) {
                continue;
            }
        }

        let tags: Vec<&str> = session.tags().iter().map(|t| t.name()).collect();
        let tags = if tags.is_empty() {
            String::new()
        } else {
            format!("[{}]", tags.join(", "))
        };
        println!("{:<18} {:<14} {}", session.name(), tags, session.description());
    }
    Ok(())
}
