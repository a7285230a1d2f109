//! CLI Module for Snippfy
//! Command-line access to the snippet collection without launching the
//! terminal UI: list and filter snippets, show one, copy its code, or look
//! at the tag vocabulary.

pub mod commands;
pub mod tree;

use crate::app::AppSettings;
use crate::config::Config;
use crate::models::{SnippetSource, TagVocabulary};
use crate::ui::colors::TagPalette;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "snippfy",
    version,
    about = "Browse, filter and copy code snippets from a JSON collection"
)]
pub struct Cli {
    /// Snippet document to load (http(s) URL or file path)
    #[arg(long, global = true, value_name = "URL|PATH")]
    pub source: Option<String>,

    /// Config file to use instead of ~/.config/snippfy/config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Offer the tags found in the data instead of the fixed tag list
    #[arg(long, global = true)]
    pub tags_from_data: bool,

    /// More log output (repeat for more)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Launch the interactive browser (the default)
    Tui,
    /// List snippets matching an optional tag and search text
    #[command(visible_aliases = ["ls", "search"])]
    List {
        /// Only snippets carrying exactly this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Case-insensitive text to look for in title, description, code and tags
        query: Vec<String>,
    },
    /// Print one snippet including its code
    #[command(visible_alias = "view")]
    Show { id: String },
    /// Copy a snippet's code to the clipboard
    Copy { id: String },
    /// Print the tag vocabulary with snippet counts
    Tags {
        /// Print every tag with the snippets under it
        #[arg(long)]
        tree: bool,
    },
}

impl Cli {
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Command::Tui))
    }
}

/// Merges config file values with command-line overrides
pub fn app_settings(cli: &Cli, config: &Config) -> AppSettings {
    let source = cli.source.as_deref().unwrap_or(&config.source);

    let vocabulary = match &config.tags {
        Some(tags) => TagVocabulary::from_labels(tags.iter().cloned()),
        None => TagVocabulary::default(),
    };

    AppSettings {
        source: SnippetSource::parse(source),
        vocabulary,
        tags_from_data: cli.tags_from_data || config.tags_from_data,
        palette: TagPalette::with_overrides(&config.tag_colors),
    }
}
