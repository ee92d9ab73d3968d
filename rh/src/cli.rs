//! CLI command definitions and subcommands

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// RepoHerald - posts package repo change cards to a chat webhook
#[derive(Parser, Debug)]
#[command(
    name = "rh",
    about = "Posts package repo change cards to a chat webhook",
    version
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(short = 'l', long = "log-level", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by both notification commands
#[derive(Args, Debug)]
pub struct ProducerArgs {
    /// The producers changed something that should be reported
    #[arg(long)]
    pub changed: bool,

    /// JSON result file of the package import step
    #[arg(long, value_name = "FILE")]
    pub import_summary: Option<PathBuf>,

    /// JSON result file of the catalog staging step
    #[arg(long, value_name = "FILE")]
    pub staging_summary: Option<PathBuf>,

    /// Webhook destination URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub webhook_url: Option<String>,

    /// Card display name (overrides config)
    #[arg(long)]
    pub username: Option<String>,

    /// Card icon URL (overrides config)
    #[arg(long, value_name = "URL")]
    pub icon_url: Option<String>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Post one detailed card for a single producer run
    Notify {
        #[command(flatten)]
        producer: ProducerArgs,

        /// Detail level (0 brief - 3 all details)
        #[arg(short, long)]
        verbosity: Option<u8>,

        /// Generic product name appended to the card headline
        #[arg(long)]
        name: Option<String>,
    },

    /// Collect producer runs into a cached card and post the summary
    Summarize {
        #[command(flatten)]
        producer: ProducerArgs,

        /// Card cache file enabling aggregation across runs
        #[arg(long, value_name = "FILE")]
        msg_file: Option<PathBuf>,

        /// Drop the cached card before this run
        #[arg(long)]
        clear_at_start: bool,

        /// Delete the cached card after a successful send (default true)
        #[arg(long, value_name = "BOOL")]
        clear_after_send: Option<bool>,

        /// Delete the cached card when this run finishes, sent or not
        #[arg(long)]
        clear_at_finish: bool,
    },
}
