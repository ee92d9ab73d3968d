//! CLI argument parsing for the msgcard inspection tool

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "msgcard")]
#[command(author, version, about = "Inspect and manage cached message card files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the card stored in a file
    Show {
        /// Card file path
        #[arg(required = true)]
        file: PathBuf,

        /// Print the raw wire document instead of a summary
        #[arg(short, long)]
        raw: bool,
    },

    /// Delete a stored card file
    Clear {
        /// Card file path
        #[arg(required = true)]
        file: PathBuf,
    },
}
