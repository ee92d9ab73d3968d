use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;

use msgcard::CardStore;
use msgcard::cli::{Cli, Command};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();

    match cli.command {
        Command::Show { file, raw } => {
            let store = CardStore::new(&file);
            let card = store
                .load()
                .ok_or_else(|| eyre!("No readable card in {}", file.display()))?;

            if raw {
                println!("{}", serde_json::to_string_pretty(&card.to_wire())?);
            } else {
                println!("Title: {}", card.title().cyan());
                println!("Activity: {}", card.activity_title());
                if !card.activity_subtitle().is_empty() {
                    println!("Subtitle: {}", card.activity_subtitle());
                }
                if let Some(image) = card.activity_image() {
                    println!("Image: {}", image);
                }
                if card.is_fresh() {
                    println!("No facts recorded");
                } else {
                    println!("Facts:");
                    for fact in card.facts() {
                        println!("  {}: {}", fact.name.yellow(), fact.value);
                    }
                }
            }
        }
        Command::Clear { file } => {
            info!("clearing card file {}", file.display());
            CardStore::new(&file).delete()?;
            println!("{} Cleared card file: {}", "✓".green(), file.display());
        }
    }

    Ok(())
}
