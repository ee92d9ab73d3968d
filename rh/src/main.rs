//! RepoHerald CLI entry point

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::debug;

use msgcard::CardStore;
use repoherald::aggregate::{Aggregator, ClearPolicy, CycleInputs, CycleOutcome};
use repoherald::cli::{Cli, Command, ProducerArgs};
use repoherald::config::{Config, WEBHOOK_ENV};
use repoherald::deliver::{DeliveryEngine, RetryPolicy, WebhookTransport};
use repoherald::notify::{self, NotifyInputs, NotifyOutcome};
use repoherald::summary::{ImportResult, StagingResult};

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let level = match cli_log_level.map(|s| s.to_uppercase()).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    debug!(?config, "configuration loaded");

    match cli.command {
        Command::Notify {
            producer,
            verbosity,
            name,
        } => cmd_notify(&config, producer, verbosity, name).await,
        Command::Summarize {
            producer,
            msg_file,
            clear_at_start,
            clear_after_send,
            clear_at_finish,
        } => {
            cmd_summarize(
                &config,
                producer,
                msg_file,
                clear_at_start,
                clear_after_send,
                clear_at_finish,
            )
            .await
        }
    }
}

/// Read whichever producer result files were passed on the command line
fn load_summaries(producer: &ProducerArgs) -> Result<(Option<ImportResult>, Option<StagingResult>)> {
    let import = match &producer.import_summary {
        Some(path) => {
            let text = fs::read_to_string(path)
                .context(format!("Failed to read import summary {}", path.display()))?;
            let summary = ImportResult::from_json(&text)
                .context(format!("Failed to parse import summary {}", path.display()))?;
            Some(summary)
        }
        None => None,
    };

    let staging = match &producer.staging_summary {
        Some(path) => {
            let text = fs::read_to_string(path)
                .context(format!("Failed to read staging summary {}", path.display()))?;
            let summary = StagingResult::from_json(&text)
                .context(format!("Failed to parse staging summary {}", path.display()))?;
            Some(summary)
        }
        None => None,
    };

    Ok((import, staging))
}

fn build_engine() -> Result<DeliveryEngine<WebhookTransport>> {
    let transport = WebhookTransport::new().context("Failed to build HTTP client")?;
    Ok(DeliveryEngine::new(transport, RetryPolicy::default()))
}

async fn cmd_notify(
    config: &Config,
    producer: ProducerArgs,
    verbosity: Option<u8>,
    name: Option<String>,
) -> Result<()> {
    let webhook_url = producer
        .webhook_url
        .clone()
        .or_else(|| config.webhook_url.clone())
        .ok_or_else(|| {
            eyre!(
                "notify requires a webhook URL (--webhook-url, config, or {})",
                WEBHOOK_ENV
            )
        })?;

    let (import, staging) = load_summaries(&producer)?;
    let engine = build_engine()?;

    let inputs = NotifyInputs {
        changed: producer.changed,
        import: import.as_ref(),
        staging: staging.as_ref(),
        display_name: name.as_deref().unwrap_or(""),
        username: producer.username.as_deref().unwrap_or(&config.username),
        icon_url: producer.icon_url.as_deref().or(config.icon_url.as_deref()),
        verbosity: verbosity.unwrap_or(config.verbosity),
    };

    match notify::run(&engine, &webhook_url, inputs).await? {
        NotifyOutcome::Sent => println!("{} Card posted to webhook", "✓".green()),
        NotifyOutcome::NothingToReport => println!("Nothing to report"),
    }

    Ok(())
}

async fn cmd_summarize(
    config: &Config,
    producer: ProducerArgs,
    msg_file: Option<PathBuf>,
    clear_at_start: bool,
    clear_after_send: Option<bool>,
    clear_at_finish: bool,
) -> Result<()> {
    let (import, staging) = load_summaries(&producer)?;

    let msg_file = msg_file.or_else(|| config.msg_file.clone());
    let store = msg_file.as_ref().map(CardStore::new);
    let policy = ClearPolicy {
        at_start: clear_at_start || config.clear_at_start,
        after_send: clear_after_send.unwrap_or(config.clear_after_send),
        at_finish: clear_at_finish || config.clear_at_finish,
    };

    let webhook_url = producer
        .webhook_url
        .clone()
        .or_else(|| config.webhook_url.clone());

    let aggregator = Aggregator::new(store, policy, build_engine()?);
    let outcome = aggregator
        .run_cycle(CycleInputs {
            changed: producer.changed,
            import: import.as_ref(),
            staging: staging.as_ref(),
            webhook_url: webhook_url.as_deref(),
            username: producer.username.as_deref().unwrap_or(&config.username),
            icon_url: producer.icon_url.as_deref().or(config.icon_url.as_deref()),
        })
        .await?;

    match outcome {
        CycleOutcome::Delivered => println!("{} Summary card posted to webhook", "✓".green()),
        CycleOutcome::Deferred => match &msg_file {
            Some(path) if !policy.at_finish => {
                println!("Card collected in {}", path.display().to_string().cyan())
            }
            _ => println!("No webhook configured, card discarded"),
        },
    }

    Ok(())
}
