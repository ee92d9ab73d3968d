//! RepoHerald - webhook change notifications for package repos
//!
//! Two upstream producers report on a package repo: a package-import step
//! and a catalog-staging step. RepoHerald turns their result records into a
//! chat MessageCard and posts it to a webhook, either one card per run
//! (`notify`) or accumulated across runs through a cached card file
//! (`summarize`).
//!
//! # Modules
//!
//! - [`summary`] - producer result records
//! - [`translate`] - summaries to card facts, detailed or compact
//! - [`aggregate`] - the durable aggregation cycle
//! - [`deliver`] - webhook delivery with bounded retry
//! - [`notify`] - the single-shot card
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod deliver;
pub mod error;
pub mod notify;
pub mod summary;
pub mod translate;

// Re-export commonly used types
pub use aggregate::{Aggregator, ClearPolicy, CycleInputs, CycleOutcome};
pub use config::Config;
pub use deliver::{DeliveryEngine, RetryPolicy, Transport, TransportReply, WebhookTransport};
pub use error::NotifyError;
pub use notify::{NotifyInputs, NotifyOutcome};
pub use summary::{ImportResult, StagingResult};
pub use translate::TranslationMode;
