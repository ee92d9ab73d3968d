//! Single-shot notification for one producer run
//!
//! Builds one detailed card from whatever the producers reported and posts
//! it immediately. Nothing is cached: this is the companion to the
//! aggregating cycle for pipelines that want one card per run.

use msgcard::MessageCard;
use tracing::info;

use crate::deliver::{DeliveryEngine, Transport};
use crate::error::NotifyError;
use crate::summary::{ImportResult, StagingResult};
use crate::translate::{self, TranslationMode};

/// Inputs of one single-shot notification
pub struct NotifyInputs<'a> {
    /// Whether the producers changed anything this run
    pub changed: bool,
    /// Package import result, if that step ran
    pub import: Option<&'a ImportResult>,
    /// Catalog staging result, if that step ran
    pub staging: Option<&'a StagingResult>,
    /// Generic product name appended to the card headline
    pub display_name: &'a str,
    /// Card display name
    pub username: &'a str,
    /// Card icon URL
    pub icon_url: Option<&'a str>,
    /// Detail level 0-3
    pub verbosity: u8,
}

/// How the notification ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// The card was accepted by the webhook
    Sent,
    /// No change or no summaries: nothing was posted, which is success
    NothingToReport,
}

/// Post one detailed card for this run's producer results.
///
/// The activity subtitle names the contributing producers and the headline
/// carries the item name, combined with the generic display name where one
/// is set.
pub async fn run<T: Transport>(
    engine: &DeliveryEngine<T>,
    url: &str,
    inputs: NotifyInputs<'_>,
) -> Result<NotifyOutcome, NotifyError> {
    let mut card = MessageCard::new(inputs.username, inputs.icon_url);
    let mode = TranslationMode::Detailed {
        verbosity: inputs.verbosity,
    };

    let activity_title = match (inputs.changed, inputs.import, inputs.staging) {
        (true, Some(import), Some(staging)) => {
            card.set_activity_subtitle("Importer and AutoStaging");
            let import_name = translate::apply_import(&mut card, import, mode)?;
            translate::apply_staging(&mut card, staging, mode)?;
            format!("{} / {}", import_name, inputs.display_name)
        }
        (true, Some(import), None) => {
            card.set_activity_subtitle("Importer");
            let import_name = translate::apply_import(&mut card, import, mode)?;
            if inputs.display_name.is_empty() {
                import_name
            } else {
                format!("{} / {}", import_name, inputs.display_name)
            }
        }
        (true, None, Some(staging)) => {
            card.set_activity_subtitle("AutoStaging");
            translate::apply_staging(&mut card, staging, mode)?
        }
        _ => {
            info!("nothing to report");
            return Ok(NotifyOutcome::NothingToReport);
        }
    };
    card.set_activity_title(activity_title);

    engine.deliver(&card, url).await?;
    Ok(NotifyOutcome::Sent)
}
