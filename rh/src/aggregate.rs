//! The aggregation cycle: acquire, extend, persist, deliver, clear
//!
//! Bridges one in-memory card across repeated process invocations through
//! an injected [`CardStore`]. Each invocation is one sequential pass; runs
//! against the same store are expected to be serialized externally
//! (concurrent cycles are last-writer-wins on the whole card).

use chrono::Local;
use msgcard::{CardStore, MessageCard};
use tracing::{debug, info, warn};

use crate::deliver::{DeliveryEngine, Transport};
use crate::error::NotifyError;
use crate::summary::{ImportResult, StagingResult};
use crate::translate::{self, TranslationMode};

/// Independent clearing triggers around one cycle
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearPolicy {
    /// Ignore any stored card and start fresh
    pub at_start: bool,
    /// Delete the stored card after a confirmed successful send
    pub after_send: bool,
    /// Skip persisting and delete the stored card when the cycle finishes,
    /// delivered or not
    pub at_finish: bool,
}

/// What one cycle contributes and where the result may go
pub struct CycleInputs<'a> {
    /// Whether the producers changed anything this run
    pub changed: bool,
    /// Package import result, if that step ran
    pub import: Option<&'a ImportResult>,
    /// Catalog staging result, if that step ran
    pub staging: Option<&'a StagingResult>,
    /// Delivery destination; delivery is skipped entirely when unset
    pub webhook_url: Option<&'a str>,
    /// Card display name, used only when a fresh card is created
    pub username: &'a str,
    /// Card icon, used only when a fresh card is created
    pub icon_url: Option<&'a str>,
}

/// How a cycle ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The card was accepted by the webhook
    Delivered,
    /// No webhook configured; the card stays cached for a later cycle when
    /// a store is configured
    Deferred,
}

/// Accumulates producer results into one durable card and resolves its
/// lifecycle around the send
pub struct Aggregator<T: Transport> {
    store: Option<CardStore>,
    policy: ClearPolicy,
    engine: DeliveryEngine<T>,
}

impl<T: Transport> Aggregator<T> {
    /// Create an aggregator. Without a store every cycle starts fresh and
    /// nothing is persisted.
    pub fn new(store: Option<CardStore>, policy: ClearPolicy, engine: DeliveryEngine<T>) -> Self {
        Self {
            store,
            policy,
            engine,
        }
    }

    /// Run one aggregation cycle.
    ///
    /// The card is persisted before delivery is attempted, so a crash
    /// between the two loses nothing: the next cycle re-reads the file and
    /// re-attempts. A store write failure is fatal and aborts the cycle
    /// before any delivery attempt.
    pub async fn run_cycle(&self, inputs: CycleInputs<'_>) -> Result<CycleOutcome, NotifyError> {
        let mut card = self.acquire(&inputs);

        if inputs.changed {
            if let Some(import) = inputs.import {
                translate::apply_import(&mut card, import, TranslationMode::Compact)?;
            }
            if let Some(staging) = inputs.staging {
                translate::apply_staging(&mut card, staging, TranslationMode::Compact)?;
            }
        } else {
            debug!("no repo change reported, card left as is");
        }

        if let Some(store) = &self.store
            && !self.policy.at_finish
        {
            store
                .save(&card)
                .inspect_err(|e| warn!(error = %e, "failed to persist card, aborting cycle"))?;
        }

        let outcome = match inputs.webhook_url {
            Some(url) => match self.engine.deliver(&card, url).await {
                Ok(()) => {
                    if self.policy.after_send && let Some(store) = &self.store {
                        store.delete()?;
                    }
                    CycleOutcome::Delivered
                }
                Err(e) => {
                    if self.policy.at_finish && let Some(store) = &self.store {
                        // the delivery failure stays the primary error
                        if let Err(cleanup) = store.delete() {
                            warn!(error = %cleanup, "failed to clear card file after delivery failure");
                        }
                    }
                    return Err(e);
                }
            },
            None => {
                info!("no webhook configured, card not sent");
                CycleOutcome::Deferred
            }
        };

        if self.policy.at_finish && let Some(store) = &self.store {
            store.delete()?;
        }

        Ok(outcome)
    }

    /// Load the stored card, or create a fresh one stamped with the local
    /// start time. Rehydrated cards keep their activity title.
    fn acquire(&self, inputs: &CycleInputs<'_>) -> MessageCard {
        if !self.policy.at_start
            && let Some(store) = &self.store
            && let Some(card) = store.load()
        {
            debug!(fact_count = card.facts().len(), "extending stored card");
            return card;
        }

        let mut card = MessageCard::new(inputs.username, inputs.icon_url);
        card.set_activity_title(format!(
            "start: {}",
            Local::now().format("%Y-%m-%d %H:%M:%S")
        ));
        card
    }
}
