//! File-backed persistence for a single pending card
//!
//! The store owns one path holding one wire-encoded card. Reads fall back
//! to "no card" on any problem; writes and deletes surface their errors.
//! Concurrent writers are last-writer-wins; callers are expected to
//! serialize invocations externally.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::card::MessageCard;

/// Errors surfaced by [`CardStore`]
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write card file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to delete card file {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Durable storage for exactly one [`MessageCard`]
pub struct CardStore {
    path: PathBuf,
}

impl CardStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        debug!(?path, "opened card store");
        Self { path }
    }

    /// The backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored card.
    ///
    /// A missing, unreadable or malformed file is not an error: it is
    /// reported as a diagnostic and `None` is returned so the caller can
    /// start over with a fresh card.
    pub fn load(&self) -> Option<MessageCard> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored card");
                return None;
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "card file could not be read, starting fresh");
                return None;
            }
        };

        let value: serde_json::Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "card file is not valid JSON, starting fresh");
                return None;
            }
        };

        match MessageCard::from_wire(&value) {
            Some(card) => Some(card),
            None => {
                warn!(path = %self.path.display(), "card file is not a card document, starting fresh");
                None
            }
        }
    }

    /// Write the card, replacing any previous content.
    ///
    /// Serialization is canonical, so saving an unchanged card rewrites the
    /// file byte for byte.
    pub fn save(&self, card: &MessageCard) -> Result<(), StoreError> {
        let content = card.to_wire().to_string();
        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), fact_count = card.facts().len(), "card saved");
        Ok(())
    }

    /// Delete the stored card. A file that is already gone counts as
    /// success.
    pub fn delete(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "card file deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Delete {
                path: self.path.clone(),
                source,
            }),
        }
    }
}
