//! Notification error types

use msgcard::StoreError;
use thiserror::Error;

/// Errors that can end a notification run
#[derive(Debug, Error)]
pub enum NotifyError {
    /// All webhook post attempts were exhausted. Terminal; transient
    /// attempt failures are retried inside the delivery engine and never
    /// surfaced individually.
    #[error("webhook delivery failed after {attempts} attempts")]
    DeliveryFailed { attempts: u32 },

    /// An upstream summary is missing its identifying name. Contract
    /// violation by the producer, not retried.
    #[error("{origin} summary is missing its name")]
    MalformedSummary { origin: &'static str },

    /// The persisted card could not be written or deleted
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl NotifyError {
    /// Check if this is the terminal delivery failure
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, NotifyError::DeliveryFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_delivery_failure() {
        assert!(NotifyError::DeliveryFailed { attempts: 5 }.is_delivery_failure());
        assert!(!NotifyError::MalformedSummary { origin: "import" }.is_delivery_failure());
    }

    #[test]
    fn test_display_messages() {
        let err = NotifyError::DeliveryFailed { attempts: 5 };
        assert_eq!(err.to_string(), "webhook delivery failed after 5 attempts");

        let err = NotifyError::MalformedSummary { origin: "staging" };
        assert_eq!(err.to_string(), "staging summary is missing its name");
    }
}
