//! Webhook delivery with bounded retry
//!
//! Delivers exactly one serialized card to exactly one destination. The
//! retry policy is an explicit value so tests can run the loop with a mock
//! transport and zero delay.

use std::time::Duration;

use async_trait::async_trait;
use msgcard::MessageCard;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::NotifyError;

/// Bounded retry policy for webhook posts
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts before giving up
    pub max_attempts: u32,
    /// Fixed pause between failed attempts, no backoff growth
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_secs(10),
        }
    }
}

/// Raw result of one outbound post: a success indicator plus the
/// transport's regular and diagnostic output
#[derive(Debug, Clone, Default)]
pub struct TransportReply {
    /// Whether the transport itself reported success
    pub ok: bool,
    /// Regular transport output (e.g. the response body)
    pub stdout: String,
    /// Diagnostic output; any content here fails the attempt even when the
    /// transport reported success
    pub stderr: String,
}

/// Outcome of a single delivery attempt; lives only inside the retry loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AttemptOutcome {
    Success,
    /// Transport reported success but emitted diagnostics; treated as
    /// suppressed failure
    TransportError,
    /// Transport reported a failure status
    ServerError,
}

fn classify(reply: &TransportReply) -> AttemptOutcome {
    if !reply.ok {
        AttemptOutcome::ServerError
    } else if !reply.stderr.is_empty() {
        AttemptOutcome::TransportError
    } else {
        AttemptOutcome::Success
    }
}

/// Outbound POST primitive with a `Content-Type: application/json` body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, body: &str, url: &str) -> TransportReply;
}

/// HTTP webhook transport
pub struct WebhookTransport {
    http: Client,
}

impl WebhookTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Transport for WebhookTransport {
    async fn post(&self, body: &str, url: &str) -> TransportReply {
        let response = match self
            .http
            .post(url)
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return TransportReply {
                    ok: false,
                    stdout: String::new(),
                    stderr: e.to_string(),
                };
            }
        };

        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        if status.is_success() {
            TransportReply {
                ok: true,
                stdout: text,
                stderr: String::new(),
            }
        } else {
            TransportReply {
                ok: false,
                stdout: String::new(),
                stderr: format!("HTTP {}: {}", status.as_u16(), text),
            }
        }
    }
}

/// Delivers one card to one destination, masking transient failures up to
/// the retry bound
pub struct DeliveryEngine<T: Transport> {
    transport: T,
    policy: RetryPolicy,
}

impl<T: Transport> DeliveryEngine<T> {
    pub fn new(transport: T, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Post the card until one attempt succeeds.
    ///
    /// The card is serialized fresh on every attempt and must not be
    /// mutated during delivery. Delivery is binary: either some attempt
    /// succeeds, or the terminal [`NotifyError::DeliveryFailed`] is
    /// returned once the bound is reached.
    pub async fn deliver(&self, card: &MessageCard, url: &str) -> Result<(), NotifyError> {
        for attempt in 1..=self.policy.max_attempts {
            if attempt > 1 {
                tokio::time::sleep(self.policy.delay).await;
            }

            debug!(attempt, "webhook post attempt");
            let body = card.to_wire().to_string();
            let reply = self.transport.post(&body, url).await;

            match classify(&reply) {
                AttemptOutcome::Success => {
                    debug!(attempt, "webhook accepted card");
                    return Ok(());
                }
                outcome => {
                    warn!(attempt, ?outcome, stderr = %reply.stderr, "webhook post failed");
                }
            }
        }

        warn!(
            attempts = self.policy.max_attempts,
            "giving up posting to webhook"
        );
        Err(NotifyError::DeliveryFailed {
            attempts: self.policy.max_attempts,
        })
    }
}
