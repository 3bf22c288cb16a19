//! Webhook Delivery Logger
//!
//! One structured record per endpoint delivery, routed through `tracing`
//! under the `webhook_deliveries` target so it lands in the NDJSON file.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::redact::{redact_sensitive_data, redact_url};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Delivered { status: u16 },
    Failed { error: String },
}

#[derive(Debug, Serialize)]
pub struct DeliveryLogEntry {
    pub event: String,
    pub url: String,
    pub elapsed_ms: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub outcome: DeliveryOutcome,
}

pub struct DeliveryLogger;

impl DeliveryLogger {
    /// Build the redacted log entry for one delivery attempt.
    pub fn entry(event: &str, url: &str, elapsed_ms: u64, outcome: DeliveryOutcome) -> DeliveryLogEntry {
        let outcome = match outcome {
            DeliveryOutcome::Failed { error } => {
                DeliveryOutcome::Failed { error: redact_sensitive_data(&redact_url(&error)) }
            }
            delivered => delivered,
        };
        DeliveryLogEntry {
            event: event.to_string(),
            url: redact_url(url),
            elapsed_ms,
            timestamp: Utc::now(),
            outcome,
        }
    }

    /// Log one delivery attempt. Failures are logged at warn level.
    pub fn log(event: &str, url: &str, elapsed_ms: u64, outcome: DeliveryOutcome) {
        let entry = Self::entry(event, url, elapsed_ms, outcome);
        match &entry.outcome {
            DeliveryOutcome::Delivered { status } => info!(
                target: "webhook_deliveries",
                event = %entry.event,
                url = %entry.url,
                status = *status,
                elapsed_ms = entry.elapsed_ms,
                "Webhook delivered"
            ),
            DeliveryOutcome::Failed { error } => warn!(
                target: "webhook_deliveries",
                event = %entry.event,
                url = %entry.url,
                error = %error,
                elapsed_ms = entry.elapsed_ms,
                "Webhook request failed"
            ),
        }
    }
}
