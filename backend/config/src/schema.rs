//! nodehook runtime configuration schema.
//!
//! Typed for serde YAML/JSON deserialization. Every section is optional;
//! `defaults::apply_all_defaults` fills in the gaps after loading.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_DELIVERY_TIMEOUT_MS, DEFAULT_LOG_DIR, DEFAULT_LOG_LEVEL};
use crate::endpoints::EndpointConfig;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration for nodehook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodehookConfig {
    /// Logical event name → ordered subscriber URLs
    #[serde(default)]
    pub endpoints: BTreeMap<String, Vec<String>>,

    /// Webhook delivery behaviour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery: Option<DeliveryConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryConfig {
    /// Per-request timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Deliver to all URLs of an event concurrently
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parallel: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling NDJSON log
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl NodehookConfig {
    /// Immutable endpoint table handed to the dispatcher.
    pub fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig::from_map(self.endpoints.clone())
    }

    pub fn delivery_timeout(&self) -> Duration {
        let ms = self
            .delivery
            .as_ref()
            .and_then(|d| d.timeout_ms)
            .unwrap_or(DEFAULT_DELIVERY_TIMEOUT_MS);
        Duration::from_millis(ms)
    }

    pub fn parallel_delivery(&self) -> bool {
        self.delivery.as_ref().and_then(|d| d.parallel).unwrap_or(true)
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_dir(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.dir.as_deref())
            .unwrap_or(DEFAULT_LOG_DIR)
    }
}
