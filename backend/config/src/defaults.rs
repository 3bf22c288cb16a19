//! Config defaults: applies default values to parsed config.

use crate::schema::{DeliveryConfig, LoggingConfig, NodehookConfig};

/// Default per-request webhook timeout.
pub const DEFAULT_DELIVERY_TIMEOUT_MS: u64 = 10_000;

pub const DEFAULT_LOG_LEVEL: &str = "info";

pub const DEFAULT_LOG_DIR: &str = "logs";

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: NodehookConfig) -> NodehookConfig {
    let config = apply_delivery_defaults(config);
    apply_logging_defaults(config)
}

fn apply_delivery_defaults(mut config: NodehookConfig) -> NodehookConfig {
    let delivery = config.delivery.get_or_insert_with(DeliveryConfig::default);
    if delivery.timeout_ms.is_none() {
        delivery.timeout_ms = Some(DEFAULT_DELIVERY_TIMEOUT_MS);
    }
    if delivery.parallel.is_none() {
        delivery.parallel = Some(true);
    }
    config
}

fn apply_logging_defaults(mut config: NodehookConfig) -> NodehookConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    if logging.dir.is_none() {
        logging.dir = Some(DEFAULT_LOG_DIR.to_string());
    }
    config
}
