//! Webhook delivery: request type, transports, and the failure-isolated dispatcher.

pub mod dispatcher;
pub mod error;
pub mod request;
pub mod transport;

pub use dispatcher::{DeliveryFailure, DeliveryMode, DispatchReport, WebhookDispatcher};
pub use error::DeliveryError;
pub use request::WebhookRequest;
pub use transport::http::HttpTransport;
pub use transport::mock::MockTransport;
pub use transport::{DeliveryReceipt, WebhookTransport};

use std::sync::Arc;

use nodehook_config::NodehookConfig;

/// Build the HTTP-backed dispatcher described by a loaded config.
pub fn dispatcher_from_config(config: &NodehookConfig) -> WebhookDispatcher {
    let timeout = config.delivery_timeout();
    let mode = if config.parallel_delivery() {
        DeliveryMode::Parallel
    } else {
        DeliveryMode::Sequential
    };
    WebhookDispatcher::new(config.endpoint_config(), Arc::new(HttpTransport::new(timeout)))
        .with_mode(mode)
        .with_timeout(timeout)
}
