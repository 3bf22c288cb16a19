pub mod http;
pub mod mock;

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::request::WebhookRequest;

/// Successful delivery: the endpoint answered with a 2xx status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
}

/// Something that can POST a JSON body to a URL.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    async fn post_json(&self, request: &WebhookRequest) -> Result<DeliveryReceipt, DeliveryError>;
}
