use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use super::{DeliveryReceipt, WebhookTransport};
use crate::error::DeliveryError;
use crate::request::WebhookRequest;

/// reqwest-backed transport sharing one connection pool.
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { client: Client::new(), timeout }
    }

    pub fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait]
impl WebhookTransport for HttpTransport {
    fn name(&self) -> &str {
        "http"
    }

    async fn post_json(&self, request: &WebhookRequest) -> Result<DeliveryReceipt, DeliveryError> {
        let body = request.encode()?;
        debug!(event = %request.event, bytes = body.len(), "POST webhook");

        let response = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, request.content_type())
            .timeout(self.timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DeliveryError::Status { status: status.as_u16() });
        }
        Ok(DeliveryReceipt { status: status.as_u16() })
    }
}

impl HttpTransport {
    fn classify(&self, err: reqwest::Error) -> DeliveryError {
        if err.is_timeout() {
            DeliveryError::Timeout { timeout_ms: self.timeout.as_millis() as u64 }
        } else {
            DeliveryError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let transport = HttpTransport::new(Duration::from_millis(500));
        let request = WebhookRequest::new("nodeAdded", "http://127.0.0.1:9/unreachable", json!({}));
        let err = transport.post_json(&request).await.unwrap_err();
        assert!(matches!(err, DeliveryError::Network(_) | DeliveryError::Timeout { .. }));
    }
}
