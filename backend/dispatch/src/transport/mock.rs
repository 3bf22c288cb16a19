use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::{DeliveryReceipt, WebhookTransport};
use crate::error::DeliveryError;
use crate::request::WebhookRequest;

/// An in-memory transport that records every request.
///
/// URLs registered with `failing` answer with a network error, URLs
/// registered with `slow` sleep before answering.
#[derive(Default)]
pub struct MockTransport {
    sent: Mutex<Vec<WebhookRequest>>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(mut self, url: impl Into<String>) -> Self {
        self.failing.insert(url.into());
        self
    }

    pub fn slow(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    /// Every request that reached the transport, failed ones included.
    pub fn requests(&self) -> Vec<WebhookRequest> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn requests_to(&self, url: &str) -> Vec<WebhookRequest> {
        self.requests().into_iter().filter(|r| r.url == url).collect()
    }
}

#[async_trait]
impl WebhookTransport for MockTransport {
    fn name(&self) -> &str {
        "mock"
    }

    async fn post_json(&self, request: &WebhookRequest) -> Result<DeliveryReceipt, DeliveryError> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).push(request.clone());
        if let Some(delay) = self.delays.get(&request.url) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&request.url) {
            return Err(DeliveryError::Network(format!("connection refused: {}", request.url)));
        }
        Ok(DeliveryReceipt { status: 200 })
    }
}
