use serde_json::Value;

use crate::error::DeliveryError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// One outbound POST: a destination URL and its JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WebhookRequest {
    pub event: String,
    pub url: String,
    pub body: Value,
}

impl WebhookRequest {
    pub fn new(event: impl Into<String>, url: impl Into<String>, body: Value) -> Self {
        Self { event: event.into(), url: url.into(), body }
    }

    pub fn content_type(&self) -> &'static str {
        JSON_CONTENT_TYPE
    }

    /// Serialized body bytes.
    pub fn encode(&self) -> Result<Vec<u8>, DeliveryError> {
        serde_json::to_vec(&self.body).map_err(|e| DeliveryError::Encode(e.to_string()))
    }
}
