//! Webhook dispatcher.
//!
//! Resolves the subscriber URLs for a logical event name and POSTs the
//! payload to each of them. Every delivery is isolated: a failing endpoint is
//! logged and counted, and the remaining endpoints are still served. Nothing
//! here returns an error to the caller.

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use nodehook_config::EndpointConfig;
use nodehook_logging::{DeliveryLogger, DeliveryOutcome};

use crate::error::DeliveryError;
use crate::request::WebhookRequest;
use crate::transport::{DeliveryReceipt, WebhookTransport};

/// Upper bound for one delivery when none is configured.
pub const DEFAULT_DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// How the URLs of one event are served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMode {
    /// One after another, in configured order.
    Sequential,
    /// All at once on the tokio runtime.
    #[default]
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryFailure {
    pub url: String,
    pub error: String,
}

/// Outcome of one `dispatch` call.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DispatchReport {
    pub event: String,
    pub attempted: usize,
    pub delivered: usize,
    pub failures: Vec<DeliveryFailure>,
}

impl DispatchReport {
    fn new(event: &str) -> Self {
        Self { event: event.to_string(), ..Default::default() }
    }

    /// True when every attempted delivery succeeded (vacuously true for zero).
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, url: String, result: Result<DeliveryReceipt, DeliveryError>) {
        match result {
            Ok(_) => self.delivered += 1,
            Err(e) => self.failures.push(DeliveryFailure { url, error: e.to_string() }),
        }
    }
}

/// Fans a payload out to every URL configured for an event.
#[derive(Clone)]
pub struct WebhookDispatcher {
    endpoints: Arc<EndpointConfig>,
    transport: Arc<dyn WebhookTransport>,
    mode: DeliveryMode,
    timeout: Duration,
}

impl WebhookDispatcher {
    pub fn new(endpoints: EndpointConfig, transport: Arc<dyn WebhookTransport>) -> Self {
        Self {
            endpoints: Arc::new(endpoints),
            transport,
            mode: DeliveryMode::default(),
            timeout: DEFAULT_DELIVERY_TIMEOUT,
        }
    }

    pub fn with_mode(mut self, mode: DeliveryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Bound for a single delivery, applied on top of whatever the transport does.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn mode(&self) -> DeliveryMode {
        self.mode
    }

    pub fn endpoints(&self) -> &EndpointConfig {
        &self.endpoints
    }

    /// False when no event has any subscriber at all.
    pub fn has_endpoints(&self) -> bool {
        !self.endpoints.is_empty()
    }

    /// Deliver `payload` to every URL subscribed to `event_name`.
    ///
    /// An event without subscribers is a no-op.
    pub async fn dispatch(&self, event_name: &str, payload: &Value) -> DispatchReport {
        let urls = self.endpoints.urls_for(event_name);
        let mut report = DispatchReport::new(event_name);
        if urls.is_empty() {
            debug!(event = event_name, "No endpoints configured for event");
            return report;
        }

        report.attempted = urls.len();
        debug!(
            event = event_name,
            endpoints = urls.len(),
            mode = ?self.mode,
            transport = self.transport.name(),
            "Dispatching webhook"
        );

        match self.mode {
            DeliveryMode::Sequential => {
                for url in urls {
                    let request = WebhookRequest::new(event_name, url.clone(), payload.clone());
                    let result = deliver(self.transport.as_ref(), &request, self.timeout).await;
                    report.record(url.clone(), result);
                }
            }
            DeliveryMode::Parallel => self.dispatch_parallel(event_name, urls, payload, &mut report).await,
        }

        info!(
            event = event_name,
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failures.len(),
            "Webhook dispatch finished"
        );
        report
    }

    async fn dispatch_parallel(
        &self,
        event_name: &str,
        urls: &[String],
        payload: &Value,
        report: &mut DispatchReport,
    ) {
        let mut join_set = JoinSet::new();
        for (index, url) in urls.iter().enumerate() {
            let transport = Arc::clone(&self.transport);
            let request = WebhookRequest::new(event_name, url.clone(), payload.clone());
            let timeout = self.timeout;
            join_set.spawn(async move {
                let result = deliver(transport.as_ref(), &request, timeout).await;
                (index, result)
            });
        }

        // Keyed by position: the same URL may be configured more than once.
        let mut finished = vec![false; urls.len()];
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, result)) => {
                    finished[index] = true;
                    report.record(urls[index].clone(), result);
                }
                Err(e) => error!(event = event_name, error = %e, "Webhook delivery task panicked"),
            }
        }

        // Tasks that panicked never reported back; count their URLs as failed.
        for (url, _) in urls.iter().zip(&finished).filter(|(_, done)| !**done) {
            report.failures.push(DeliveryFailure {
                url: url.clone(),
                error: "delivery task panicked".to_string(),
            });
        }
    }
}

/// One bounded, logged delivery attempt.
async fn deliver(
    transport: &dyn WebhookTransport,
    request: &WebhookRequest,
    timeout: Duration,
) -> Result<DeliveryReceipt, DeliveryError> {
    let start = Instant::now();
    let result = match tokio::time::timeout(timeout, transport.post_json(request)).await {
        Ok(result) => result,
        Err(_) => Err(DeliveryError::Timeout { timeout_ms: timeout.as_millis() as u64 }),
    };
    let elapsed_ms = start.elapsed().as_millis() as u64;

    let outcome = match &result {
        Ok(receipt) => DeliveryOutcome::Delivered { status: receipt.status },
        Err(e) => DeliveryOutcome::Failed { error: e.to_string() },
    };
    DeliveryLogger::log(&request.event, &request.url, elapsed_ms, outcome);
    result
}
