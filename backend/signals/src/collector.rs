//! Per-session signal collector.
//!
//! One `SignalCollector` lives for one unit of work (typically the request
//! that performed a publish). Immediate signals are rendered and dispatched
//! as they arrive; publishing signals are folded into the accumulator and
//! emitted as a single `workspacePublished` event when the session finishes.
//!
//! Finalization happens exactly once:
//! - `finish()` is the normal path and is idempotent;
//! - `scope()` and `run_session()` finish after their body whatever it returned;
//! - dropping a collector that still holds records (early `?`, panic unwind)
//!   finalizes synchronously on a helper thread with its own runtime, so the
//!   batch does not depend on the caller's runtime staying alive.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use nodehook_core::{
    NodeResolver, Signal, SignalError, SignalKind, WorkspacePublishedEvent,
    WORKSPACE_PUBLISHED_ENDPOINT,
};
use nodehook_dispatch::{DispatchReport, WebhookDispatcher};

use crate::accumulator::{PublishAccumulator, PublishBatch};
use crate::classifier::classify;
use crate::fallback::AfterFallback;
use crate::renderer;

/// What `handle` did with one signal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleOutcome {
    /// Rendered and sent right away.
    Dispatched(DispatchReport),
    /// Folded into the publish accumulator.
    Accumulated,
    /// Key not in the normalizer table.
    Ignored,
    /// No endpoints configured at all.
    Skipped,
    /// Recognized kind with missing arguments.
    Rejected(SignalError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub received: usize,
    pub dispatched: usize,
    pub accumulated: usize,
    pub ignored: usize,
    pub skipped: usize,
    pub rejected: usize,
    pub finalized: usize,
}

pub type ScopeFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub struct SignalCollector {
    session_id: Uuid,
    dispatcher: WebhookDispatcher,
    resolver: Arc<dyn NodeResolver>,
    accumulator: PublishAccumulator,
    stats: SessionStats,
    warned_unconfigured: bool,
}

impl SignalCollector {
    pub fn new(dispatcher: WebhookDispatcher, resolver: Arc<dyn NodeResolver>) -> Self {
        let session_id = Uuid::new_v4();
        debug!(session = %session_id, "Signal session opened");
        Self {
            session_id,
            dispatcher,
            resolver,
            accumulator: PublishAccumulator::new(),
            stats: SessionStats::default(),
            warned_unconfigured: false,
        }
    }

    /// Swap the policy for published nodes missing from the target workspace.
    pub fn with_fallback(mut self, fallback: Arc<dyn AfterFallback>) -> Self {
        self.accumulator.set_fallback(fallback);
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn accumulator(&self) -> &PublishAccumulator {
        &self.accumulator
    }

    /// Route one signal. Never fails; problems are logged and reported in the outcome.
    pub async fn handle(&mut self, signal: Signal) -> HandleOutcome {
        self.stats.received += 1;

        if !self.dispatcher.has_endpoints() {
            if !self.warned_unconfigured {
                warn!(session = %self.session_id, "No webhook endpoints configured. Skipping signal handling.");
                self.warned_unconfigured = true;
            }
            self.stats.skipped += 1;
            return HandleOutcome::Skipped;
        }

        let kind = signal.kind();
        debug!(
            session = %self.session_id,
            signal = %signal.key,
            identifier = %signal.node.identifier,
            "Signal received"
        );

        let outcome = match kind {
            SignalKind::Unrecognized => HandleOutcome::Ignored,
            kind if kind.is_immediate() => match renderer::render(kind, &signal) {
                Ok(payload) => {
                    let report = self.dispatcher.dispatch(signal.event_name(), &payload).await;
                    HandleOutcome::Dispatched(report)
                }
                Err(e) => HandleOutcome::Rejected(e),
            },
            kind => match signal.require_workspace() {
                Ok(workspace) => {
                    let resolver = self.resolver.as_ref();
                    if kind == SignalKind::BeforeNodePublishing {
                        self.accumulator.on_before_publish(resolver, &signal.node, workspace);
                    } else {
                        self.accumulator.on_after_publish(resolver, &signal.node, workspace);
                    }
                    HandleOutcome::Accumulated
                }
                Err(e) => HandleOutcome::Rejected(e),
            },
        };

        match &outcome {
            HandleOutcome::Dispatched(_) => self.stats.dispatched += 1,
            HandleOutcome::Accumulated => self.stats.accumulated += 1,
            HandleOutcome::Ignored => self.stats.ignored += 1,
            HandleOutcome::Skipped => self.stats.skipped += 1,
            HandleOutcome::Rejected(e) => {
                warn!(session = %self.session_id, error = %e, "Signal rejected");
                self.stats.rejected += 1;
            }
        }
        outcome
    }

    /// Emit the aggregated publish event, if any, and clear the accumulator.
    ///
    /// Returns `None` when nothing was accumulated; a second call is always `None`.
    pub async fn finish(&mut self) -> Option<DispatchReport> {
        let batch = self.accumulator.take();
        if batch.is_empty() {
            return None;
        }
        self.stats.finalized += 1;
        finalize_batch(&self.dispatcher, batch, self.session_id).await
    }

    /// Run `body` against this collector, then finish the session whatever
    /// the body returned. If the body panics, unwinding drops the collector
    /// and the batch is finalized from `Drop`.
    pub async fn scope<T, F>(mut self, body: F) -> (T, Option<DispatchReport>)
    where
        F: for<'a> FnOnce(&'a mut SignalCollector) -> ScopeFuture<'a, T>,
        T: 'static,
    {
        let result = body(&mut self).await;
        let report = self.finish().await;
        (result, report)
    }
}

impl Drop for SignalCollector {
    fn drop(&mut self) {
        if self.accumulator.is_empty() {
            return;
        }
        let batch = self.accumulator.take();
        warn!(
            session = %self.session_id,
            records = batch.records.len(),
            "Session dropped before finish; finalizing synchronously"
        );
        finalize_blocking(self.dispatcher.clone(), batch, self.session_id);
    }
}

/// Run `finalize_batch` to completion from synchronous code.
///
/// Uses a dedicated thread and current-thread runtime, so it works inside an
/// async context of any runtime flavor and outside any runtime.
fn finalize_blocking(dispatcher: WebhookDispatcher, batch: PublishBatch, session_id: Uuid) {
    let records = batch.records.len();
    let worker = std::thread::Builder::new()
        .name("nodehook-finalize".to_string())
        .spawn(move || -> std::io::Result<()> {
            let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
            runtime.block_on(finalize_batch(&dispatcher, batch, session_id));
            Ok(())
        });

    let outcome = match worker {
        Ok(handle) => match handle.join() {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(_) => "finalization thread panicked".to_string(),
        },
        Err(e) => e.to_string(),
    };
    error!(session = %session_id, records, error = %outcome, "Publish batch lost");
}

/// Drive a whole session from an iterator of signals, then finish it.
pub async fn run_session<I>(mut collector: SignalCollector, signals: I) -> Option<DispatchReport>
where
    I: IntoIterator<Item = Signal>,
{
    // A panic while handling drops `collector`, and its `Drop` finalizes.
    for signal in signals {
        collector.handle(signal).await;
    }
    collector.finish().await
}

/// Classify a drained batch and deliver it as one `workspacePublished` event.
pub async fn finalize_batch(
    dispatcher: &WebhookDispatcher,
    batch: PublishBatch,
    session_id: Uuid,
) -> Option<DispatchReport> {
    let total = batch.records.len();
    let changes: Vec<_> = batch
        .records
        .iter()
        .filter_map(|(identifier, record)| classify(identifier, record).into_change())
        .collect();

    let event = WorkspacePublishedEvent::new(batch.target_workspace, changes);
    let payload = match serde_json::to_value(&event) {
        Ok(payload) => payload,
        Err(e) => {
            error!(session = %session_id, error = %e, "Failed to encode workspacePublished event");
            return None;
        }
    };

    info!(
        session = %session_id,
        workspace = event.workspace.as_deref().unwrap_or("unknown"),
        records = total,
        changes = event.changes.len(),
        "Finalizing publish session"
    );
    Some(dispatcher.dispatch(WORKSPACE_PUBLISHED_ENDPOINT, &payload).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::ReportAnomaly;
    use nodehook_config::EndpointConfig;
    use nodehook_core::normalizer::{
        AFTER_NODE_PUBLISHING, BEFORE_NODE_PUBLISHING, NODE_ADDED, NODE_PROPERTY_CHANGED,
    };
    use nodehook_core::{MemoryNodeStore, NodeSnapshot, Properties, WorkspaceInfo};
    use nodehook_dispatch::{DeliveryMode, MockTransport};
    use serde_json::{json, Value};

    const HOOK: &str = "https://hooks.example/publish";
    const ADDED_A: &str = "https://a.example/added";
    const ADDED_B: &str = "https://b.example/added";

    fn props(title: &str) -> Properties {
        let mut p = Properties::new();
        p.insert("title".into(), json!(title));
        p
    }

    fn node(id: &str, workspace: &str, title: &str) -> NodeSnapshot {
        NodeSnapshot::new(id, "Page", format!("/sites/demo/{id}"), "Acme:Page", workspace)
            .with_properties(props(title))
    }

    fn before(id: &str, title: &str) -> Signal {
        Signal::new(BEFORE_NODE_PUBLISHING, node(id, "user-admin", title))
            .with_workspace(WorkspaceInfo::named("live"))
    }

    fn after(id: &str, title: &str) -> Signal {
        Signal::new(AFTER_NODE_PUBLISHING, node(id, "user-admin", title))
            .with_workspace(WorkspaceInfo::named("live"))
    }

    fn setup(transport: Arc<MockTransport>, store: Arc<MemoryNodeStore>) -> SignalCollector {
        let endpoints = EndpointConfig::from_pairs([
            ("workspacePublished", vec![HOOK]),
            ("nodeAdded", vec![ADDED_A, ADDED_B]),
        ]);
        let dispatcher =
            WebhookDispatcher::new(endpoints, transport).with_mode(DeliveryMode::Sequential);
        SignalCollector::new(dispatcher, store)
    }

    fn published_body(transport: &MockTransport) -> Value {
        let sent = transport.requests_to(HOOK);
        assert_eq!(sent.len(), 1, "expected exactly one workspacePublished delivery");
        sent[0].body.clone()
    }

    #[tokio::test]
    async fn test_new_node_publish_is_created() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        let mut collector = setup(transport.clone(), store.clone());

        collector.handle(before("n1", "Hi")).await;
        store.upsert(node("n1", "live", "Hi"));
        collector.handle(after("n1", "Hi")).await;
        let report = collector.finish().await.unwrap();
        assert_eq!(report.delivered, 1);

        let body = published_body(&transport);
        assert_eq!(body["event"], "WorkspacePublished");
        assert_eq!(body["workspace"], "live");
        let change = &body["changes"][0];
        assert_eq!(change["changeType"], "created");
        assert_eq!(change["propertiesBefore"], Value::Null);
        assert_eq!(change["propertiesAfter"], json!({"title": "Hi"}));
        assert_eq!(change["workspace"], "live");
    }

    #[tokio::test]
    async fn test_existing_node_publish_is_updated() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        store.upsert(node("n1", "live", "Old"));
        let mut collector = setup(transport.clone(), store.clone());

        collector.handle(before("n1", "New")).await;
        store.upsert(node("n1", "live", "New"));
        collector.handle(after("n1", "New")).await;
        collector.finish().await;

        let change = &published_body(&transport)["changes"][0];
        assert_eq!(change["changeType"], "updated");
        assert_eq!(change["propertiesBefore"], json!({"title": "Old"}));
        assert_eq!(change["propertiesAfter"], json!({"title": "New"}));
    }

    #[tokio::test]
    async fn test_removal_publish_is_removed() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        store.upsert(node("n1", "live", "Old"));
        let mut collector = setup(transport.clone(), store.clone());

        collector.handle(before("n1", "Old")).await;
        store.remove("live", "n1");
        collector.handle(after("n1", "Old")).await;
        collector.finish().await;

        let change = &published_body(&transport)["changes"][0];
        assert_eq!(change["changeType"], "removed");
        assert_eq!(change["propertiesBefore"], json!({"title": "Old"}));
        assert_eq!(change["propertiesAfter"], Value::Null);
    }

    #[tokio::test]
    async fn test_changes_keep_first_seen_order() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        let mut collector = setup(transport.clone(), store.clone());

        for id in ["c", "a", "b"] {
            collector.handle(before(id, "x")).await;
        }
        for id in ["b", "a", "c"] {
            store.upsert(node(id, "live", "x"));
            collector.handle(after(id, "x")).await;
        }
        collector.finish().await;

        let body = published_body(&transport);
        let ids: Vec<&str> = body["changes"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["identifier"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_session_sends_nothing() {
        let transport = Arc::new(MockTransport::new());
        let mut collector = setup(transport.clone(), Arc::new(MemoryNodeStore::new()));
        assert!(collector.finish().await.is_none());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_finish_twice_delivers_once() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        let mut collector = setup(transport.clone(), store);

        collector.handle(after("n1", "Hi")).await;
        assert!(collector.finish().await.is_some());
        assert!(collector.finish().await.is_none());
        drop(collector);
        tokio::task::yield_now().await;
        assert_eq!(transport.requests_to(HOOK).len(), 1);
    }

    #[tokio::test]
    async fn test_anomaly_policy_drops_unresolvable_node() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        let mut collector =
            setup(transport.clone(), store).with_fallback(Arc::new(ReportAnomaly));

        collector.handle(after("ghost", "x")).await;
        collector.finish().await;
        assert_eq!(published_body(&transport)["changes"], json!([]));
    }

    #[tokio::test]
    async fn test_immediate_signal_reaches_every_endpoint() {
        let transport = Arc::new(MockTransport::new().failing(ADDED_A));
        let mut collector = setup(transport.clone(), Arc::new(MemoryNodeStore::new()));

        let outcome = collector.handle(Signal::new(NODE_ADDED, node("n1", "user-admin", "Hi"))).await;
        let report = match outcome {
            HandleOutcome::Dispatched(report) => report,
            other => panic!("expected dispatch, got {other:?}"),
        };
        assert_eq!(report.event, "nodeAdded");
        assert_eq!(report.delivered, 1);
        assert_eq!(report.failures[0].url, ADDED_A);

        let sent = transport.requests_to(ADDED_B);
        assert_eq!(sent[0].body["event"], NODE_ADDED);
        assert_eq!(sent[0].body["node"]["identifier"], "n1");
        assert!(sent[0].body["node"].get("properties").is_none());
        assert!(collector.accumulator().is_empty());
    }

    #[tokio::test]
    async fn test_unrecognized_and_invalid_signals() {
        let transport = Arc::new(MockTransport::new());
        let mut collector = setup(transport.clone(), Arc::new(MemoryNodeStore::new()));

        let unknown = Signal::new("Some\\Other::thing", node("n1", "user-admin", "x"));
        assert_eq!(collector.handle(unknown).await, HandleOutcome::Ignored);

        let no_change = Signal::new(NODE_PROPERTY_CHANGED, node("n1", "user-admin", "x"));
        let outcome = collector.handle(no_change).await;
        assert!(matches!(outcome, HandleOutcome::Rejected(_)));
        assert_eq!(outcome.clone(), outcome);

        let no_workspace = Signal::new(BEFORE_NODE_PUBLISHING, node("n1", "user-admin", "x"));
        assert!(matches!(collector.handle(no_workspace).await, HandleOutcome::Rejected(_)));

        let stats = collector.stats();
        assert_eq!(stats.received, 3);
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.rejected, 2);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_no_endpoints_skips_everything() {
        let transport = Arc::new(MockTransport::new());
        let dispatcher = WebhookDispatcher::new(EndpointConfig::default(), transport.clone());
        let mut collector = SignalCollector::new(dispatcher, Arc::new(MemoryNodeStore::new()));

        assert_eq!(collector.handle(after("n1", "x")).await, HandleOutcome::Skipped);
        assert_eq!(
            collector.handle(Signal::new(NODE_ADDED, node("n1", "user-admin", "x"))).await,
            HandleOutcome::Skipped
        );
        assert!(collector.finish().await.is_none());
        assert_eq!(collector.stats().skipped, 2);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_failing_publish_endpoint_does_not_block_others() {
        let other = "https://other.example/publish";
        let transport = Arc::new(MockTransport::new().failing(HOOK));
        let endpoints = EndpointConfig::from_pairs([("workspacePublished", vec![HOOK, other])]);
        let dispatcher = WebhookDispatcher::new(endpoints, transport.clone());
        let mut collector = SignalCollector::new(dispatcher, Arc::new(MemoryNodeStore::new()));

        collector.handle(after("n1", "x")).await;
        let report = collector.finish().await.unwrap();
        assert_eq!(report.attempted, 2);
        assert_eq!(report.delivered, 1);
        assert_eq!(transport.requests_to(other).len(), 1);
    }

    #[tokio::test]
    async fn test_scope_finishes_even_when_body_fails() {
        let transport = Arc::new(MockTransport::new());
        let collector = setup(transport.clone(), Arc::new(MemoryNodeStore::new()));

        let signal = after("n1", "x");
        let (result, report) = collector
            .scope(move |c| {
                Box::pin(async move {
                    c.handle(signal).await;
                    Err::<(), String>("publish aborted".to_string())
                })
            })
            .await;
        assert!(result.is_err());
        assert!(report.is_some());
        assert_eq!(transport.requests_to(HOOK).len(), 1);
    }

    #[tokio::test]
    async fn test_drop_without_finish_still_delivers() {
        let transport = Arc::new(MockTransport::new());
        let mut collector = setup(transport.clone(), Arc::new(MemoryNodeStore::new()));
        collector.handle(after("n1", "x")).await;
        drop(collector);
        assert_eq!(transport.requests_to(HOOK).len(), 1);
    }

    #[test]
    fn test_drop_then_runtime_shutdown_keeps_batch() {
        let transport = Arc::new(MockTransport::new());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let sent = transport.clone();
        runtime.block_on(async move {
            let mut collector = setup(sent, Arc::new(MemoryNodeStore::new()));
            collector.handle(after("n1", "x")).await;
            drop(collector);
        });
        drop(runtime);
        assert_eq!(transport.requests_to(HOOK).len(), 1);
    }

    #[test]
    fn test_drop_outside_runtime_delivers() {
        let transport = Arc::new(MockTransport::new());
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let collector = runtime.block_on(async {
            let mut collector = setup(transport.clone(), Arc::new(MemoryNodeStore::new()));
            collector.handle(after("n1", "x")).await;
            collector
        });
        drop(runtime);
        drop(collector);
        assert_eq!(transport.requests_to(HOOK).len(), 1);
    }

    #[tokio::test]
    async fn test_scope_body_panic_still_delivers_once() {
        let transport = Arc::new(MockTransport::new());
        let collector = setup(transport.clone(), Arc::new(MemoryNodeStore::new()));
        let signal = after("n1", "x");
        let task = tokio::spawn(async move {
            collector
                .scope(move |c| {
                    Box::pin(async move {
                        c.handle(signal).await;
                        if c.stats().accumulated == 1 {
                            panic!("publish aborted");
                        }
                    })
                })
                .await
        });
        assert!(task.await.unwrap_err().is_panic());
        assert_eq!(transport.requests_to(HOOK).len(), 1);
    }

    #[tokio::test]
    async fn test_with_fallback_keeps_pending_records() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        store.upsert(node("n1", "live", "Old"));
        let mut collector = setup(transport.clone(), store.clone());
        collector.handle(before("n1", "Old")).await;

        let mut collector = collector.with_fallback(Arc::new(ReportAnomaly));
        assert_eq!(collector.accumulator().len(), 1);
        store.remove("live", "n1");
        collector.handle(after("n1", "Old")).await;
        collector.finish().await;
        assert_eq!(published_body(&transport)["changes"][0]["changeType"], "removed");
    }

    #[tokio::test]
    async fn test_reverse_order_new_node_is_created() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        let mut collector = setup(transport.clone(), store.clone());

        store.upsert(node("n1", "live", "Hi"));
        collector.handle(after("n1", "Hi")).await;
        collector.handle(before("n1", "Hi")).await;
        collector.finish().await;

        let body = published_body(&transport);
        assert_eq!(body["workspace"], "live");
        let change = &body["changes"][0];
        assert_eq!(change["changeType"], "created");
        assert_eq!(change["propertiesBefore"], Value::Null);
        assert_eq!(change["propertiesAfter"], json!({"title": "Hi"}));
    }

    #[tokio::test]
    async fn test_reverse_order_removal_is_removed() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        let mut collector = setup(transport.clone(), store.clone());

        collector.handle(after("n1", "Old")).await;
        collector.handle(before("n1", "Old")).await;
        collector.finish().await;

        let change = &published_body(&transport)["changes"][0];
        assert_eq!(change["changeType"], "removed");
        assert_eq!(change["propertiesBefore"], json!({"title": "Old"}));
        assert_eq!(change["propertiesAfter"], Value::Null);
        assert_eq!(change["workspace"], "live");
    }

    #[tokio::test]
    async fn test_reverse_order_update_with_prior_revision_is_updated() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        let mut collector = setup(transport.clone(), store.clone());

        store.upsert(node("n1", "live", "New"));
        collector.handle(after("n1", "New")).await;
        store.upsert(node("n1", "live", "Old"));
        collector.handle(before("n1", "New")).await;
        collector.finish().await;

        let change = &published_body(&transport)["changes"][0];
        assert_eq!(change["changeType"], "updated");
        assert_eq!(change["propertiesBefore"], json!({"title": "Old"}));
        assert_eq!(change["propertiesAfter"], json!({"title": "New"}));
    }

    #[tokio::test]
    async fn test_after_lookup_failure_with_prior_state_is_removed() {
        let transport = Arc::new(MockTransport::new());
        let store = Arc::new(MemoryNodeStore::new());
        store.upsert(node("n1", "live", "Old"));
        let mut collector = setup(transport.clone(), store.clone());

        collector.handle(before("n1", "Old")).await;
        store.fail_lookups_for("n1");
        assert_eq!(collector.handle(after("n1", "Old")).await, HandleOutcome::Accumulated);
        collector.finish().await;

        assert_eq!(published_body(&transport)["changes"][0]["changeType"], "removed");
    }

    #[tokio::test]
    async fn test_run_session() {
        let transport = Arc::new(MockTransport::new());
        let collector = setup(transport.clone(), Arc::new(MemoryNodeStore::new()));
        let report = run_session(collector, vec![before("n1", "x"), after("n1", "x")]).await;
        assert_eq!(report.unwrap().delivered, 1);
        assert_eq!(published_body(&transport)["changes"][0]["changeType"], "created");
    }
}
