//! What to record as `after` when a published node cannot be found in the
//! target workspace and no prior `before` snapshot exists.
//!
//! The usual cause is a target-workspace read model that has not caught up
//! with a brand-new node yet. Whether such a node should count as created or
//! be surfaced as an anomaly is a policy choice, so it is pluggable.

use tracing::{info, warn};

use nodehook_core::NodeSnapshot;

pub trait AfterFallback: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Snapshot to record as `after`, or `None` to leave it empty.
    fn fallback(&self, source: &NodeSnapshot, target_workspace: &str) -> Option<NodeSnapshot>;
}

/// Record the source node's own snapshot; the node will classify as created.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceSnapshotFallback;

impl AfterFallback for SourceSnapshotFallback {
    fn name(&self) -> &str {
        "source_snapshot"
    }

    fn fallback(&self, source: &NodeSnapshot, target_workspace: &str) -> Option<NodeSnapshot> {
        info!(
            identifier = %source.identifier,
            source_workspace = %source.workspace,
            target_workspace,
            "Node not found in target workspace after publish; using source snapshot"
        );
        Some(source.clone())
    }
}

/// Leave `after` empty and warn; the record is dropped at classification.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportAnomaly;

impl AfterFallback for ReportAnomaly {
    fn name(&self) -> &str {
        "report_anomaly"
    }

    fn fallback(&self, source: &NodeSnapshot, target_workspace: &str) -> Option<NodeSnapshot> {
        warn!(
            identifier = %source.identifier,
            source_workspace = %source.workspace,
            target_workspace,
            "Published node never appeared in target workspace"
        );
        None
    }
}
