//! Publish change accumulator.
//!
//! Publishing a workspace emits one `beforeNodePublishing` and one
//! `afterNodePublishing` signal per node, in no guaranteed order. The
//! accumulator folds those signals into one `{before, after}` record per node
//! identifier, keyed in first-seen order, until the session finalizes.
//!
//! Both signals resolve the node in the *target* workspace: before the publish
//! that shows the old state there, after it the new one. Lookup errors are
//! logged and treated as "node absent"; they never leave a record half-written.
//!
//! A `before` signal that arrives after the `after` signal sees the target as
//! the publish left it, so it is read relative to what `after` found:
//! - after resolved: a lookup equal to `after` means no prior state was seen
//!   (absent); a different revision is recorded as the prior state;
//! - after missing, late lookup resolves: the target caught up with a new
//!   node, so the lookup becomes `after` and `before` is absent;
//! - after missing, late lookup still missing: the node left the target with
//!   this publish, and the signal's own node stands in for the prior state.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use nodehook_core::{NodeResolver, NodeSnapshot, WorkspaceInfo};

use crate::fallback::{AfterFallback, SourceSnapshotFallback};

/// What the `before` lookup found.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum BeforeState {
    /// No `beforeNodePublishing` seen for this node yet.
    #[default]
    Unobserved,
    /// Looked up, and the node did not exist in the target workspace.
    Absent,
    Present(NodeSnapshot),
}

/// What the `after` lookup found in the target, before any fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AfterLookup {
    #[default]
    Unobserved,
    Resolved,
    Missing,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PublishRecord {
    pub before: BeforeState,
    pub after: Option<NodeSnapshot>,
    pub after_lookup: AfterLookup,
}

impl PublishRecord {
    pub fn before_snapshot(&self) -> Option<&NodeSnapshot> {
        match &self.before {
            BeforeState::Present(snapshot) => Some(snapshot),
            BeforeState::Unobserved | BeforeState::Absent => None,
        }
    }

    pub fn after_snapshot(&self) -> Option<&NodeSnapshot> {
        self.after.as_ref()
    }
}

/// Everything a session accumulated, handed over exactly once.
#[derive(Debug, Default)]
pub struct PublishBatch {
    pub target_workspace: Option<String>,
    pub records: Vec<(String, PublishRecord)>,
}

impl PublishBatch {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct PublishAccumulator {
    order: Vec<String>,
    records: HashMap<String, PublishRecord>,
    target_workspace: Option<String>,
    fallback: Arc<dyn AfterFallback>,
}

impl Default for PublishAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl PublishAccumulator {
    pub fn new() -> Self {
        Self::with_fallback(Arc::new(SourceSnapshotFallback))
    }

    pub fn with_fallback(fallback: Arc<dyn AfterFallback>) -> Self {
        Self {
            order: Vec::new(),
            records: HashMap::new(),
            target_workspace: None,
            fallback,
        }
    }

    /// Replace the missing-after policy; records already collected are kept.
    pub fn set_fallback(&mut self, fallback: Arc<dyn AfterFallback>) {
        self.fallback = fallback;
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn target_workspace(&self) -> Option<&str> {
        self.target_workspace.as_deref()
    }

    pub fn record(&self, identifier: &str) -> Option<&PublishRecord> {
        self.records.get(identifier)
    }

    /// Records in first-seen order.
    pub fn records(&self) -> impl Iterator<Item = (&str, &PublishRecord)> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id).map(|record| (id.as_str(), record)))
    }

    /// `beforeNodePublishing`: capture the target workspace's current view of the node.
    pub fn on_before_publish(
        &mut self,
        resolver: &dyn NodeResolver,
        node: &NodeSnapshot,
        target: &WorkspaceInfo,
    ) {
        self.target_workspace = Some(target.name.clone());
        let resolved = lookup(resolver, node, &target.name);
        let record = self.entry(&node.identifier);

        let before = match record.after_lookup {
            AfterLookup::Unobserved => match resolved {
                Some(snapshot) => BeforeState::Present(snapshot),
                None => BeforeState::Absent,
            },
            AfterLookup::Resolved => match resolved {
                Some(snapshot) if record.after.as_ref() != Some(&snapshot) => {
                    BeforeState::Present(snapshot)
                }
                _ => BeforeState::Absent,
            },
            AfterLookup::Missing => match resolved {
                Some(snapshot) => {
                    record.after = Some(snapshot);
                    record.after_lookup = AfterLookup::Resolved;
                    BeforeState::Absent
                }
                None => {
                    record.after = None;
                    BeforeState::Present(node.in_workspace(target.name.as_str()))
                }
            },
        };
        debug!(
            identifier = %node.identifier,
            target = %target.name,
            late = record.after_lookup != AfterLookup::Unobserved,
            present = matches!(before, BeforeState::Present(_)),
            "Recorded before-publish state"
        );
        record.before = before;
    }

    /// `afterNodePublishing`: capture the node as the publish left it.
    pub fn on_after_publish(
        &mut self,
        resolver: &dyn NodeResolver,
        node: &NodeSnapshot,
        target: &WorkspaceInfo,
    ) {
        let resolved = lookup(resolver, node, &target.name);
        let fallback = Arc::clone(&self.fallback);
        let record = self.entry(&node.identifier);

        record.after_lookup = if resolved.is_some() {
            AfterLookup::Resolved
        } else {
            AfterLookup::Missing
        };
        record.after = match resolved {
            Some(snapshot) => Some(snapshot),
            None if record.before_snapshot().is_none() => fallback.fallback(node, &target.name),
            None => {
                debug!(identifier = %node.identifier, target = %target.name, "Node removed by publish");
                None
            }
        };
    }

    /// Hand over all records and reset to empty.
    pub fn take(&mut self) -> PublishBatch {
        let mut records = std::mem::take(&mut self.records);
        PublishBatch {
            target_workspace: self.target_workspace.take(),
            records: std::mem::take(&mut self.order)
                .into_iter()
                .filter_map(|id| records.remove(&id).map(|record| (id, record)))
                .collect(),
        }
    }

    fn entry(&mut self, identifier: &str) -> &mut PublishRecord {
        if !self.records.contains_key(identifier) {
            self.order.push(identifier.to_string());
        }
        self.records.entry(identifier.to_string()).or_default()
    }
}

/// Resolve `node` inside `workspace`; any failure reads as "absent".
fn lookup(resolver: &dyn NodeResolver, node: &NodeSnapshot, workspace: &str) -> Option<NodeSnapshot> {
    match resolver.resolve(&node.identifier, workspace, &node.dimensions) {
        Ok(found) => found,
        Err(e) => {
            warn!(identifier = %node.identifier, workspace, error = %e, "Node lookup failed; treating as absent");
            None
        }
    }
}
