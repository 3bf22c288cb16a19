//! In-memory content store.
//!
//! Backs the replay CLI and the test suites. Nodes are keyed by workspace
//! name, then identifier; dimensions must match exactly for a lookup to hit.

use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use tracing::debug;

use crate::error::ResolveError;
use crate::traits::NodeResolver;
use crate::types::{Dimensions, NodeSnapshot};

type WorkspaceMap = HashMap<String, HashMap<String, NodeSnapshot>>;

#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    workspaces: RwLock<WorkspaceMap>,
    failing: RwLock<HashSet<String>>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a node in the workspace named by `snapshot.workspace`.
    pub fn upsert(&self, snapshot: NodeSnapshot) {
        let mut map = self.workspaces.write().unwrap_or_else(|e| e.into_inner());
        debug!(identifier = %snapshot.identifier, workspace = %snapshot.workspace, "Store upsert");
        map.entry(snapshot.workspace.clone())
            .or_default()
            .insert(snapshot.identifier.clone(), snapshot);
    }

    /// Remove a node from a workspace. Returns the removed snapshot, if any.
    pub fn remove(&self, workspace: &str, identifier: &str) -> Option<NodeSnapshot> {
        let mut map = self.workspaces.write().unwrap_or_else(|e| e.into_inner());
        debug!(identifier, workspace, "Store remove");
        map.get_mut(workspace).and_then(|nodes| nodes.remove(identifier))
    }

    /// Make every subsequent lookup of `identifier` fail.
    pub fn fail_lookups_for(&self, identifier: impl Into<String>) {
        let mut failing = self.failing.write().unwrap_or_else(|e| e.into_inner());
        failing.insert(identifier.into());
    }

    pub fn len(&self, workspace: &str) -> usize {
        let map = self.workspaces.read().unwrap_or_else(|e| e.into_inner());
        map.get(workspace).map(HashMap::len).unwrap_or(0)
    }

    pub fn is_empty(&self, workspace: &str) -> bool {
        self.len(workspace) == 0
    }
}

impl NodeResolver for MemoryNodeStore {
    fn resolve(
        &self,
        identifier: &str,
        workspace: &str,
        dimensions: &Dimensions,
    ) -> Result<Option<NodeSnapshot>, ResolveError> {
        let failing = self.failing.read().unwrap_or_else(|e| e.into_inner());
        if failing.contains(identifier) {
            return Err(ResolveError::Lookup {
                identifier: identifier.to_string(),
                workspace: workspace.to_string(),
                message: "simulated lookup failure".to_string(),
            });
        }
        drop(failing);

        let map = self.workspaces.read().unwrap_or_else(|e| e.into_inner());
        Ok(map
            .get(workspace)
            .and_then(|nodes| nodes.get(identifier))
            .filter(|node| &node.dimensions == dimensions)
            .cloned())
    }
}
