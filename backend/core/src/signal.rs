use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SignalError;
use crate::normalizer;
use crate::types::{NodeSnapshot, WorkspaceInfo};

/// Recognized signal kinds emitted by the content repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignalKind {
    NodeAdded,
    NodeUpdated,
    NodeRemoved,
    NodePropertyChanged,
    NodePublished,
    NodeDiscarded,
    BeforeNodePublishing,
    AfterNodePublishing,
    Unrecognized,
}

impl SignalKind {
    /// Forwarded to subscribers one-for-one, right away.
    pub fn is_immediate(self) -> bool {
        matches!(
            self,
            Self::NodeAdded
                | Self::NodeUpdated
                | Self::NodeRemoved
                | Self::NodePropertyChanged
                | Self::NodePublished
                | Self::NodeDiscarded
        )
    }

    /// Feeds the publish accumulator.
    pub fn is_publishing(self) -> bool {
        matches!(self, Self::BeforeNodePublishing | Self::AfterNodePublishing)
    }

    /// Carries a workspace argument.
    pub fn is_workspace_scoped(self) -> bool {
        matches!(
            self,
            Self::NodePublished
                | Self::NodeDiscarded
                | Self::BeforeNodePublishing
                | Self::AfterNodePublishing
        )
    }
}

/// Property-change arguments of a `nodePropertyChanged` signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyChange {
    pub property_name: String,
    #[serde(default)]
    pub old_value: Value,
    #[serde(default)]
    pub new_value: Value,
}

/// An inbound signal: its raw key plus the kind-specific arguments.
///
/// `workspace` holds the target workspace for `beforeNodePublishing` and the
/// workspace argument for every other workspace-scoped kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub key: String,
    pub node: NodeSnapshot,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_change: Option<PropertyChange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace: Option<WorkspaceInfo>,
}

impl Signal {
    pub fn new(key: impl Into<String>, node: NodeSnapshot) -> Self {
        Self { key: key.into(), node, property_change: None, workspace: None }
    }

    pub fn with_workspace(mut self, workspace: WorkspaceInfo) -> Self {
        self.workspace = Some(workspace);
        self
    }

    pub fn with_property_change(
        mut self,
        property_name: impl Into<String>,
        old_value: Value,
        new_value: Value,
    ) -> Self {
        self.property_change = Some(PropertyChange {
            property_name: property_name.into(),
            old_value,
            new_value,
        });
        self
    }

    pub fn kind(&self) -> SignalKind {
        normalizer::classify(&self.key)
    }

    pub fn event_name(&self) -> &str {
        normalizer::event_name(&self.key)
    }

    pub fn require_workspace(&self) -> Result<&WorkspaceInfo, SignalError> {
        self.workspace.as_ref().ok_or_else(|| SignalError::MissingArgument {
            key: self.key.clone(),
            argument: "workspace",
        })
    }

    pub fn require_property_change(&self) -> Result<&PropertyChange, SignalError> {
        self.property_change.as_ref().ok_or_else(|| SignalError::MissingArgument {
            key: self.key.clone(),
            argument: "propertyChange",
        })
    }
}
