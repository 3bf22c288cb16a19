use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Content-dimension values keyed by dimension name (e.g. `language`).
pub type Dimensions = BTreeMap<String, Value>;

/// Node property mapping as rendered to subscribers.
pub type Properties = Map<String, Value>;

/// Immutable projection of a content node at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub identifier: String,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub node_type: String,
    pub workspace: String,
    #[serde(default)]
    pub dimensions: Dimensions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl NodeSnapshot {
    pub fn new(
        identifier: impl Into<String>,
        name: impl Into<String>,
        path: impl Into<String>,
        node_type: impl Into<String>,
        workspace: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            name: name.into(),
            path: path.into(),
            node_type: node_type.into(),
            workspace: workspace.into(),
            dimensions: Dimensions::new(),
            properties: None,
        }
    }

    pub fn with_dimension(mut self, name: impl Into<String>, value: Value) -> Self {
        self.dimensions.insert(name.into(), value);
        self
    }

    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = Some(properties);
        self
    }

    /// Same node, seen from another workspace.
    pub fn in_workspace(&self, workspace: impl Into<String>) -> Self {
        Self { workspace: workspace.into(), ..self.clone() }
    }

    /// Render as a JSON object; `properties` is only present when requested and known.
    pub fn render(&self, include_properties: bool) -> Value {
        let mut rendered = Map::new();
        rendered.insert("identifier".into(), Value::String(self.identifier.clone()));
        rendered.insert("name".into(), Value::String(self.name.clone()));
        rendered.insert("path".into(), Value::String(self.path.clone()));
        rendered.insert("type".into(), Value::String(self.node_type.clone()));
        rendered.insert("workspace".into(), Value::String(self.workspace.clone()));
        rendered.insert(
            "dimensions".into(),
            Value::Object(self.dimensions.clone().into_iter().collect()),
        );
        if include_properties {
            let properties = self.properties.clone().unwrap_or_default();
            rendered.insert("properties".into(), Value::Object(properties));
        }
        Value::Object(rendered)
    }
}

/// A named workspace as carried by workspace-scoped signals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceInfo {
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl WorkspaceInfo {
    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into(), title: None, description: None }
    }
}

/// How a node changed during one publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Created,
    Updated,
    Removed,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::Created => write!(f, "created"),
            ChangeType::Updated => write!(f, "updated"),
            ChangeType::Removed => write!(f, "removed"),
        }
    }
}

/// One classified node inside a `WorkspacePublished` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeChange {
    pub identifier: String,
    pub name: String,
    pub path: String,
    pub workspace: String,
    pub dimensions: Dimensions,
    pub change_type: ChangeType,
    pub properties_before: Option<Properties>,
    pub properties_after: Option<Properties>,
}

/// Literal event tag carried in every `workspacePublished` payload.
pub const WORKSPACE_PUBLISHED_EVENT: &str = "WorkspacePublished";

/// Logical endpoint name the aggregated publish event is delivered under.
pub const WORKSPACE_PUBLISHED_ENDPOINT: &str = "workspacePublished";

/// The single aggregated event emitted per publish session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkspacePublishedEvent {
    pub event: String,
    pub workspace: Option<String>,
    pub changes: Vec<NodeChange>,
}

impl WorkspacePublishedEvent {
    pub fn new(workspace: Option<String>, changes: Vec<NodeChange>) -> Self {
        Self { event: WORKSPACE_PUBLISHED_EVENT.to_string(), workspace, changes }
    }
}
