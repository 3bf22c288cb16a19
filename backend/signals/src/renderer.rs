//! Immediate event renderer.
//!
//! Turns one node/workspace signal into the JSON body sent to subscribers:
//! `{event, node, [propertyChange], [workspace]}` where `event` is the raw
//! signal key and `node` is rendered without properties.

use serde_json::{json, Value};

use nodehook_core::{Signal, SignalError, SignalKind};

pub fn render(kind: SignalKind, signal: &Signal) -> Result<Value, SignalError> {
    let node = signal.node.render(false);
    match kind {
        SignalKind::NodeAdded | SignalKind::NodeUpdated | SignalKind::NodeRemoved => {
            Ok(json!({ "event": signal.key, "node": node }))
        }
        SignalKind::NodePropertyChanged => {
            let change = signal.require_property_change()?;
            Ok(json!({
                "event": signal.key,
                "node": node,
                "propertyChange": {
                    "identifier": signal.node.identifier,
                    "propertyName": change.property_name,
                    "oldValue": change.old_value,
                    "newValue": change.new_value,
                },
            }))
        }
        SignalKind::NodePublished | SignalKind::NodeDiscarded => {
            let workspace = signal.require_workspace()?;
            Ok(json!({
                "event": signal.key,
                "node": node,
                "workspace": {
                    "name": workspace.name,
                    "title": workspace.title,
                    "description": workspace.description,
                },
            }))
        }
        SignalKind::BeforeNodePublishing
        | SignalKind::AfterNodePublishing
        | SignalKind::Unrecognized => Err(SignalError::Unrecognized(signal.key.clone())),
    }
}
