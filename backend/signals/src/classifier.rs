//! Change classifier: `{before, after}` → created / updated / removed.
//!
//! | before | after | result  |
//! |--------|-------|---------|
//! | -      | -     | dropped |
//! | -      | x     | created |
//! | x      | -     | removed |
//! | x      | x     | updated |
//!
//! Property sets are carried through untouched; no field-level diff.

use tracing::warn;

use nodehook_core::{ChangeType, Dimensions, NodeChange, NodeSnapshot};

use crate::accumulator::PublishRecord;

const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    Change(NodeChange),
    Dropped,
}

impl Classification {
    pub fn into_change(self) -> Option<NodeChange> {
        match self {
            Classification::Change(change) => Some(change),
            Classification::Dropped => None,
        }
    }
}

pub fn classify(identifier: &str, record: &PublishRecord) -> Classification {
    let before = record.before_snapshot();
    let after = record.after_snapshot();

    let change_type = match (before, after) {
        (None, None) => {
            warn!(identifier, "Publish record has neither before nor after state; dropping");
            return Classification::Dropped;
        }
        (None, Some(_)) => ChangeType::Created,
        (Some(_), None) => ChangeType::Removed,
        (Some(_), Some(_)) => ChangeType::Updated,
    };

    let identity = after.or(before);

    Classification::Change(NodeChange {
        identifier: identity
            .map(|n| n.identifier.clone())
            .unwrap_or_else(|| identifier.to_string()),
        name: identity_field(identity, |n| n.name.as_str()),
        path: identity_field(identity, |n| n.path.as_str()),
        workspace: identity_field(identity, |n| n.workspace.as_str()),
        dimensions: identity.map(|n| n.dimensions.clone()).unwrap_or_else(Dimensions::new),
        change_type,
        properties_before: before.and_then(|n| n.properties.clone()),
        properties_after: after.and_then(|n| n.properties.clone()),
    })
}

fn identity_field<'a>(
    identity: Option<&'a NodeSnapshot>,
    get: impl Fn(&'a NodeSnapshot) -> &'a str,
) -> String {
    identity.map(get).unwrap_or(UNKNOWN).to_string()
}
