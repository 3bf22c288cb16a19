//! Event normalizer: maps raw signal keys onto the closed `SignalKind` set.
//!
//! A raw key is `<emitting class>::<event method>`. The table below is the
//! complete set of keys the content repository emits that we act on; every
//! other key normalizes to `SignalKind::Unrecognized` and is ignored.

use crate::signal::SignalKind;

const NAMESPACE_SEPARATOR: &str = "::";

pub const NODE_ADDED: &str = "Neos\\ContentRepository\\Domain\\Model\\Node::nodeAdded";
pub const NODE_UPDATED: &str = "Neos\\ContentRepository\\Domain\\Model\\Node::nodeUpdated";
pub const NODE_REMOVED: &str = "Neos\\ContentRepository\\Domain\\Model\\Node::nodeRemoved";
pub const NODE_PROPERTY_CHANGED: &str =
    "Neos\\ContentRepository\\Domain\\Model\\Node::nodePropertyChanged";
pub const NODE_PUBLISHED: &str =
    "Neos\\ContentRepository\\Domain\\Service\\PublishingService::nodePublished";
pub const NODE_DISCARDED: &str =
    "Neos\\ContentRepository\\Domain\\Service\\PublishingService::nodeDiscarded";
pub const BEFORE_NODE_PUBLISHING: &str =
    "Neos\\ContentRepository\\Domain\\Model\\Workspace::beforeNodePublishing";
pub const AFTER_NODE_PUBLISHING: &str =
    "Neos\\ContentRepository\\Domain\\Model\\Workspace::afterNodePublishing";

static SIGNAL_TABLE: [(&str, SignalKind); 8] = [
    (NODE_ADDED, SignalKind::NodeAdded),
    (NODE_UPDATED, SignalKind::NodeUpdated),
    (NODE_REMOVED, SignalKind::NodeRemoved),
    (NODE_PROPERTY_CHANGED, SignalKind::NodePropertyChanged),
    (NODE_PUBLISHED, SignalKind::NodePublished),
    (NODE_DISCARDED, SignalKind::NodeDiscarded),
    (BEFORE_NODE_PUBLISHING, SignalKind::BeforeNodePublishing),
    (AFTER_NODE_PUBLISHING, SignalKind::AfterNodePublishing),
];

/// Classify a raw signal key.
pub fn classify(signal_key: &str) -> SignalKind {
    SIGNAL_TABLE
        .iter()
        .find(|(key, _)| *key == signal_key)
        .map(|(_, kind)| *kind)
        .unwrap_or(SignalKind::Unrecognized)
}

/// Logical event name: the part after the last `::`, or the whole key.
pub fn event_name(signal_key: &str) -> &str {
    match signal_key.rfind(NAMESPACE_SEPARATOR) {
        Some(pos) => &signal_key[pos + NAMESPACE_SEPARATOR.len()..],
        None => signal_key,
    }
}

/// Every raw key the normalizer recognizes.
pub fn known_keys() -> impl Iterator<Item = &'static str> {
    SIGNAL_TABLE.iter().map(|(key, _)| *key)
}

/// Every logical event name an endpoint can subscribe to.
pub fn known_event_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = known_keys().map(event_name).collect();
    names.push(crate::types::WORKSPACE_PUBLISHED_ENDPOINT);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_every_table_entry() {
        assert_eq!(classify(NODE_ADDED), SignalKind::NodeAdded);
        assert_eq!(classify(NODE_PROPERTY_CHANGED), SignalKind::NodePropertyChanged);
        assert_eq!(classify(NODE_DISCARDED), SignalKind::NodeDiscarded);
        assert_eq!(classify(BEFORE_NODE_PUBLISHING), SignalKind::BeforeNodePublishing);
        assert_eq!(classify(AFTER_NODE_PUBLISHING), SignalKind::AfterNodePublishing);
    }

    #[test]
    fn unknown_keys_are_unrecognized() {
        assert_eq!(classify("Neos\\Neos\\Service\\PublishingService::nodePublished"), SignalKind::Unrecognized);
        assert_eq!(classify("nodeAdded"), SignalKind::Unrecognized);
        assert_eq!(classify(""), SignalKind::Unrecognized);
    }

    #[test]
    fn event_name_is_suffix_after_last_separator() {
        assert_eq!(event_name(NODE_ADDED), "nodeAdded");
        assert_eq!(event_name(BEFORE_NODE_PUBLISHING), "beforeNodePublishing");
        assert_eq!(event_name("a::b::c"), "c");
    }

    #[test]
    fn event_name_without_separator_is_whole_key() {
        assert_eq!(event_name("customEvent"), "customEvent");
        assert_eq!(event_name("trailing::"), "");
    }

    #[test]
    fn known_event_names_include_workspace_published() {
        let names = known_event_names();
        assert!(names.contains(&"nodeAdded"));
        assert!(names.contains(&"workspacePublished"));
        assert_eq!(names.len(), 9);
    }
}
