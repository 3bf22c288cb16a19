use std::collections::{BTreeMap, HashMap};

/// Logical event name → ordered list of destination URLs.
///
/// Built once per process from the loaded config and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    routes: HashMap<String, Vec<String>>,
}

impl EndpointConfig {
    pub fn from_map(routes: BTreeMap<String, Vec<String>>) -> Self {
        Self { routes: routes.into_iter().collect() }
    }

    pub fn from_pairs<I, K, U>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<U>)>,
        K: Into<String>,
        U: Into<String>,
    {
        let routes = pairs
            .into_iter()
            .map(|(event, urls)| (event.into(), urls.into_iter().map(Into::into).collect()))
            .collect();
        Self { routes }
    }

    /// URLs subscribed to `event_name`, in configured order. Empty when none.
    pub fn urls_for(&self, event_name: &str) -> &[String] {
        self.routes.get(event_name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when no event has a single URL configured.
    pub fn is_empty(&self) -> bool {
        self.routes.values().all(Vec::is_empty)
    }

    pub fn event_names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }
}
