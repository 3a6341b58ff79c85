use std::collections::{BTreeMap, BTreeSet};

use requester_core::types::AnyValue;
use requester_core::{Resolved, TokenSource};

/// Resolved outputs keyed by output name.
///
/// Within one chain the first value stored for a name sticks. Entries flagged `cache` survive
/// [`Cache::retain_cached`] and may be refreshed by a later chain.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    entries: BTreeMap<String, Resolved>,
    written: BTreeSet<String>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Resolved> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `false` when the name was already written during this chain.
    pub fn store(&mut self, entry: Resolved) -> bool {
        if !self.written.insert(entry.name.clone()) {
            return false;
        }
        self.entries.insert(entry.name.clone(), entry);
        true
    }

    /// Drop every entry whose output is not flagged `cache` and start a new chain.
    pub fn retain_cached(&mut self) {
        self.entries.retain(|_, e| e.cache);
        self.written.clear();
    }
}

impl TokenSource for Cache {
    fn resolve(&self, token: &str) -> Option<AnyValue> {
        self.entries.resolve(token)
    }
}

/// Cache overlaid with pending inputs; inputs win on collision.
pub(crate) struct MergedValues<'a> {
    pub cache: &'a Cache,
    pub pending: &'a BTreeMap<String, Resolved>,
}

impl TokenSource for MergedValues<'_> {
    fn resolve(&self, token: &str) -> Option<AnyValue> {
        self.pending
            .resolve(token)
            .or_else(|| self.cache.resolve(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use requester_core::types::{OutputSpec, OutputType};
    use requester_core::ResolvedValue;
    use serde_json::json;

    fn entry(name: &str, value: AnyValue, cache: bool) -> Resolved {
        let spec = OutputSpec {
            name: name.to_string(),
            kind: OutputType::Str,
            label: name.to_string(),
            cache,
            path: Some(name.to_string()),
            regex: None,
        };
        Resolved::output(&spec, ResolvedValue::Json(value))
    }

    #[test]
    fn first_write_in_a_chain_wins() {
        let mut cache = Cache::new();
        assert!(cache.store(entry("id", json!(1), false)));
        assert!(!cache.store(entry("id", json!(2), false)));
        assert_eq!(cache.resolve("id"), Some(json!(1)));
    }

    #[test]
    fn retained_entries_can_be_refreshed_by_the_next_chain() {
        let mut cache = Cache::new();
        cache.store(entry("token", json!("old"), true));
        cache.store(entry("tmp", json!(1), false));
        cache.retain_cached();

        assert!(cache.contains("token"));
        assert!(!cache.contains("tmp"));
        assert!(cache.store(entry("token", json!("new"), true)));
        assert_eq!(cache.resolve("token"), Some(json!("new")));
    }
}
