use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde_json::Value;

/// Runtime overrides keyed by policy path, each with an optional expiry.
#[derive(Clone, Debug, Default)]
pub struct OverrideStore {
    entries: BTreeMap<String, OverrideEntry>,
}

#[derive(Clone, Debug)]
struct OverrideEntry {
    value: Value,
    expires_at: Option<Instant>,
}

impl OverrideEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |expires| expires > now)
    }
}

impl OverrideStore {
    /// A TTL too large to represent as an instant never expires.
    pub fn insert(&mut self, path: String, value: Value, ttl: Option<Duration>) {
        let expires_at = ttl.and_then(|dur| Instant::now().checked_add(dur));
        self.entries.insert(path, OverrideEntry { value, expires_at });
    }

    pub fn remove(&mut self, path: &str) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one entry has expired and not yet been pruned.
    pub fn has_expired(&self) -> bool {
        let now = Instant::now();
        self.entries.values().any(|entry| !entry.is_live(now))
    }

    /// Drops expired entries and returns the remaining ones in path order.
    pub fn live_entries(&mut self) -> Vec<(String, Value)> {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.is_live(now));
        self.entries
            .iter()
            .map(|(path, entry)| (path.clone(), entry.value.clone()))
            .collect()
    }
}
