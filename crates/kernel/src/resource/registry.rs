//! Resource registry - ordered, de-duplicated list of managed resources.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A managed resource from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResourceEntry {
    /// URI identifier (e.g., "posts", "user-accounts")
    pub uri: String,
    /// Opaque model type reference (e.g., "App\Post")
    pub model: String,
}

impl ResourceEntry {
    pub fn new(uri: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            model: model.into(),
        }
    }
}

/// Registry of all managed resources, preserving configuration order.
#[derive(Debug, Clone, Default)]
pub struct ResourceRegistry {
    /// Entries in display order
    entries: Vec<ResourceEntry>,
    /// uri -> position in `entries`
    index: HashMap<String, usize>,
    /// Uris claimed by other routes
    reserved: HashSet<String>,
}

impl ResourceRegistry {
    /// Create an empty resource registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from configured entries.
    ///
    /// Entries with an empty or slash-containing uri, and repeats of an
    /// already registered uri, are dropped with a warning.
    pub fn from_entries(entries: impl IntoIterator<Item = ResourceEntry>) -> Self {
        Self::from_entries_reserving(entries, &[])
    }

    /// Build a registry that also rejects any uri listed in `reserved`.
    pub fn from_entries_reserving(
        entries: impl IntoIterator<Item = ResourceEntry>,
        reserved: &[&str],
    ) -> Self {
        let mut registry = Self {
            reserved: reserved.iter().map(|uri| uri.to_string()).collect(),
            ..Self::default()
        };

        for entry in entries {
            registry.register(entry);
        }

        debug!(resources = registry.len(), "built resource registry");
        registry
    }

    /// Register a resource. Returns false if it was rejected.
    pub fn register(&mut self, entry: ResourceEntry) -> bool {
        if entry.uri.is_empty() || entry.uri.contains('/') {
            warn!(uri = %entry.uri, model = %entry.model, "ignoring resource with invalid uri");
            return false;
        }

        if self.reserved.contains(&entry.uri) {
            warn!(uri = %entry.uri, model = %entry.model, "ignoring resource with reserved uri");
            return false;
        }

        if self.index.contains_key(&entry.uri) {
            warn!(uri = %entry.uri, model = %entry.model, "ignoring duplicate resource uri");
            return false;
        }

        self.index.insert(entry.uri.clone(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Get a resource by its uri.
    pub fn get(&self, uri: &str) -> Option<&ResourceEntry> {
        self.index.get(uri).map(|&i| &self.entries[i])
    }

    /// All resources in display order.
    pub fn entries(&self) -> &[ResourceEntry] {
        &self.entries
    }

    /// Get resource count.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn registry_preserves_order() {
        let registry = ResourceRegistry::from_entries(vec![
            ResourceEntry::new("posts", "App\\Post"),
            ResourceEntry::new("authors", "App\\Author"),
            ResourceEntry::new("categories", "App\\Category"),
        ]);

        let uris: Vec<_> = registry.entries().iter().map(|e| e.uri.as_str()).collect();
        assert_eq!(uris, vec!["posts", "authors", "categories"]);
    }

    #[test]
    fn registry_lookup() {
        let registry =
            ResourceRegistry::from_entries(vec![ResourceEntry::new("posts", "App\\Post")]);

        assert_eq!(registry.get("posts").unwrap().model, "App\\Post");
        assert!(registry.get("users").is_none());
    }

    #[test]
    fn registry_drops_duplicates() {
        let registry = ResourceRegistry::from_entries(vec![
            ResourceEntry::new("posts", "App\\Post"),
            ResourceEntry::new("posts", "App\\Other"),
        ]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("posts").unwrap().model, "App\\Post");
    }

    #[test]
    fn registry_rejects_invalid_uris() {
        let mut registry = ResourceRegistry::new();
        assert!(!registry.register(ResourceEntry::new("", "App\\Post")));
        assert!(!registry.register(ResourceEntry::new("a/b", "App\\Post")));
        assert!(registry.is_empty());
    }

    #[test]
    fn registry_rejects_reserved_uris() {
        let registry = ResourceRegistry::from_entries_reserving(
            vec![
                ResourceEntry::new("health", "App\\Health"),
                ResourceEntry::new("posts", "App\\Post"),
            ],
            &["health"],
        );

        assert_eq!(registry.len(), 1);
        assert!(registry.get("health").is_none());
        assert!(registry.get("posts").is_some());

        let unreserved =
            ResourceRegistry::from_entries(vec![ResourceEntry::new("health", "App\\Health")]);
        assert_eq!(unreserved.len(), 1);
    }
}
