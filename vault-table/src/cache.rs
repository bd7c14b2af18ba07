//! Preview content cache.
//!
//! A passive key-value store keyed by document id. The host loads content
//! and writes it here; nothing expires until [`ContentCache::clear`].

use std::collections::HashMap;

/// Loaded text content per document id.
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    store: HashMap<String, String>,
}

impl ContentCache {
    /// Creates a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores content for a document, replacing any previous entry.
    pub fn insert(&mut self, id: &str, content: impl Into<String>) {
        self.store.insert(id.to_string(), content.into());
    }

    /// Returns cached content. `None` means "not cached", which is distinct
    /// from `Some("")`.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.store.get(id).map(String::as_str)
    }

    /// Returns `true` if content for `id` is cached.
    pub fn contains(&self, id: &str) -> bool {
        self.store.contains_key(id)
    }

    /// Drops the entry for a single document.
    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.store.remove(id)
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    /// Returns the number of cached documents.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_string_is_cached() {
        let mut cache = ContentCache::new();
        cache.insert("a.md", "");
        assert_eq!(cache.get("a.md"), Some(""));
        assert_eq!(cache.get("b.md"), None);
    }

    #[test]
    fn test_insert_overwrites() {
        let mut cache = ContentCache::new();
        cache.insert("a.md", "old");
        cache.insert("a.md", "new");
        assert_eq!(cache.get("a.md"), Some("new"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = ContentCache::new();
        cache.insert("a.md", "x");
        cache.insert("b.md", "y");
        cache.clear();
        assert!(cache.is_empty());
    }
}
