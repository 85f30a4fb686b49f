//! Process-scoped document registry
//!
//! Maps document names to their extracted text. One registry is created at
//! startup and a handle is given to every session; it outlives them all.

use buddy_domain::DocumentEntry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

#[derive(Debug, Default)]
struct RegistryInner {
    /// Names in first-registration order
    order: Vec<String>,
    entries: HashMap<String, String>,
}

/// Shared handle to the in-memory document store.
///
/// Cloning is cheap and every clone sees the same entries. Each operation
/// is atomic; concurrent writers to the same name resolve last-writer-wins.
#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, RegistryInner> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, RegistryInner> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert or replace a document.
    ///
    /// Returns `true` if an entry with this name was replaced. A replaced
    /// entry keeps its original position in [`list_names`](Self::list_names).
    pub fn register(&self, name: impl Into<String>, content: impl Into<String>) -> bool {
        let name = name.into();
        let mut inner = self.write();
        let replaced = inner.entries.insert(name.clone(), content.into()).is_some();
        if !replaced {
            inner.order.push(name.clone());
        }
        debug!(document = %name, replaced, "Document registered");
        replaced
    }

    /// Insert or replace a validated entry.
    pub fn register_entry(&self, entry: DocumentEntry) -> bool {
        let name = entry.name().to_string();
        self.register(name, entry.into_content())
    }

    /// Content of the named document.
    pub fn get(&self, name: &str) -> Option<String> {
        self.read().entries.get(name).cloned()
    }

    pub fn entry(&self, name: &str) -> Option<DocumentEntry> {
        let content = self.get(name)?;
        DocumentEntry::new(name, content).ok()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().entries.contains_key(name)
    }

    /// Registered names in insertion order.
    pub fn list_names(&self) -> Vec<String> {
        self.read().order.clone()
    }

    pub fn len(&self) -> usize {
        self.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reregister_overwrites_single_entry() {
        let registry = DocumentRegistry::new();

        assert!(!registry.register("a.txt", "X"));
        assert!(registry.register("a.txt", "Y"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("a.txt"), Some("Y".to_string()));
        assert_eq!(registry.list_names(), vec!["a.txt"]);
    }

    #[test]
    fn test_list_names_in_insertion_order() {
        let registry = DocumentRegistry::new();
        registry.register("b.txt", "1");
        registry.register("a.txt", "2");
        registry.register("c.txt", "3");
        registry.register("b.txt", "4");

        assert_eq!(registry.list_names(), vec!["b.txt", "a.txt", "c.txt"]);
    }

    #[test]
    fn test_missing_document() {
        let registry = DocumentRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get("nope.txt"), None);
        assert!(registry.entry("nope.txt").is_none());
        assert!(!registry.contains("nope.txt"));
    }

    #[test]
    fn test_clones_share_entries() {
        let registry = DocumentRegistry::new();
        let handle = registry.clone();

        handle.register_entry(DocumentEntry::new("shared.txt", "hello").unwrap());

        assert!(registry.contains("shared.txt"));
        assert_eq!(registry.entry("shared.txt").unwrap().content(), "hello");
    }

    #[test]
    fn test_concurrent_writers_keep_one_entry() {
        let registry = DocumentRegistry::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    registry.register("same.txt", format!("v{i}"));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.len(), 1);
        assert!(registry.get("same.txt").unwrap().starts_with('v'));
    }
}
