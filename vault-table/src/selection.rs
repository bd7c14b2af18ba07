//! ID-based row selection.
//!
//! Selection is keyed by document id rather than row position so it stays
//! stable when the table is re-sorted or its documents are replaced.

use std::collections::HashSet;

/// Set of selected document ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: HashSet<String>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all selected IDs (sorted for deterministic ordering).
    pub fn selected(&self) -> Vec<String> {
        let mut ids: Vec<_> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    /// Borrow the underlying set.
    pub fn as_set(&self) -> &HashSet<String> {
        &self.selected
    }

    /// Check if an ID is selected.
    pub fn contains(&self, id: &str) -> bool {
        self.selected.contains(id)
    }

    /// Get the number of selected items.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Check if nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Clear all selection. Returns the number of ids removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.selected.len();
        self.selected.clear();
        removed
    }

    /// Replace the selection with a single id.
    pub fn select_only(&mut self, id: &str) {
        self.selected.clear();
        self.selected.insert(id.to_string());
    }

    /// Add an id. Returns true if it was not already selected.
    pub fn insert(&mut self, id: &str) -> bool {
        self.selected.insert(id.to_string())
    }

    /// Remove an id. Returns true if it was selected.
    pub fn remove(&mut self, id: &str) -> bool {
        self.selected.remove(id)
    }

    /// Flip membership of an id. Returns true if it is now selected.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.selected.remove(id) {
            false
        } else {
            self.selected.insert(id.to_string());
            true
        }
    }

    /// Add every id from the iterator. Returns how many were newly selected.
    pub fn extend<'a, I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        ids.into_iter()
            .filter(|id| self.selected.insert((*id).to_string()))
            .count()
    }

    /// Replace the selection with the given ids.
    pub fn replace<'a, I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.selected.clear();
        self.extend(ids);
    }

    /// Keep only ids accepted by `keep`. Returns the number removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let before = self.selected.len();
        self.selected.retain(|id| keep(id));
        before - self.selected.len()
    }
}
