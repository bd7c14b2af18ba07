//! Column visibility and sizing.

use std::collections::HashMap;

/// Columns shown when the host does not choose any.
pub const DEFAULT_COLUMNS: &[&str] = &["name", "path", "modified", "size", "tags"];

/// Width used when neither the column nor the host specifies one.
pub const DEFAULT_COLUMN_SIZE: u32 = 100;

/// Which columns are visible and how wide they are.
///
/// Visible columns keep the order in which they were first shown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnLayout {
    visible: Vec<String>,
    sizes: HashMap<String, u32>,
}

impl ColumnLayout {
    pub fn new<I, S>(visible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut layout = Self::default();
        for id in visible {
            let id: String = id.into();
            layout.set_visibility(&id, true);
        }
        layout
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.iter().any(|c| c == id)
    }

    /// Show or hide a column.
    pub fn set_visibility(&mut self, id: &str, visible: bool) {
        let position = self.visible.iter().position(|c| c == id);
        match (visible, position) {
            (true, None) => self.visible.push(id.to_string()),
            (false, Some(index)) => {
                self.visible.remove(index);
            }
            _ => {}
        }
    }

    /// Flip visibility. Returns the new state.
    pub fn toggle_visibility(&mut self, id: &str) -> bool {
        let visible = !self.is_visible(id);
        self.set_visibility(id, visible);
        visible
    }

    pub fn visible(&self) -> &[String] {
        &self.visible
    }

    pub fn set_size(&mut self, id: &str, size: u32) {
        self.sizes.insert(id.to_string(), size);
    }

    /// Stored width of a column, or `default` if none was set.
    pub fn size_or(&self, id: &str, default: u32) -> u32 {
        self.sizes.get(id).copied().unwrap_or(default)
    }

    pub fn sizes(&self) -> &HashMap<String, u32> {
        &self.sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_dedups_and_keeps_order() {
        let layout = ColumnLayout::new(["size", "name", "size"]);
        assert_eq!(layout.visible(), ["size", "name"]);
    }

    #[test]
    fn test_toggle_visibility() {
        let mut layout = ColumnLayout::new(DEFAULT_COLUMNS.iter().copied());
        assert!(!layout.toggle_visibility("path"));
        assert!(!layout.is_visible("path"));
        assert!(layout.toggle_visibility("path"));
        assert_eq!(layout.visible().last().map(String::as_str), Some("path"));
    }

    #[test]
    fn test_size_or_default() {
        let mut layout = ColumnLayout::default();
        assert_eq!(layout.size_or("name", DEFAULT_COLUMN_SIZE), 100);
        layout.set_size("name", 240);
        assert_eq!(layout.size_or("name", DEFAULT_COLUMN_SIZE), 240);
        assert_eq!(layout.size_or("size", 80), 80);
    }
}
