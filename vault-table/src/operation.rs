//! Bulk operations requested from the table.
//!
//! The table never performs an operation itself. It packages the current
//! selection into an [`OperationRequest`] for the host's executor, and
//! derives enablement flags for menus.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TableError;

/// Known bulk operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Delete,
    Export,
    Rename,
    Edit,
    BulkEdit,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Delete => "delete",
            Operation::Export => "export",
            Operation::Rename => "rename",
            Operation::Edit => "edit",
            Operation::BulkEdit => "bulk-edit",
        }
    }

    /// Check whether the operation applies to `selected` documents.
    pub fn accepts(self, selected: usize) -> bool {
        match self {
            Operation::Delete | Operation::Export => selected >= 1,
            Operation::Rename | Operation::Edit => selected == 1,
            Operation::BulkEdit => selected > 1,
        }
    }
}

impl FromStr for Operation {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delete" => Ok(Operation::Delete),
            "export" => Ok(Operation::Export),
            "rename" => Ok(Operation::Rename),
            "edit" => Ok(Operation::Edit),
            "bulk-edit" => Ok(Operation::BulkEdit),
            other => Err(TableError::unknown_operation(other)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether `operation` can run on `selection`.
///
/// Unknown names and empty selections are never allowed.
pub fn can_perform_operation(operation: &str, selection: &[String]) -> bool {
    if selection.is_empty() {
        return false;
    }
    operation
        .parse::<Operation>()
        .map(|op| op.accepts(selection.len()))
        .unwrap_or(false)
}

/// A bulk operation handed to the host's executor.
///
/// The operation name is passed through unvalidated; the executor may
/// reject names it does not support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    pub operation: String,
    pub document_paths: Vec<String>,
}

/// Enablement flags for a row context menu.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextMenuState {
    /// Row the menu was opened on, if any.
    pub row_id: Option<String>,
    /// Column the menu was opened on, if any.
    pub column_id: Option<String>,
    pub can_delete: bool,
    pub can_rename: bool,
    pub can_export: bool,
    pub can_select_all: bool,
    pub can_deselect_all: bool,
}

impl ContextMenuState {
    /// Derive flags from selection size and document count alone.
    pub fn derive(selected: usize, total: usize) -> Self {
        Self {
            row_id: None,
            column_id: None,
            can_delete: Operation::Delete.accepts(selected),
            can_rename: Operation::Rename.accepts(selected),
            can_export: Operation::Export.accepts(selected),
            can_select_all: selected < total,
            can_deselect_all: selected > 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("doc-{i}.md")).collect()
    }

    #[test]
    fn test_empty_selection_never_allowed() {
        for name in ["delete", "export", "rename", "edit", "bulk-edit", "nope"] {
            assert!(!can_perform_operation(name, &[]), "{name}");
        }
    }

    #[test]
    fn test_single_selection() {
        let one = ids(1);
        assert!(can_perform_operation("delete", &one));
        assert!(can_perform_operation("export", &one));
        assert!(can_perform_operation("rename", &one));
        assert!(can_perform_operation("edit", &one));
        assert!(!can_perform_operation("bulk-edit", &one));
    }

    #[test]
    fn test_multi_selection() {
        let many = ids(3);
        assert!(can_perform_operation("delete", &many));
        assert!(can_perform_operation("export", &many));
        assert!(!can_perform_operation("rename", &many));
        assert!(!can_perform_operation("edit", &many));
        assert!(can_perform_operation("bulk-edit", &many));
    }

    #[test]
    fn test_unknown_operation() {
        assert!(!can_perform_operation("move", &ids(2)));
        assert!(matches!(
            "move".parse::<Operation>(),
            Err(TableError::UnknownOperation { name }) if name == "move"
        ));
    }

    #[test]
    fn test_context_menu_flags() {
        let state = ContextMenuState::derive(0, 3);
        assert!(!state.can_delete && !state.can_rename && !state.can_export);
        assert!(state.can_select_all);
        assert!(!state.can_deselect_all);

        let state = ContextMenuState::derive(3, 3);
        assert!(state.can_delete && state.can_export && state.can_deselect_all);
        assert!(!state.can_rename);
        assert!(!state.can_select_all);
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = OperationRequest {
            operation: "delete".to_string(),
            document_paths: vec!["a.md".to_string()],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"operation":"delete","documentPaths":["a.md"]}"#);
    }
}
