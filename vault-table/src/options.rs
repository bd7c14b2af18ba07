//! Table configuration

use serde::Deserialize;

use crate::columns::{DEFAULT_COLUMNS, DEFAULT_COLUMN_SIZE};
use crate::sort::Sorting;

/// Initial configuration for a [`TableCore`](crate::TableCore).
///
/// Deserializes from JSON with every field optional, so hosts can keep
/// table presets alongside their other settings.
///
/// # Example
///
/// ```
/// use vault_table::{SortField, Sorting, TableOptions};
///
/// let options = TableOptions::default()
///     .with_initial_sort(Some(Sorting::asc(SortField::Name)))
///     .with_columns(["name", "size"])
///     .with_default_column_size(120);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TableOptions {
    /// Sort applied at construction. `None` keeps documents in input order.
    ///
    /// Default: modified, descending
    pub initial_sort: Option<Sorting>,

    /// Columns visible at construction.
    ///
    /// Default: name, path, modified, size, tags
    pub initial_columns: Vec<String>,

    /// Width reported for columns without a stored size.
    ///
    /// Default: 100
    pub default_column_size: u32,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            initial_sort: Some(Sorting::default()),
            initial_columns: DEFAULT_COLUMNS.iter().map(|c| c.to_string()).collect(),
            default_column_size: DEFAULT_COLUMN_SIZE,
        }
    }
}

impl TableOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial sort. Pass `None` to keep input order.
    pub fn with_initial_sort(mut self, sorting: Option<Sorting>) -> Self {
        self.initial_sort = sorting;
        self
    }

    /// Disables the default sort.
    pub fn unsorted(self) -> Self {
        self.with_initial_sort(None)
    }

    /// Sets the initially visible columns.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.initial_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the fallback column width.
    pub fn with_default_column_size(mut self, size: u32) -> Self {
        self.default_column_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{SortField, SortOrder};

    #[test]
    fn test_defaults() {
        let options = TableOptions::default();
        assert_eq!(options.initial_sort, Some(Sorting::desc(SortField::Modified)));
        assert_eq!(options.initial_columns.len(), DEFAULT_COLUMNS.len());
        assert_eq!(options.default_column_size, 100);
    }

    #[test]
    fn test_deserialize_partial() {
        let options: TableOptions =
            serde_json::from_str(r#"{ "initialColumns": ["name"] }"#).unwrap();
        assert_eq!(options.initial_columns, vec!["name"]);
        assert_eq!(options.initial_sort, Some(Sorting::default()));
    }

    #[test]
    fn test_deserialize_explicit_null_sort() {
        let options: TableOptions =
            serde_json::from_str(r#"{ "initialSort": null }"#).unwrap();
        assert_eq!(options.initial_sort, None);
    }

    #[test]
    fn test_deserialize_sort() {
        let options: TableOptions = serde_json::from_str(
            r#"{ "initialSort": { "field": "size", "order": "asc" }, "defaultColumnSize": 80 }"#,
        )
        .unwrap();
        assert_eq!(
            options.initial_sort,
            Some(Sorting::new(SortField::Size, SortOrder::Asc))
        );
        assert_eq!(options.default_column_size, 80);
    }
}
