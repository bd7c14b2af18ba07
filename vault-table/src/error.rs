//! Error types

/// Errors returned by the few fallible table operations.
///
/// State changes on the table never fail; unknown ids and out-of-range rows
/// are ignored. Only parsing caller-supplied names and serializing exports
/// can fail.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// The export format name is not one of `json` or `csv`.
    #[error("Unknown export format '{format}'")]
    UnknownExportFormat { format: String },

    /// The operation name is not a known bulk operation.
    #[error("Unknown operation '{name}'")]
    UnknownOperation { name: String },

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl TableError {
    /// Creates a new unknown export format error.
    pub fn unknown_export_format(format: impl Into<String>) -> Self {
        Self::UnknownExportFormat {
            format: format.into(),
        }
    }

    /// Creates a new unknown operation error.
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation { name: name.into() }
    }
}

/// Result alias for table operations.
pub type Result<T> = std::result::Result<T, TableError>;
