//! JSON and CSV export of document rows.

use std::fmt;
use std::str::FromStr;

use crate::document::Document;
use crate::error::{Result, TableError};

/// Fixed CSV column set.
pub const CSV_HEADERS: [&str; 5] = ["Path", "Name", "Size", "Modified", "Tags"];

/// Export serialization format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl FromStr for ExportFormat {
    type Err = TableError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            _ => Err(TableError::unknown_export_format(s)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Csv => f.write_str("csv"),
        }
    }
}

/// Serialize documents in the given format.
pub fn export_documents<'a, I>(documents: I, format: ExportFormat) -> Result<String>
where
    I: IntoIterator<Item = &'a Document>,
{
    let documents: Vec<&Document> = documents.into_iter().collect();
    match format {
        ExportFormat::Json => to_json(&documents),
        ExportFormat::Csv => Ok(to_csv(&documents)),
    }
}

/// Pretty-printed JSON array with two-space indentation.
pub fn to_json(documents: &[&Document]) -> Result<String> {
    Ok(serde_json::to_string_pretty(documents)?)
}

/// CSV with a header row and one line per document.
///
/// An empty slice yields an empty string, without a header.
pub fn to_csv(documents: &[&Document]) -> String {
    if documents.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(documents.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    for doc in documents {
        let cells = [
            escape_cell(&doc.path),
            escape_cell(&doc.metadata.name),
            doc.metadata.size.to_string(),
            doc.metadata.modified.to_iso_string().unwrap_or_default(),
            escape_cell(&doc.metadata.tags.join(";")),
        ];
        lines.push(cells.join(","));
    }
    lines.join("\n")
}

/// Quote a cell, doubling inner quotes, only when it contains a comma,
/// quote or newline.
fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("plain"), "plain");
        assert_eq!(escape_cell("a,b"), "\"a,b\"");
        assert_eq!(escape_cell("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_cell("two\nlines"), "\"two\nlines\"");
    }

    #[test]
    fn test_csv_empty_has_no_header() {
        assert_eq!(to_csv(&[]), "");
    }

    #[test]
    fn test_csv_quotes_only_where_needed() {
        let doc = Document::new("/a,b.md")
            .with_name("a,b")
            .with_size(1024)
            .with_modified_str("2024-01-01T00:00:00.000Z")
            .with_tags(["x", "y"]);
        assert_eq!(
            to_csv(&[&doc]),
            "Path,Name,Size,Modified,Tags\n\"/a,b.md\",\"a,b\",1024,2024-01-01T00:00:00.000Z,x;y"
        );
    }

    #[test]
    fn test_csv_invalid_modified_is_empty() {
        let doc = Document::new("a.md").with_name("a").with_modified_str("soon");
        assert_eq!(to_csv(&[&doc]), "Path,Name,Size,Modified,Tags\na.md,a,0,,");
    }

    #[test]
    fn test_json_is_pretty_printed() {
        let doc = Document::new("a.md").with_size(3);
        let json = to_json(&[&doc]).unwrap();
        assert!(json.starts_with("[\n  {\n    \"path\": \"a.md\""));
        let parsed: Vec<Document> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec![doc]);
    }

    #[test]
    fn test_json_empty() {
        assert_eq!(to_json(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("json".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "yaml".parse::<ExportFormat>(),
            Err(TableError::UnknownExportFormat { format }) if format == "yaml"
        ));
    }
}
