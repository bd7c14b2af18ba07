//! Document records as seen by the table.
//!
//! A document is one markdown file of the vault. The table never mutates
//! documents; it only orders, selects and exports them.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Naive timestamp layouts accepted in addition to RFC 3339. Read as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// Last-modified timestamp of a document, resolved once at ingestion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<Value>", into = "Option<String>")]
pub enum Modified {
    /// No timestamp was supplied.
    #[default]
    Missing,
    /// A timestamp was supplied but could not be parsed. Keeps the raw text.
    Invalid(String),
    /// A parsed timestamp.
    Valid(DateTime<Utc>),
}

impl Modified {
    /// Parse a raw timestamp string.
    ///
    /// Accepts RFC 3339, naive date-times (taken as UTC) and plain
    /// `YYYY-MM-DD` dates (midnight UTC). Anything else is `Invalid`.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Modified::Valid(dt.with_timezone(&Utc));
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Modified::Valid(naive.and_utc());
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            && let Some(midnight) = date.and_hms_opt(0, 0, 0)
        {
            return Modified::Valid(midnight.and_utc());
        }

        Modified::Invalid(raw.to_string())
    }

    /// Milliseconds since the epoch, fractions truncated.
    pub fn from_millis(millis: f64) -> Self {
        if millis.is_finite()
            && let Some(dt) = DateTime::from_timestamp_millis(millis.trunc() as i64)
        {
            return Modified::Valid(dt);
        }
        Modified::Invalid(millis.to_string())
    }

    /// The parsed timestamp, if valid.
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Modified::Valid(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Check if this holds a usable timestamp.
    pub fn is_valid(&self) -> bool {
        matches!(self, Modified::Valid(_))
    }

    /// Milliseconds since the epoch used for ordering.
    ///
    /// Missing and invalid timestamps map to epoch zero, so they sort as
    /// the oldest documents.
    pub fn sort_key(&self) -> i64 {
        match self {
            Modified::Valid(dt) => dt.timestamp_millis(),
            Modified::Missing | Modified::Invalid(_) => 0,
        }
    }

    /// ISO-8601 rendering with millisecond precision, e.g.
    /// `2024-01-01T00:00:00.000Z`. `None` unless valid.
    pub fn to_iso_string(&self) -> Option<String> {
        self.timestamp()
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
    }
}

impl From<DateTime<Utc>> for Modified {
    fn from(dt: DateTime<Utc>) -> Self {
        Modified::Valid(dt)
    }
}

impl From<Option<String>> for Modified {
    fn from(raw: Option<String>) -> Self {
        match raw {
            Some(raw) => Modified::parse(&raw),
            None => Modified::Missing,
        }
    }
}

/// Strings are parsed, numbers are epoch milliseconds, anything else is
/// kept as invalid.
impl From<Option<Value>> for Modified {
    fn from(raw: Option<Value>) -> Self {
        match raw {
            None | Some(Value::Null) => Modified::Missing,
            Some(Value::String(raw)) => Modified::parse(&raw),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(millis) => DateTime::from_timestamp_millis(millis)
                    .map(Modified::Valid)
                    .unwrap_or_else(|| Modified::Invalid(n.to_string())),
                None => n
                    .as_f64()
                    .map(Modified::from_millis)
                    .unwrap_or_else(|| Modified::Invalid(n.to_string())),
            },
            Some(other) => Modified::Invalid(other.to_string()),
        }
    }
}

impl From<Modified> for Option<String> {
    fn from(modified: Modified) -> Self {
        match modified {
            Modified::Missing => None,
            Modified::Invalid(raw) => Some(raw),
            Modified::Valid(_) => modified.to_iso_string(),
        }
    }
}

/// File metadata carried by a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentMetadata {
    pub name: String,
    pub size: u64,
    pub modified: Modified,
    pub frontmatter: Map<String, Value>,
    pub tags: Vec<String>,
    pub links: Vec<String>,
}

/// One vault document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Vault-relative path.
    pub path: String,
    /// Absolute path. Takes precedence over `path` as the document id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_path: Option<String>,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Create a document for `path`, named after its last path segment.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        Self {
            path,
            full_path: None,
            metadata: DocumentMetadata {
                name,
                ..DocumentMetadata::default()
            },
        }
    }

    /// The id used for selection, caching and lookups: `full_path` when
    /// present, otherwise `path`.
    pub fn id(&self) -> &str {
        self.full_path.as_deref().unwrap_or(&self.path)
    }

    pub fn with_full_path(mut self, full_path: impl Into<String>) -> Self {
        self.full_path = Some(full_path.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = name.into();
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.metadata.size = size;
        self
    }

    pub fn with_modified(mut self, modified: impl Into<Modified>) -> Self {
        self.metadata.modified = modified.into();
        self
    }

    /// Set the modified timestamp from raw text, parsing it.
    pub fn with_modified_str(mut self, raw: &str) -> Self {
        self.metadata.modified = Modified::parse(raw);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_links<I, S>(mut self, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata.links = links.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_frontmatter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.frontmatter.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_prefers_full_path() {
        let doc = Document::new("notes/a.md");
        assert_eq!(doc.id(), "notes/a.md");

        let doc = doc.with_full_path("/vault/notes/a.md");
        assert_eq!(doc.id(), "/vault/notes/a.md");
    }

    #[test]
    fn test_new_derives_name_from_path() {
        assert_eq!(Document::new("notes/daily/today.md").metadata.name, "today.md");
        assert_eq!(Document::new("root.md").metadata.name, "root.md");
    }

    #[test]
    fn test_parse_rfc3339() {
        let modified = Modified::parse("2024-01-01T00:00:00.000Z");
        assert!(modified.is_valid());
        assert_eq!(
            modified.to_iso_string().as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_parse_offset_is_normalized_to_utc() {
        let modified = Modified::parse("2024-01-01T02:00:00+02:00");
        assert_eq!(
            modified.to_iso_string().as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_parse_plain_date() {
        let modified = Modified::parse("2024-03-05");
        assert_eq!(
            modified.to_iso_string().as_deref(),
            Some("2024-03-05T00:00:00.000Z")
        );
    }

    #[test]
    fn test_parse_garbage_is_invalid() {
        let modified = Modified::parse("last tuesday");
        assert_eq!(modified, Modified::Invalid("last tuesday".to_string()));
        assert_eq!(modified.sort_key(), 0);
        assert_eq!(modified.to_iso_string(), None);
    }

    #[test]
    fn test_missing_sorts_as_epoch() {
        assert_eq!(Modified::Missing.sort_key(), 0);
    }

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "path": "a.md",
            "fullPath": "/vault/a.md",
            "metadata": {
                "name": "a",
                "size": 12,
                "modified": "2024-01-01T00:00:00Z",
                "frontmatter": { "title": "A" },
                "tags": ["x"],
                "links": []
            }
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.id(), "/vault/a.md");
        assert_eq!(doc.metadata.size, 12);
        assert!(doc.metadata.modified.is_valid());
        assert_eq!(doc.metadata.frontmatter["title"], "A");
    }

    #[test]
    fn test_deserialize_without_modified() {
        let doc: Document =
            serde_json::from_str(r#"{ "path": "a.md", "metadata": { "name": "a" } }"#).unwrap();
        assert_eq!(doc.metadata.modified, Modified::Missing);
        assert_eq!(doc.full_path, None);
    }

    fn modified_of(json: &str) -> Modified {
        let doc: Document = serde_json::from_str(&format!(
            r#"{{ "path": "a.md", "metadata": {{ "modified": {json} }} }}"#
        ))
        .unwrap();
        doc.metadata.modified
    }

    #[test]
    fn test_deserialize_numeric_modified_as_epoch_millis() {
        assert_eq!(
            modified_of("1704067200000").to_iso_string().as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
        assert_eq!(
            modified_of("1704067200000.9").to_iso_string().as_deref(),
            Some("2024-01-01T00:00:00.000Z")
        );
    }

    #[test]
    fn test_deserialize_non_date_values_as_invalid() {
        assert_eq!(
            modified_of(r#"{"x":1}"#),
            Modified::Invalid(r#"{"x":1}"#.to_string())
        );
        assert_eq!(modified_of("true"), Modified::Invalid("true".to_string()));
        assert_eq!(modified_of("[1]").sort_key(), 0);
        assert_eq!(modified_of("null"), Modified::Missing);
    }

    #[test]
    fn test_document_list_with_mixed_modified_values() {
        let docs: Vec<Document> = serde_json::from_str(
            r#"[
                { "path": "a.md", "metadata": { "modified": 1704067200000 } },
                { "path": "b.md", "metadata": { "modified": {"x": 1} } },
                { "path": "c.md", "metadata": { "modified": "2024-01-01" } }
            ]"#,
        )
        .unwrap();
        assert_eq!(docs.len(), 3);
        assert!(docs[0].metadata.modified.is_valid());
        assert!(!docs[1].metadata.modified.is_valid());
        assert!(docs[2].metadata.modified.is_valid());
    }

    #[test]
    fn test_serialize_omits_missing_full_path() {
        let json = serde_json::to_string(&Document::new("a.md")).unwrap();
        assert!(!json.contains("fullPath"));
        assert!(json.contains("\"modified\":null"));
    }
}
