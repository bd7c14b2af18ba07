//! Sort state and document ordering.

use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::document::Document;

/// Field a table can be sorted by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortField {
    Name,
    Path,
    Modified,
    Size,
    /// Any other column id. Compares every pair as equal.
    Other(String),
}

impl SortField {
    pub fn as_str(&self) -> &str {
        match self {
            SortField::Name => "name",
            SortField::Path => "path",
            SortField::Modified => "modified",
            SortField::Size => "size",
            SortField::Other(field) => field,
        }
    }
}

impl From<&str> for SortField {
    fn from(s: &str) -> Self {
        match s {
            "name" => SortField::Name,
            "path" => SortField::Path,
            "modified" => SortField::Modified,
            "size" => SortField::Size,
            other => SortField::Other(other.to_string()),
        }
    }
}

impl FromStr for SortField {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortField::from(s))
    }
}

impl From<String> for SortField {
    fn from(s: String) -> Self {
        SortField::from(s.as_str())
    }
}

impl From<SortField> for String {
    fn from(field: SortField) -> Self {
        field.as_str().to_string()
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Apply this direction to an ascending ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

/// Active sort: a field and a direction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sorting {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sorting {
    pub fn new(field: impl Into<SortField>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<SortField>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<SortField>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    /// Compare two documents under this sort.
    pub fn compare(&self, a: &Document, b: &Document) -> Ordering {
        self.order.apply(compare_documents(a, b, &self.field))
    }
}

impl Default for Sorting {
    /// Newest documents first.
    fn default() -> Self {
        Self::desc(SortField::Modified)
    }
}

/// Next state of the three-state header toggle.
///
/// A new field starts ascending, ascending flips to descending, and
/// descending clears the sort.
pub fn next_sort(current: Option<&Sorting>, field: SortField) -> Option<Sorting> {
    match current {
        Some(sorting) if sorting.field == field => match sorting.order {
            SortOrder::Asc => Some(Sorting::new(field, SortOrder::Desc)),
            SortOrder::Desc => None,
        },
        _ => Some(Sorting::new(field, SortOrder::Asc)),
    }
}

/// Lowercased, decomposed characters of a name, optionally without accents.
fn folded(name: &str, strip_accents: bool) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(move |&c| !(strip_accents && is_combining_mark(c)))
        .flat_map(char::to_lowercase)
}

/// Collation-style comparison: base letters first, ignoring accents and
/// case; then unaccented before accented; then lowercase before uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    folded(a, true)
        .cmp(folded(b, true))
        .then_with(|| folded(a, false).cmp(folded(b, false)))
        .then_with(|| b.cmp(a))
}

/// Compare two documents ascending by `field`.
pub fn compare_documents(a: &Document, b: &Document, field: &SortField) -> Ordering {
    match field {
        SortField::Name => compare_names(&a.metadata.name, &b.metadata.name),
        SortField::Path => a.path.cmp(&b.path),
        SortField::Modified => a
            .metadata
            .modified
            .sort_key()
            .cmp(&b.metadata.modified.sort_key()),
        SortField::Size => a.metadata.size.cmp(&b.metadata.size),
        SortField::Other(_) => Ordering::Equal,
    }
}

/// Stable-sort documents in place. Equal keys keep their input order in
/// both directions.
pub fn sort_documents(documents: &mut [Document], sorting: &Sorting) {
    documents.sort_by(|a, b| sorting.compare(a, b));
}

/// Positions of `documents` in display order. Without a sort this is the
/// input order.
pub fn sorted_indices(documents: &[Document], sorting: Option<&Sorting>) -> Vec<usize> {
    let mut order: Vec<usize> = (0..documents.len()).collect();
    if let Some(sorting) = sorting {
        order.sort_by(|&a, &b| sorting.compare(&documents[a], &documents[b]));
    }
    order
}
