//! Table state for browsing a vault of markdown documents.
//!
//! [`TableCore`] owns a list of [`Document`]s and manages sorting, multi-row
//! selection (including shift-click ranges), column visibility and sizing,
//! a preview content cache, and bulk-operation requests. It does no I/O and
//! no rendering; a host UI drives it and listens through a
//! [`TableObserver`].
//!
//! ```
//! use vault_table::{Document, SortField, TableCore, TableOptions};
//!
//! let docs = vec![
//!     Document::new("a.md").with_size(512),
//!     Document::new("b.md").with_size(2048),
//!     Document::new("c.md").with_size(1024),
//! ];
//! let mut table = TableCore::new(docs, TableOptions::default());
//! table.toggle_sort(SortField::Size);
//!
//! table.handle_row_click(0, false);
//! table.handle_row_click(1, true);
//! assert_eq!(table.selected_paths(), vec!["a.md", "c.md"]);
//! ```

pub mod cache;
pub mod columns;
pub mod document;
pub mod error;
pub mod export;
pub mod observer;
pub mod operation;
pub mod options;
pub mod selection;
pub mod sort;

mod table;

pub use document::{Document, DocumentMetadata, Modified};
pub use error::TableError;
pub use export::ExportFormat;
pub use observer::{Callbacks, NoopObserver, TableEvent, TableObserver};
pub use operation::{ContextMenuState, Operation, OperationRequest};
pub use options::TableOptions;
pub use sort::{SortField, SortOrder, Sorting};
pub use table::*;
