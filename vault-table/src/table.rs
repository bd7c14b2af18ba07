//! The table core state machine.

use std::collections::{HashMap, HashSet};
use std::fmt;

use log::{debug, trace, warn};

use crate::cache::ContentCache;
use crate::columns::ColumnLayout;
use crate::document::Document;
use crate::error::Result;
use crate::export::{ExportFormat, export_documents};
use crate::observer::{NoopObserver, TableObserver};
use crate::operation::{self, ContextMenuState, OperationRequest};
use crate::options::TableOptions;
use crate::selection::Selection;
use crate::sort::{SortField, SortOrder, Sorting, next_sort, sorted_indices};

/// Owned copy of the table state.
///
/// Changing a snapshot never affects the table it was taken from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableState {
    pub sorting: Option<Sorting>,
    pub selected_rows: HashSet<String>,
    pub visible_columns: Vec<String>,
    pub column_sizes: HashMap<String, u32>,
    /// Sorted-view index of the last plain click; the shift-click anchor.
    pub last_selected_index: Option<usize>,
}

/// Selection, sorting, column and export state over a list of documents.
///
/// `TableCore` is passive: it never fetches or renders. The host feeds it
/// documents and user input, reads back state, and receives notifications
/// through a [`TableObserver`].
///
/// Row indices passed to or returned from the table are positions in
/// [`sorted_documents`](Self::sorted_documents), never in the raw input.
pub struct TableCore {
    /// Documents in caller-supplied order.
    documents: Vec<Document>,
    sorting: Option<Sorting>,
    selection: Selection,
    columns: ColumnLayout,
    default_column_size: u32,
    last_selected_index: Option<usize>,
    cache: ContentCache,
    observer: Box<dyn TableObserver>,
}

impl fmt::Debug for TableCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableCore")
            .field("documents", &self.documents.len())
            .field("sorting", &self.sorting)
            .field("selection", &self.selection)
            .field("columns", &self.columns)
            .field("last_selected_index", &self.last_selected_index)
            .field("cached", &self.cache.len())
            .finish_non_exhaustive()
    }
}

impl Default for TableCore {
    fn default() -> Self {
        Self::new(Vec::new(), TableOptions::default())
    }
}

impl TableCore {
    /// Create a table without an observer.
    pub fn new(documents: Vec<Document>, options: TableOptions) -> Self {
        Self::with_observer(documents, options, NoopObserver)
    }

    /// Create a table that notifies `observer`.
    pub fn with_observer(
        documents: Vec<Document>,
        options: TableOptions,
        observer: impl TableObserver + 'static,
    ) -> Self {
        warn_duplicate_ids(&documents);
        Self {
            documents,
            sorting: options.initial_sort,
            selection: Selection::new(),
            columns: ColumnLayout::new(options.initial_columns),
            default_column_size: options.default_column_size,
            last_selected_index: None,
            cache: ContentCache::new(),
            observer: Box::new(observer),
        }
    }

    /// Replace the observer.
    pub fn set_observer(&mut self, observer: impl TableObserver + 'static) {
        self.observer = Box::new(observer);
    }

    // -------------------------------------------------------------------------
    // Documents
    // -------------------------------------------------------------------------

    /// Replace all documents.
    ///
    /// Selected ids that no longer match a document are dropped. Sorting,
    /// columns and the content cache are left alone.
    pub fn update_documents(&mut self, documents: Vec<Document>) {
        warn_duplicate_ids(&documents);
        self.documents = documents;

        let known: HashSet<&str> = self.documents.iter().map(Document::id).collect();
        let pruned = self.selection.retain(|id| known.contains(id));

        if let Some(anchor) = self.last_selected_index
            && anchor >= self.documents.len()
        {
            self.last_selected_index = None;
        }

        debug!(
            "Documents replaced: {} documents, {} stale selections pruned",
            self.documents.len(),
            pruned
        );

        if pruned > 0 {
            self.notify_selection();
        }
    }

    /// Documents in caller-supplied order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Documents in display order.
    pub fn sorted_documents(&self) -> Vec<Document> {
        self.sorted_order()
            .into_iter()
            .map(|i| self.documents[i].clone())
            .collect()
    }

    /// Find a document by id.
    pub fn document_by_id(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id() == id)
    }

    /// Get the number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the table has no documents.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    fn sorted_order(&self) -> Vec<usize> {
        sorted_indices(&self.documents, self.sorting.as_ref())
    }

    /// Selected ids in the order the rows are displayed.
    fn selected_in_display_order(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.sorted_order()
            .into_iter()
            .map(|i| self.documents[i].id())
            .filter(|id| self.selection.contains(id) && seen.insert(*id))
            .map(str::to_string)
            .collect()
    }

    /// Sorted-view index of a document.
    fn sorted_index_of(&self, order: &[usize], id: &str) -> Option<usize> {
        order.iter().position(|&i| self.documents[i].id() == id)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Get current sort state.
    pub fn sorting(&self) -> Option<&Sorting> {
        self.sorting.as_ref()
    }

    /// Advance the header toggle for `field`: ascending, then descending,
    /// then unsorted. A different field restarts at ascending.
    ///
    /// Returns the new sort state.
    pub fn toggle_sort(&mut self, field: impl Into<SortField>) -> Option<Sorting> {
        let next = next_sort(self.sorting.as_ref(), field.into());
        self.apply_sorting(next.clone());
        next
    }

    /// Set the sort directly. `None` clears it regardless of `order`; a
    /// field without an order sorts ascending.
    pub fn set_sorting(&mut self, field: Option<SortField>, order: Option<SortOrder>) {
        let sorting = field.map(|field| Sorting::new(field, order.unwrap_or_default()));
        self.apply_sorting(sorting);
    }

    /// Clear the sort; documents return to input order.
    pub fn clear_sorting(&mut self) {
        self.apply_sorting(None);
    }

    fn apply_sorting(&mut self, sorting: Option<Sorting>) {
        match &sorting {
            Some(s) => {
                debug!("Sort changed: {} {}", s.field, s.order);
                self.observer.on_sort_change(&s.field, s.order);
            }
            None => debug!("Sort cleared"),
        }
        self.sorting = sorting;
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    /// Flip selection of one row.
    pub fn toggle_row_selection(&mut self, id: &str) {
        if self.document_by_id(id).is_none() {
            trace!("toggle_row_selection: unknown id {id}");
            return;
        }
        self.selection.toggle(id);
        self.notify_selection();
    }

    /// Select a row by id.
    ///
    /// A plain click selects only that row and makes it the anchor. A
    /// shift-click with an anchor selects the sorted range between the two,
    /// replacing the previous selection, and moves the anchor to the
    /// clicked row.
    pub fn select_row(&mut self, id: &str, shift_key: bool) {
        let order = self.sorted_order();
        let Some(index) = self.sorted_index_of(&order, id) else {
            trace!("select_row: unknown id {id}");
            return;
        };
        self.click(&order, index, shift_key);
    }

    /// Same as [`select_row`](Self::select_row) for a row given by its
    /// sorted-view index.
    pub fn handle_row_click(&mut self, index: usize, shift_key: bool) {
        let order = self.sorted_order();
        if index >= order.len() {
            trace!("handle_row_click: index {index} out of range");
            return;
        }
        self.click(&order, index, shift_key);
    }

    fn click(&mut self, order: &[usize], index: usize, shift_key: bool) {
        match self.last_selected_index.filter(|_| shift_key) {
            Some(anchor) => {
                let start = anchor.min(index);
                let end = anchor.max(index).min(order.len() - 1);
                let documents = &self.documents;
                self.selection
                    .replace(order[start..=end].iter().map(|&i| documents[i].id()));
            }
            None => self.selection.select_only(self.documents[order[index]].id()),
        }
        self.last_selected_index = Some(index);
        self.notify_selection();
    }

    /// Add every row between two ids (inclusive, in sorted order) to the
    /// selection. Existing selection is kept.
    pub fn select_range(&mut self, from_id: &str, to_id: &str) {
        let order = self.sorted_order();
        let (Some(from), Some(to)) = (
            self.sorted_index_of(&order, from_id),
            self.sorted_index_of(&order, to_id),
        ) else {
            trace!("select_range: unknown id in {from_id}..{to_id}");
            return;
        };

        let documents = &self.documents;
        self.selection.extend(
            order[from.min(to)..=from.max(to)]
                .iter()
                .map(|&i| documents[i].id()),
        );
        self.notify_selection();
    }

    /// Remove one row from the selection.
    pub fn deselect_row(&mut self, id: &str) {
        if self.document_by_id(id).is_none() {
            trace!("deselect_row: unknown id {id}");
            return;
        }
        self.selection.remove(id);
        self.notify_selection();
    }

    /// Select every document.
    pub fn select_all(&mut self) {
        let documents = &self.documents;
        self.selection.replace(documents.iter().map(Document::id));
        self.notify_selection();
    }

    /// Clear the selection and the shift-click anchor.
    pub fn deselect_all(&mut self) {
        self.selection.clear();
        self.last_selected_index = None;
        self.notify_selection();
    }

    /// Alias for [`deselect_all`](Self::deselect_all).
    pub fn clear_selection(&mut self) {
        self.deselect_all();
    }

    /// Deselect everything if all rows are selected, otherwise select all.
    pub fn toggle_all_selection(&mut self) {
        if self.is_all_selected() {
            self.deselect_all();
        } else {
            self.select_all();
        }
    }

    /// True when there are documents and every one is selected.
    pub fn is_all_selected(&self) -> bool {
        !self.documents.is_empty()
            && self
                .documents
                .iter()
                .all(|doc| self.selection.contains(doc.id()))
    }

    /// True when some, but not all, rows are selected.
    pub fn is_some_selected(&self) -> bool {
        !self.selection.is_empty() && !self.is_all_selected()
    }

    pub fn is_row_selected(&self, id: &str) -> bool {
        self.selection.contains(id)
    }

    /// Selected ids, sorted.
    pub fn selected_paths(&self) -> Vec<String> {
        self.selection.selected()
    }

    /// Alias for [`selected_paths`](Self::selected_paths).
    pub fn selected_rows(&self) -> Vec<String> {
        self.selected_paths()
    }

    /// Selected documents in caller-supplied order.
    pub fn selected_documents(&self) -> Vec<&Document> {
        self.documents
            .iter()
            .filter(|doc| self.selection.contains(doc.id()))
            .collect()
    }

    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    /// Sorted-view index of the shift-click anchor.
    pub fn last_selected_index(&self) -> Option<usize> {
        self.last_selected_index
    }

    fn notify_selection(&mut self) {
        let selected = self.selection.selected();
        trace!("Selection changed: {} selected", selected.len());
        self.observer.on_selection_change(&selected);
    }

    // -------------------------------------------------------------------------
    // Columns
    // -------------------------------------------------------------------------

    pub fn is_column_visible(&self, id: &str) -> bool {
        self.columns.is_visible(id)
    }

    pub fn set_column_visibility(&mut self, id: &str, visible: bool) {
        self.columns.set_visibility(id, visible);
    }

    /// Flip visibility of a column. Returns the new state.
    pub fn toggle_column_visibility(&mut self, id: &str) -> bool {
        self.columns.toggle_visibility(id)
    }

    /// Visible column ids, in the order they were shown.
    pub fn visible_columns(&self) -> Vec<String> {
        self.columns.visible().to_vec()
    }

    pub fn set_column_size(&mut self, id: &str, size: u32) {
        self.columns.set_size(id, size);
    }

    /// Stored width, or the configured default.
    pub fn column_size(&self, id: &str) -> u32 {
        self.columns.size_or(id, self.default_column_size)
    }

    /// Stored width, or `default`.
    pub fn column_size_or(&self, id: &str, default: u32) -> u32 {
        self.columns.size_or(id, default)
    }

    // -------------------------------------------------------------------------
    // Content cache
    // -------------------------------------------------------------------------

    pub fn cache_content(&mut self, id: &str, content: impl Into<String>) {
        self.cache.insert(id, content);
    }

    /// Cached content for a document. `None` when not cached.
    pub fn cached_content(&self, id: &str) -> Option<&str> {
        self.cache.get(id)
    }

    pub fn clear_content_cache(&mut self) {
        self.cache.clear();
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Send the current selection to the observer as a bulk operation
    /// request. The name is not validated.
    pub fn request_operation(&mut self, operation: &str) -> OperationRequest {
        let request = OperationRequest {
            operation: operation.to_string(),
            document_paths: self.selected_in_display_order(),
        };
        debug!(
            "Operation requested: {} on {} documents",
            request.operation,
            request.document_paths.len()
        );
        self.observer.on_operation_request(&request);
        request
    }

    /// Check whether `operation` can run on `selection`.
    pub fn can_perform_operation(operation: &str, selection: &[String]) -> bool {
        operation::can_perform_operation(operation, selection)
    }

    /// Check whether `operation` can run on the current selection.
    pub fn can_perform(&self, operation: &str) -> bool {
        Self::can_perform_operation(operation, &self.selected_paths())
    }

    /// Menu enablement for a right-click on a row and/or column.
    pub fn context_menu_state(
        &self,
        row_id: Option<&str>,
        column_id: Option<&str>,
    ) -> ContextMenuState {
        ContextMenuState {
            row_id: row_id.map(str::to_string),
            column_id: column_id.map(str::to_string),
            ..ContextMenuState::derive(self.selection.len(), self.documents.len())
        }
    }

    // -------------------------------------------------------------------------
    // Export
    // -------------------------------------------------------------------------

    /// Export selected documents in display order.
    pub fn export_selected_rows(&self, format: ExportFormat) -> Result<String> {
        let documents = &self.documents;
        let selected = self
            .sorted_order()
            .into_iter()
            .map(|i| &documents[i])
            .filter(|doc| self.selection.contains(doc.id()));
        export_documents(selected, format)
    }

    /// Export every document in display order.
    pub fn export_all_rows(&self, format: ExportFormat) -> Result<String> {
        let documents = &self.documents;
        export_documents(
            self.sorted_order().into_iter().map(|i| &documents[i]),
            format,
        )
    }

    // -------------------------------------------------------------------------
    // Snapshot
    // -------------------------------------------------------------------------

    /// Owned copy of the current state.
    pub fn state(&self) -> TableState {
        TableState {
            sorting: self.sorting.clone(),
            selected_rows: self.selection.as_set().clone(),
            visible_columns: self.columns.visible().to_vec(),
            column_sizes: self.columns.sizes().clone(),
            last_selected_index: self.last_selected_index,
        }
    }
}

/// Duplicate ids make rows indistinguishable to selection and lookup. They
/// are accepted, but logged.
fn warn_duplicate_ids(documents: &[Document]) {
    let mut seen = HashSet::with_capacity(documents.len());
    for doc in documents {
        if !seen.insert(doc.id()) {
            warn!("Duplicate document id {}", doc.id());
        }
    }
}
