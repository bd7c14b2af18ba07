//! Notifications emitted by the table.
//!
//! Observers are called synchronously from inside the mutating call, before
//! it returns. All methods default to doing nothing, so an observer only
//! implements the notifications it cares about.

use std::cell::RefCell;
use std::rc::Rc;

use crate::operation::OperationRequest;
use crate::sort::{SortField, SortOrder};

/// A notification, as a value. Convenient for hosts that queue events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    SelectionChanged(Vec<String>),
    SortChanged { field: SortField, order: SortOrder },
    OperationRequested(OperationRequest),
}

/// Receiver for table notifications.
pub trait TableObserver {
    /// Called after every selection mutation with the full selection.
    fn on_selection_change(&mut self, _selected: &[String]) {}

    /// Called when a sort field is set. Clearing the sort does not notify.
    fn on_sort_change(&mut self, _field: &SortField, _order: SortOrder) {}

    /// Called when the host asks for a bulk operation on the selection.
    fn on_operation_request(&mut self, _request: &OperationRequest) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TableObserver for NoopObserver {}

/// Collects every notification as a [`TableEvent`].
impl TableObserver for Vec<TableEvent> {
    fn on_selection_change(&mut self, selected: &[String]) {
        self.push(TableEvent::SelectionChanged(selected.to_vec()));
    }

    fn on_sort_change(&mut self, field: &SortField, order: SortOrder) {
        self.push(TableEvent::SortChanged {
            field: field.clone(),
            order,
        });
    }

    fn on_operation_request(&mut self, request: &OperationRequest) {
        self.push(TableEvent::OperationRequested(request.clone()));
    }
}

/// Lets the host keep a handle to an observer it gave to the table.
impl<O: TableObserver> TableObserver for Rc<RefCell<O>> {
    fn on_selection_change(&mut self, selected: &[String]) {
        self.borrow_mut().on_selection_change(selected);
    }

    fn on_sort_change(&mut self, field: &SortField, order: SortOrder) {
        self.borrow_mut().on_sort_change(field, order);
    }

    fn on_operation_request(&mut self, request: &OperationRequest) {
        self.borrow_mut().on_operation_request(request);
    }
}

/// Adapts three closures into an observer. Missing closures are skipped.
#[derive(Default)]
pub struct Callbacks {
    pub selection_change: Option<Box<dyn FnMut(&[String])>>,
    pub sort_change: Option<Box<dyn FnMut(&SortField, SortOrder)>>,
    pub operation_request: Option<Box<dyn FnMut(&OperationRequest)>>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_selection_change(mut self, f: impl FnMut(&[String]) + 'static) -> Self {
        self.selection_change = Some(Box::new(f));
        self
    }

    pub fn on_sort_change(mut self, f: impl FnMut(&SortField, SortOrder) + 'static) -> Self {
        self.sort_change = Some(Box::new(f));
        self
    }

    pub fn on_operation_request(mut self, f: impl FnMut(&OperationRequest) + 'static) -> Self {
        self.operation_request = Some(Box::new(f));
        self
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("selection_change", &self.selection_change.is_some())
            .field("sort_change", &self.sort_change.is_some())
            .field("operation_request", &self.operation_request.is_some())
            .finish()
    }
}

impl TableObserver for Callbacks {
    fn on_selection_change(&mut self, selected: &[String]) {
        if let Some(f) = self.selection_change.as_mut() {
            f(selected);
        }
    }

    fn on_sort_change(&mut self, field: &SortField, order: SortOrder) {
        if let Some(f) = self.sort_change.as_mut() {
            f(field, order);
        }
    }

    fn on_operation_request(&mut self, request: &OperationRequest) {
        if let Some(f) = self.operation_request.as_mut() {
            f(request);
        }
    }
}
