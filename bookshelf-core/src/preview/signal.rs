//! Selection signalling between preview units and whoever hosts them
//!
//! Units never hold a reference to their container or controller. They post
//! a [`SelectionSignal`] onto a shared [`SelectionBus`] and any ancestor that
//! shares the bus picks it up.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Name of the signal emitted when a preview unit is clicked
pub const BOOK_SELECT: &str = "book-select";

/// A user picked one preview unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSignal {
    /// Preview id of the clicked unit
    pub detail: String,
}

impl SelectionSignal {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        BOOK_SELECT
    }

    /// Selection signals always reach ancestors
    pub fn bubbles(&self) -> bool {
        true
    }

    pub fn cancelable(&self) -> bool {
        false
    }
}

/// Queue of pending selection signals shared by units and their host.
///
/// Cloning is cheap and every clone sees the same queue. Browsing is
/// single-threaded, so the queue is not `Send`.
#[derive(Debug, Clone, Default)]
pub struct SelectionBus {
    queue: Rc<RefCell<VecDeque<SelectionSignal>>>,
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, signal: SelectionSignal) {
        self.queue.borrow_mut().push_back(signal);
    }

    /// Take every pending signal, oldest first
    pub fn drain(&self) -> Vec<SelectionSignal> {
        self.queue.borrow_mut().drain(..).collect()
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Whether two handles share one queue
    pub fn same_bus(&self, other: &SelectionBus) -> bool {
        Rc::ptr_eq(&self.queue, &other.queue)
    }
}
