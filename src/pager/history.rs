//! Cursor history
//!
//! An ordered stack of first-record markers, one per page visited going
//! forward. Backward navigation seeks the marker two positions from the top;
//! the top itself always belongs to the page currently displayed.

use crate::query::Marker;

/// Stack of first-record markers in visitation order
///
/// Invariant: once any page has loaded, the stack is non-empty and its top is
/// the current page's first-record marker. The bottom entry (the very first
/// page) can never be popped.
#[derive(Debug, Clone, Default)]
pub struct CursorHistory {
    markers: Vec<Marker>,
}

impl CursorHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a marker for a newly loaded page. O(1).
    pub fn push(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Marker of the page immediately before the current one
    ///
    /// Returns `None` when the history holds one entry or fewer: there is no
    /// page before the first.
    pub fn peek_back(&self) -> Option<&Marker> {
        if self.markers.len() < 2 {
            return None;
        }
        self.markers.get(self.markers.len() - 2)
    }

    /// Remove and return the top entry
    ///
    /// Returns `None` without modifying the stack when the history holds one
    /// entry or fewer; the first page's marker is never popped.
    pub fn pop(&mut self) -> Option<Marker> {
        if self.markers.len() < 2 {
            return None;
        }
        self.markers.pop()
    }

    /// Clear the history
    ///
    /// Markers are scoped to one `(order, filter)` pair, so a filter change
    /// must discard all of them.
    pub fn reset(&mut self) {
        self.markers.clear();
    }

    /// Marker of the current page's first record, if any page has loaded
    pub fn top(&self) -> Option<&Marker> {
        self.markers.last()
    }

    /// Number of pages visited forward from the first
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Whether no page has been recorded
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
