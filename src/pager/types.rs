//! Pager types
//!
//! Configuration, state, and operation outcomes for the navigation engine.

use super::history::CursorHistory;
use crate::error::{Error, Result};
use crate::query::{Marker, SortOrder};
use crate::store::Hit;
use crate::types::JsonValue;

// ============================================================================
// Pager Config
// ============================================================================

/// Configuration for one browsing session
///
/// Page size positivity is the only runtime-checkable precondition the
/// engine has, so it is enforced here, at construction, rather than at
/// navigation time.
#[derive(Debug, Clone)]
pub struct PagerConfig {
    /// Collection to browse
    pub collection: String,
    /// Sort order pages are cut under
    pub order: SortOrder,
    /// Records per page; always positive
    page_size: u32,
}

impl PagerConfig {
    /// Create a config; fails on an empty collection name or zero page size
    pub fn new(
        collection: impl Into<String>,
        order: SortOrder,
        page_size: u32,
    ) -> Result<Self> {
        let collection = collection.into();
        if collection.is_empty() {
            return Err(Error::invalid_value("collection", "must not be empty"));
        }
        if page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be positive"));
        }
        Ok(Self {
            collection,
            order,
            page_size,
        })
    }

    /// Records per page
    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

// ============================================================================
// Page
// ============================================================================

/// One loaded page: a non-empty run of records plus its boundary markers
///
/// The last marker seeks the next page; the first marker seeks back to this
/// page exactly.
#[derive(Debug, Clone)]
pub struct Page {
    /// Records in query order
    pub items: Vec<JsonValue>,
    /// Marker of the first record
    pub first: Marker,
    /// Marker of the last record
    pub last: Marker,
}

impl Page {
    /// Build a page from query hits; `None` when the result was empty
    pub fn from_hits(hits: Vec<Hit>) -> Option<Self> {
        let first = hits.first()?.marker.clone();
        let last = hits.last()?.marker.clone();
        let items = hits.into_iter().map(|hit| hit.record).collect();
        Some(Self { items, first, last })
    }

    /// Number of records on the page; always at least one
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// A `Page` is never empty; kept for clippy symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ============================================================================
// Current Page
// ============================================================================

/// What the pager is currently showing
///
/// `NoMatches` is a valid terminal browsing state distinct from `NotLoaded`:
/// it means "the search ran and found nothing", not "no search yet".
#[derive(Debug, Clone, Default)]
pub enum CurrentPage {
    /// No page has been requested yet
    #[default]
    NotLoaded,
    /// The last initial load matched zero records
    NoMatches,
    /// A page of records is displayed
    Page(Page),
}

impl CurrentPage {
    /// The displayed page, if one is loaded
    pub fn page(&self) -> Option<&Page> {
        match self {
            Self::Page(page) => Some(page),
            _ => None,
        }
    }

    /// Whether a load has completed, matching or not
    pub fn loaded(&self) -> bool {
        !matches!(self, Self::NotLoaded)
    }
}

// ============================================================================
// Pager State
// ============================================================================

/// All mutable session state, owned by the pager
///
/// Mutated only by navigation operations, and only after their query has
/// fully succeeded; a failed query leaves this exactly as it was.
#[derive(Debug, Clone, Default)]
pub struct PagerState {
    /// Currently displayed page
    pub(crate) current: CurrentPage,
    /// First-record markers of every page visited forward
    pub(crate) history: CursorHistory,
    /// Keyword filter in effect
    pub(crate) filter: Option<String>,
}

impl PagerState {
    /// Currently displayed page
    pub fn current(&self) -> &CurrentPage {
        &self.current
    }

    /// Visited-page marker history
    pub fn history(&self) -> &CursorHistory {
        &self.history
    }

    /// Keyword filter in effect
    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }
}

// ============================================================================
// Page View
// ============================================================================

/// What a caller renders after a navigation operation
///
/// There is deliberately no `can_go_forward`: whether a next page exists is
/// unknowable without issuing the query, so forward navigation is probed,
/// never predicted.
#[derive(Debug, Clone)]
pub struct PageView {
    /// Records of the current page, in order; empty when nothing matched
    pub items: Vec<JsonValue>,
    /// Whether a previous page exists in the history
    pub can_go_back: bool,
}

// ============================================================================
// Turn
// ============================================================================

/// Outcome of a page-turn operation
#[derive(Debug, Clone)]
pub enum Turn {
    /// Moved to a page
    Page(PageView),
    /// `load_next` found no subsequent records; the last page stays displayed.
    /// Not an error: the caller disables forward navigation.
    NoMoreData,
    /// `load_previous` was called with no earlier page in history. A no-op.
    AtFirstPage,
}

impl Turn {
    /// The new view, if the turn moved
    pub fn page(&self) -> Option<&PageView> {
        match self {
            Self::Page(view) => Some(view),
            _ => None,
        }
    }

    /// Consume into the new view, if the turn moved
    pub fn into_page(self) -> Option<PageView> {
        match self {
            Self::Page(view) => Some(view),
            _ => None,
        }
    }

    /// Check if this is a moved turn
    pub fn is_page(&self) -> bool {
        matches!(self, Self::Page(_))
    }

    /// Check if this is the end-of-data signal
    pub fn is_no_more_data(&self) -> bool {
        matches!(self, Self::NoMoreData)
    }

    /// Check if this is the first-page floor signal
    pub fn is_at_first_page(&self) -> bool {
        matches!(self, Self::AtFirstPage)
    }
}
