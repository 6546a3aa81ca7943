//! Cursor-paginated navigation engine
//!
//! # Overview
//!
//! The [`Pager`] steps forward and backward through fixed-size pages of an
//! ordered collection without numeric offsets: the backing store only knows
//! how to seek relative to an opaque marker. Forward motion records each
//! page's first-record marker in a [`CursorHistory`]; backward motion seeks
//! the marker two entries from the top and pops.
//!
//! State changes commit only after a query has fully succeeded, so any
//! transport failure leaves the pager exactly where it was and the same call
//! can be retried safely.
//!
//! Operations take `&mut self`: the borrow checker itself enforces the
//! one-outstanding-request discipline. Two in-flight navigations against one
//! pager cannot be expressed, which is what rules out the double-push and
//! pop-under-push races on the marker stack.

mod history;
mod types;

pub use history::CursorHistory;
pub use types::{CurrentPage, Page, PageView, PagerConfig, PagerState, Turn};

use crate::error::{Error, Result};
use crate::query::{PageLimit, QueryDescriptor, Seek};
use crate::store::DocumentStore;
use crate::types::JsonValue;
use tracing::debug;

/// Cursor-paginated navigator over one collection of one store
pub struct Pager<S: DocumentStore> {
    store: S,
    config: PagerConfig,
    state: PagerState,
}

impl<S: DocumentStore> Pager<S> {
    /// Create a pager; nothing is loaded until [`load_initial`](Self::load_initial)
    pub fn new(store: S, config: PagerConfig) -> Self {
        Self {
            store,
            config,
            state: PagerState::default(),
        }
    }

    /// The underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The session configuration
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// The keyword filter in effect
    pub fn filter(&self) -> Option<&str> {
        self.state.filter()
    }

    /// Read-only view of the session state
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    /// Number of pages visited forward from the first
    pub fn history_depth(&self) -> usize {
        self.state.history.len()
    }

    /// Whether a previous page exists in the history
    pub fn can_go_back(&self) -> bool {
        self.state.history.len() > 1
    }

    /// Records of the currently displayed page
    pub fn current_items(&self) -> &[JsonValue] {
        self.state
            .current
            .page()
            .map(|page| page.items.as_slice())
            .unwrap_or_default()
    }

    /// Render the current state for a caller
    pub fn view(&self) -> PageView {
        PageView {
            items: self.current_items().to_vec(),
            can_go_back: self.can_go_back(),
        }
    }

    /// Load the first page under a filter, discarding any prior session
    ///
    /// An empty result is a valid outcome: the pager ends up displaying
    /// zero records with an empty history, meaning "no matches" rather than
    /// "not yet searched".
    pub async fn load_initial(&mut self, filter: Option<&str>) -> Result<PageView> {
        let filter = normalize_filter(filter);
        let query = self
            .page_query(filter.clone())
            .with_seek(Seek::Start);

        let hits = self.store.execute(&query).await?;

        // Markers recorded so far were scoped to the previous filter; they
        // are unusable now regardless of whether anything matched.
        self.state.history.reset();
        self.state.filter = filter;

        match Page::from_hits(hits) {
            Some(page) => {
                debug!(
                    records = page.len(),
                    filter = self.state.filter.as_deref().unwrap_or(""),
                    "loaded first page"
                );
                self.state.history.push(page.first.clone());
                self.state.current = CurrentPage::Page(page);
            }
            None => {
                debug!(
                    filter = self.state.filter.as_deref().unwrap_or(""),
                    "initial load matched nothing"
                );
                self.state.current = CurrentPage::NoMatches;
            }
        }

        Ok(self.view())
    }

    /// Advance to the next page
    ///
    /// Returns [`Turn::NoMoreData`] when the last page is already displayed;
    /// state is untouched, so repeated calls at the end are idempotent.
    /// Calling this before any load, or with zero matches displayed, is the
    /// same no-op.
    pub async fn load_next(&mut self) -> Result<Turn> {
        let Some(last) = self.state.current.page().map(|page| page.last.clone()) else {
            return Ok(Turn::NoMoreData);
        };

        let query = self
            .page_query(self.state.filter.clone())
            .with_seek(Seek::After(last));

        let hits = self.store.execute(&query).await?;

        match Page::from_hits(hits) {
            Some(page) => {
                self.state.history.push(page.first.clone());
                self.state.current = CurrentPage::Page(page);
                debug!(depth = self.state.history.len(), "advanced a page");
                Ok(Turn::Page(self.view()))
            }
            None => {
                debug!(depth = self.state.history.len(), "no further pages");
                Ok(Turn::NoMoreData)
            }
        }
    }

    /// Step back to the previous page
    ///
    /// Returns [`Turn::AtFirstPage`] when the history holds no earlier page.
    /// If the recorded marker resolves to nothing, the store and the history
    /// disagree (likely a record deleted behind the session) and the
    /// operation fails with [`Error::Consistency`] without touching state;
    /// the documented recovery is a fresh [`load_initial`](Self::load_initial).
    pub async fn load_previous(&mut self) -> Result<Turn> {
        let Some(target) = self.state.history.peek_back().cloned() else {
            return Ok(Turn::AtFirstPage);
        };

        let query = self
            .page_query(self.state.filter.clone())
            .with_seek(Seek::At(target));

        let hits = self.store.execute(&query).await?;

        match Page::from_hits(hits) {
            Some(page) => {
                self.state.history.pop();
                self.state.current = CurrentPage::Page(page);
                debug!(depth = self.state.history.len(), "stepped back a page");
                Ok(Turn::Page(self.view()))
            }
            None => Err(Error::consistency(
                "recorded back-marker resolves to no records; reload from the start",
            )),
        }
    }

    /// Change the keyword filter
    ///
    /// A changed filter restarts the session: the history is discarded (its
    /// markers cannot seek under the new filter) and the first page loads
    /// fresh. An unchanged filter on a live session is a no-op returning the
    /// current view.
    pub async fn set_filter(&mut self, filter: Option<&str>) -> Result<PageView> {
        let normalized = normalize_filter(filter);
        if self.state.current.loaded() && normalized == self.state.filter {
            return Ok(self.view());
        }
        self.load_initial(normalized.as_deref()).await
    }

    /// Drop the keyword filter
    pub async fn clear_filter(&mut self) -> Result<PageView> {
        self.set_filter(None).await
    }

    /// Query shape shared by every navigation under the current config
    fn page_query(&self, filter: Option<String>) -> QueryDescriptor {
        QueryDescriptor::new(self.config.collection.clone(), self.config.order.clone())
            .with_filter(filter)
            .with_limit(PageLimit::limited(self.config.page_size()))
    }
}

impl<S: DocumentStore> std::fmt::Debug for Pager<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pager")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Trim the filter; an empty or whitespace keyword means "no filter"
pub(crate) fn normalize_filter(filter: Option<&str>) -> Option<String> {
    match filter {
        Some(keyword) => {
            let keyword = keyword.trim();
            if keyword.is_empty() {
                None
            } else {
                Some(keyword.to_string())
            }
        }
        None => None,
    }
}
