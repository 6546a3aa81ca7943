//! Query descriptor types
//!
//! Defines the abstract query shape shared by every store implementation.

use crate::types::SortDirection;
use serde::{Deserialize, Serialize};

// ============================================================================
// Sort Order
// ============================================================================

/// Sort order for a query: one ordering field plus a direction
///
/// The ordering field must be effectively unique across the collection
/// (e.g., a creation timestamp with an identifier tie-break) or paging is
/// not stable. That uniqueness is a property of the data feeding the store,
/// not something the engine can enforce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    /// Field the collection is ordered by
    pub field: String,
    /// Ascending or descending
    pub direction: SortDirection,
}

impl SortOrder {
    /// Create a sort order
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Ascending order on the given field
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Descending order on the given field
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }
}

// ============================================================================
// Marker Scope
// ============================================================================

/// The `(collection, order, filter)` pair a marker was issued under
///
/// A marker anchors a position in one specific ordered, filtered view of a
/// collection. Using it to seek a query with a different scope is a caller
/// error and is rejected by stores rather than silently tolerated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerScope {
    /// Collection the query ran against
    pub collection: String,
    /// Sort order the results were cut under
    pub order: SortOrder,
    /// Keyword filter in effect, if any
    pub filter: Option<String>,
}

impl std::fmt::Display for MarkerScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{} {}",
            self.collection, self.order.field, self.order.direction
        )?;
        if let Some(filter) = &self.filter {
            write!(f, " filter={filter}")?;
        }
        Ok(())
    }
}

// ============================================================================
// Marker
// ============================================================================

/// Opaque position marker issued by a store
///
/// The token uniquely identifies a record's position under the marker's
/// scope. It is compared by identity only; the engine never parses it or
/// rebuilds it from field values, because the store's internal ordering
/// representation cannot be reconstructed client-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Store-defined opaque token
    pub token: String,
    /// Scope the token was issued under
    pub scope: MarkerScope,
}

impl Marker {
    /// Create a marker from a store-issued token and the issuing query's scope
    pub fn new(token: impl Into<String>, scope: MarkerScope) -> Self {
        Self {
            token: token.into(),
            scope,
        }
    }
}

// ============================================================================
// Seek
// ============================================================================

/// Where a query starts in the sort order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Seek {
    /// Start from the extreme end of the order (the first page)
    #[default]
    Start,
    /// Strictly after the marker's record, excluding it
    After(Marker),
    /// At the marker's record, including it (redisplays a seen page exactly)
    At(Marker),
}

impl Seek {
    /// The marker this seek is anchored on, if any
    pub fn marker(&self) -> Option<&Marker> {
        match self {
            Self::Start => None,
            Self::After(marker) | Self::At(marker) => Some(marker),
        }
    }
}

// ============================================================================
// Page Limit
// ============================================================================

/// Result-size limit for a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLimit {
    /// At most this many records; always positive
    Limited(u32),
    /// No limit; used by bulk export
    Unbounded,
}

impl PageLimit {
    /// A positive page limit
    ///
    /// A zero limit is a programming error, not a runtime condition.
    pub fn limited(size: u32) -> Self {
        debug_assert!(size > 0, "page limit must be positive");
        Self::Limited(size)
    }

    /// Numeric limit, if bounded
    pub fn as_u32(self) -> Option<u32> {
        match self {
            Self::Limited(size) => Some(size),
            Self::Unbounded => None,
        }
    }
}

// ============================================================================
// Query Descriptor
// ============================================================================

/// Abstract description of one read against an ordered collection
///
/// Construction is pure data assembly with no side effects and no runtime
/// errors. The descriptor carries everything a store needs: what to read,
/// how it is ordered, how it is filtered, how many records, and from where.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryDescriptor {
    /// Collection to read
    pub collection: String,
    /// Optional match-any keyword against the record's tag set
    pub filter: Option<String>,
    /// Sort order; must match the order pages are cut under
    pub order: SortOrder,
    /// Result-size limit
    pub limit: PageLimit,
    /// Seek position
    pub seek: Seek,
}

impl QueryDescriptor {
    /// Create an unbounded, unfiltered query starting at the top of the order
    pub fn new(collection: impl Into<String>, order: SortOrder) -> Self {
        Self {
            collection: collection.into(),
            filter: None,
            order,
            limit: PageLimit::Unbounded,
            seek: Seek::Start,
        }
    }

    /// Set the keyword filter
    #[must_use]
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter;
        self
    }

    /// Set the result-size limit
    #[must_use]
    pub fn with_limit(mut self, limit: PageLimit) -> Self {
        self.limit = limit;
        self
    }

    /// Set the seek position
    #[must_use]
    pub fn with_seek(mut self, seek: Seek) -> Self {
        self.seek = seek;
        self
    }

    /// The scope markers issued for this query's results must carry, and the
    /// scope any seek marker is checked against
    pub fn scope(&self) -> MarkerScope {
        MarkerScope {
            collection: self.collection.clone(),
            order: self.order.clone(),
            filter: self.filter.clone(),
        }
    }

    /// Verify that the seek marker (if any) was issued under this query's
    /// scope
    pub fn check_seek_scope(&self) -> crate::Result<()> {
        if let Some(marker) = self.seek.marker() {
            let scope = self.scope();
            if marker.scope != scope {
                return Err(crate::Error::marker_scope(format!(
                    "marker issued under ({}) used to seek ({})",
                    marker.scope, scope
                )));
            }
        }
        Ok(())
    }
}
