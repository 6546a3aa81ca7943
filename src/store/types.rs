//! Document store trait and result types

use crate::error::Result;
use crate::query::{Marker, QueryDescriptor};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

// ============================================================================
// Hit
// ============================================================================

/// One record returned by a store query: field data plus the opaque marker
/// anchoring its position for future seeks
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// The record's field data
    pub record: JsonValue,
    /// Marker for this record under the issuing query's scope
    pub marker: Marker,
}

impl Hit {
    /// Create a hit
    pub fn new(record: JsonValue, marker: Marker) -> Self {
        Self { record, marker }
    }
}

// ============================================================================
// Check Result
// ============================================================================

/// Result of a store connectivity check
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether the check succeeded
    pub success: bool,

    /// Error message if failed
    pub message: Option<String>,
}

impl CheckResult {
    /// Create a successful check result
    pub fn success() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    /// Create a failed check result
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// Document Store
// ============================================================================

/// An ordered-collection query capability
///
/// Implementations must support: ascending/descending sort on one field,
/// an optional match-any keyword filter over the record's tag set, a
/// result-size limit, and seeking strictly-after or at-and-after a marker
/// issued under an equivalent query shape. Results come back in query order,
/// each with a marker for future seeks.
///
/// One request is outstanding at a time from any single pager; stores do not
/// need to serialize concurrent calls themselves, though both shipped
/// implementations happen to be safe under them.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Execute a query and return the matching records in order
    async fn execute(&self, query: &QueryDescriptor) -> Result<Vec<Hit>>;

    /// Probe connectivity to the store
    async fn check(&self) -> Result<CheckResult>;
}
