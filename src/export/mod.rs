//! Bulk export module
//!
//! # Overview
//!
//! Export is a separate, simpler read path than browsing: one unbounded,
//! seek-free query under the current filter and order, materialized in full
//! and projected to a reduced record shape. It deliberately does not stitch
//! together forward-paged reads: a sequence of paged reads over a live
//! store is not guaranteed to equal one unbounded read if records mutate
//! mid-traversal.

mod csv;
mod types;

pub use csv::CsvWriter;
pub use types::{ExportRecord, ExportSpec};

use crate::error::Result;
use crate::pager::normalize_filter;
use crate::query::{QueryDescriptor, SortOrder};
use crate::store::DocumentStore;
use tracing::info;

/// Materializes the full filtered result set for bulk export
#[derive(Debug, Clone)]
pub struct Exporter {
    /// Collection to export
    collection: String,
    /// Sort order of the exported records
    order: SortOrder,
    /// Projection applied to every record
    spec: ExportSpec,
}

impl Exporter {
    /// Create an exporter
    pub fn new(collection: impl Into<String>, order: SortOrder, spec: ExportSpec) -> Self {
        Self {
            collection: collection.into(),
            order,
            spec,
        }
    }

    /// The projection's column names, in output order
    pub fn columns(&self) -> &[String] {
        self.spec.columns()
    }

    /// Materialize every record matching the filter, in order
    ///
    /// Bypasses the cursor history entirely: no page size, no seek.
    pub async fn export_all<S: DocumentStore>(
        &self,
        store: &S,
        filter: Option<&str>,
    ) -> Result<Vec<ExportRecord>> {
        let query = QueryDescriptor::new(self.collection.clone(), self.order.clone())
            .with_filter(normalize_filter(filter));

        let hits = store.execute(&query).await?;
        let records: Vec<ExportRecord> = hits
            .iter()
            .map(|hit| self.spec.project(&hit.record))
            .collect();

        info!(
            records = records.len(),
            filter = filter.unwrap_or(""),
            "materialized export"
        );
        Ok(records)
    }
}
