// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # docstep
//!
//! Cursor-paginated browsing and bulk export for remote ordered document stores.
//!
//! ## Features
//!
//! - **Cursor Pagination**: Forward and backward paging over stores that only
//!   support seek-after/seek-at, never numeric offsets
//! - **Marker History**: Opaque position markers tracked per visited page, so
//!   "go back" is a seek and not offset arithmetic
//! - **Keyword Filtering**: Match-any keyword filter against a record's tag set,
//!   with the marker history scoped to each filter
//! - **Bulk Export**: One unbounded read of the filtered result set, projected
//!   to a reduced shape and writable as CSV
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use docstep::{HttpStore, Pager, PagerConfig, SessionConfig, Turn};
//!
//! #[tokio::main]
//! async fn main() -> docstep::Result<()> {
//!     let session = SessionConfig::from_file("docstep.yaml")?;
//!     let store = HttpStore::from_session(&session)?;
//!
//!     let mut pager = Pager::new(store, session.pager_config()?);
//!     let first = pager.load_initial(None).await?;
//!     println!("{} records", first.items.len());
//!
//!     match pager.load_next().await? {
//!         Turn::Page(view) => println!("next page: {} records", view.items.len()),
//!         Turn::NoMoreData => println!("already on the last page"),
//!         Turn::AtFirstPage => unreachable!("load_next never reports AtFirstPage"),
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Caller / CLI                             │
//! │  load_initial(filter)   load_next()   load_previous()   export  │
//! └───────────────┬──────────────────────────────────┬──────────────┘
//!                 │                                  │
//!         ┌───────┴────────┐                 ┌───────┴───────┐
//!         │     Pager      │                 │   Exporter    │
//!         │ cursor history │                 │ unbounded read│
//!         └───────┬────────┘                 └───────┬───────┘
//!                 │          QueryDescriptor         │
//!                 └───────────────┬──────────────────┘
//!                                 │
//!                     ┌───────────┴───────────┐
//!                     │    DocumentStore      │
//!                     ├───────────┬───────────┤
//!                     │ MemoryStore│ HttpStore│
//!                     └───────────┴───────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Add docs before 1.0 release

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for docstep
pub mod error;

/// Common types and type aliases
pub mod types;

/// Query descriptors, seek markers, and marker scoping
pub mod query;

/// HTTP client with retry and backoff
pub mod http;

/// Document store trait and implementations
pub mod store;

/// Cursor-paginated navigation engine
pub mod pager;

/// Bulk export and CSV output
pub mod export;

/// Session configuration (YAML)
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::SessionConfig;
pub use export::{CsvWriter, ExportRecord, ExportSpec, Exporter};
pub use pager::{CursorHistory, PageView, Pager, PagerConfig, Turn};
pub use query::{Marker, MarkerScope, PageLimit, QueryDescriptor, Seek, SortOrder};
pub use store::{CheckResult, DocumentStore, Hit, HttpStore, MemoryStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
