//! Document store module
//!
//! The external collaborator the pagination engine reads from.
//!
//! # Overview
//!
//! A [`DocumentStore`] executes [`QueryDescriptor`](crate::query::QueryDescriptor)s
//! against one ordered collection and returns, for every record, both its
//! field data and an opaque [`Marker`](crate::query::Marker) usable for
//! future seeks. Two implementations ship:
//!
//! - [`MemoryStore`], in-process, for tests and demos
//! - [`HttpStore`], a remote store speaking a JSON query protocol
//!
//! Every implementation must honor the same contract: stable sort on the
//! ordering field with identifier tie-break, match-any keyword filtering
//! against the tag set, limit, and seek-after / seek-at under an equivalent
//! query shape. Markers are only valid under the scope they were issued for;
//! stores reject foreign-scope markers instead of returning store-defined
//! garbage.

mod http;
mod memory;
mod types;

pub use http::HttpStore;
pub use memory::MemoryStore;
pub use types::{CheckResult, DocumentStore, Hit};

#[cfg(test)]
mod tests;
