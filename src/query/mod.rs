//! Query descriptors and seek markers
//!
//! # Overview
//!
//! A [`QueryDescriptor`] is a pure, side-effect-free description of one read
//! against an ordered collection: sort order, optional keyword filter, result
//! limit, and a seek position. Stores execute descriptors; nothing in this
//! module performs I/O.
//!
//! Seeking is marker-based. A [`Marker`] is an opaque, store-issued token
//! anchoring one record's position under one `(order, filter)` pair, its
//! [`MarkerScope`]. Markers must never be re-derived client-side or reused
//! under a different scope; stores reject foreign-scope markers.

mod types;

pub use types::{Marker, MarkerScope, PageLimit, QueryDescriptor, Seek, SortOrder};
