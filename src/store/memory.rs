//! In-memory document store
//!
//! Backs tests and demos. Holds one collection of JSON documents, sorts on
//! the configured ordering field with an identifier tie-break, and mints
//! identifier-based markers. The token format is private to this store;
//! callers treat it as opaque, like any other store's.

use super::types::{CheckResult, DocumentStore, Hit};
use crate::error::{Error, Result};
use crate::query::{Marker, PageLimit, QueryDescriptor, Seek};
use crate::types::{JsonValue, SortDirection};
use async_trait::async_trait;
use std::cmp::Ordering;
use tokio::sync::RwLock;

/// In-memory ordered document store
#[derive(Debug)]
pub struct MemoryStore {
    /// Collection name this store answers for
    collection: String,
    /// Field holding the stable identifier
    id_field: String,
    /// Field holding the searchable tag array
    tags_field: String,
    /// Documents, unordered; sorted per query
    docs: RwLock<Vec<JsonValue>>,
}

impl MemoryStore {
    /// Create an empty store for one collection
    pub fn new(
        collection: impl Into<String>,
        id_field: impl Into<String>,
        tags_field: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            id_field: id_field.into(),
            tags_field: tags_field.into(),
            docs: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-seeded with documents
    pub async fn with_documents(
        collection: impl Into<String>,
        id_field: impl Into<String>,
        tags_field: impl Into<String>,
        docs: Vec<JsonValue>,
    ) -> Result<Self> {
        let store = Self::new(collection, id_field, tags_field);
        for doc in docs {
            store.insert(doc).await?;
        }
        Ok(store)
    }

    /// Insert a document
    ///
    /// The document must carry a string or numeric identifier field; the
    /// ordering field may be anything comparable.
    pub async fn insert(&self, doc: JsonValue) -> Result<()> {
        if field_token(&doc, &self.id_field).is_none() {
            return Err(Error::store(format!(
                "document missing identifier field '{}'",
                self.id_field
            )));
        }
        self.docs.write().await.push(doc);
        Ok(())
    }

    /// Remove the document whose identifier renders to `id`
    ///
    /// Returns true if a document was removed. Used to simulate records
    /// deleted behind a browsing session.
    pub async fn remove(&self, id: &str) -> bool {
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|doc| field_token(doc, &self.id_field).as_deref() != Some(id));
        docs.len() < before
    }

    /// Number of documents in the store
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Whether the store holds no documents
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }

    /// Sorted, filtered view of the collection for one query
    fn ordered_view(&self, docs: &[JsonValue], query: &QueryDescriptor) -> Vec<JsonValue> {
        let mut view: Vec<JsonValue> = docs
            .iter()
            .filter(|doc| match &query.filter {
                Some(keyword) => tags_contain(doc, &self.tags_field, keyword),
                None => true,
            })
            .cloned()
            .collect();

        let order_field = query.order.field.clone();
        let id_field = self.id_field.clone();
        view.sort_by(|a, b| {
            compare_values(field_or_null(a, &order_field), field_or_null(b, &order_field))
                .then_with(|| {
                    compare_values(field_or_null(a, &id_field), field_or_null(b, &id_field))
                })
        });

        if query.order.direction == SortDirection::Desc {
            view.reverse();
        }

        view
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn execute(&self, query: &QueryDescriptor) -> Result<Vec<Hit>> {
        if query.collection != self.collection {
            return Err(Error::store(format!(
                "unknown collection '{}'",
                query.collection
            )));
        }
        query.check_seek_scope()?;

        let docs = self.docs.read().await;
        let view = self.ordered_view(&docs, query);
        drop(docs);

        // Resolve the seek anchor to a slice start. A missing anchor yields an
        // empty result: for seek-at, the caller surfaces that as a consistency
        // fault; for seek-after it is indistinguishable from the end of data.
        let start = match &query.seek {
            Seek::Start => 0,
            Seek::After(marker) => match position_of(&view, &self.id_field, &marker.token) {
                Some(pos) => pos + 1,
                None => view.len(),
            },
            Seek::At(marker) => match position_of(&view, &self.id_field, &marker.token) {
                Some(pos) => pos,
                None => view.len(),
            },
        };

        let scope = query.scope();
        let hits = view
            .into_iter()
            .skip(start)
            .take(match query.limit {
                PageLimit::Limited(size) => size as usize,
                PageLimit::Unbounded => usize::MAX,
            })
            .map(|doc| {
                // insert() guarantees the identifier field is present
                let token = field_token(&doc, &self.id_field).unwrap_or_default();
                Hit::new(doc, Marker::new(token, scope.clone()))
            })
            .collect();

        Ok(hits)
    }

    async fn check(&self) -> Result<CheckResult> {
        Ok(CheckResult::success())
    }
}

/// Render a document field to a marker token, if present and scalar
fn field_token(doc: &JsonValue, field: &str) -> Option<String> {
    match doc.get(field)? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Field value or null for sorting
fn field_or_null<'a>(doc: &'a JsonValue, field: &str) -> &'a JsonValue {
    doc.get(field).unwrap_or(&JsonValue::Null)
}

/// Position of the document whose identifier renders to `token`
fn position_of(view: &[JsonValue], id_field: &str, token: &str) -> Option<usize> {
    view.iter()
        .position(|doc| field_token(doc, id_field).as_deref() == Some(token))
}

/// Match-any keyword test against the document's tag array
fn tags_contain(doc: &JsonValue, tags_field: &str, keyword: &str) -> bool {
    doc.get(tags_field)
        .and_then(JsonValue::as_array)
        .is_some_and(|tags| tags.iter().any(|tag| tag.as_str() == Some(keyword)))
}

/// Total order over scalar JSON values: nulls first, then numbers, then
/// strings, then everything else by rendered form
fn compare_values(a: &JsonValue, b: &JsonValue) -> Ordering {
    match (a, b) {
        (JsonValue::Null, JsonValue::Null) => Ordering::Equal,
        (JsonValue::Null, _) => Ordering::Less,
        (_, JsonValue::Null) => Ordering::Greater,
        (JsonValue::Number(x), JsonValue::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
        (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
        (x, y) => x.to_string().cmp(&y.to_string()),
    }
}
