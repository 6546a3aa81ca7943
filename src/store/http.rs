//! HTTP-backed document store
//!
//! Speaks a JSON query protocol against a remote ordered document store:
//!
//! ```text
//! POST {base}/collections/{collection}:query
//! { "orderBy": "id", "direction": "asc", "limit": 10,
//!   "where": { "field": "keywords", "op": "array-contains-any", "values": ["vip"] },
//!   "startAfter": "<token>" }
//! ```
//!
//! The response carries each document's fields plus the store's opaque
//! position token:
//!
//! ```text
//! { "documents": [ { "fields": { ... }, "marker": "<token>" }, ... ] }
//! ```
//!
//! Tokens come back scope-free on the wire; this store tags each one with
//! the issuing query's scope before handing it to the engine, so cross-scope
//! reuse is caught client-side before a request ever goes out.

use super::types::{CheckResult, DocumentStore, Hit};
use crate::config::SessionConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::query::{Marker, PageLimit, QueryDescriptor, Seek};
use crate::types::JsonValue;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

/// One document on the wire
#[derive(Debug, Deserialize)]
struct WireDocument {
    /// Field data
    fields: JsonValue,
    /// Opaque position token
    marker: String,
}

/// Query response envelope
#[derive(Debug, Deserialize)]
struct QueryResponse {
    documents: Vec<WireDocument>,
}

/// HTTP-backed ordered document store
#[derive(Debug)]
pub struct HttpStore {
    client: HttpClient,
    /// Field holding the searchable tag array, named in the wire filter
    tags_field: String,
}

impl HttpStore {
    /// Create a store over an existing client
    pub fn new(client: HttpClient, tags_field: impl Into<String>) -> Self {
        Self {
            client,
            tags_field: tags_field.into(),
        }
    }

    /// Create a store from a session configuration
    pub fn from_session(session: &SessionConfig) -> Result<Self> {
        let mut builder = HttpClientConfig::builder().base_url(&session.store.base_url);
        for (key, value) in &session.store.headers {
            builder = builder.header(key, value);
        }
        let client = HttpClient::with_config(builder.build());
        Ok(Self::new(client, &session.tags_field))
    }

    /// Wire form of a query descriptor
    fn wire_body(&self, query: &QueryDescriptor) -> JsonValue {
        let mut body = json!({
            "orderBy": query.order.field,
            "direction": query.order.direction.as_str(),
        });

        if let PageLimit::Limited(size) = query.limit {
            body["limit"] = json!(size);
        }

        if let Some(keyword) = &query.filter {
            body["where"] = json!({
                "field": self.tags_field,
                "op": "array-contains-any",
                "values": [keyword],
            });
        }

        match &query.seek {
            Seek::Start => {}
            Seek::After(marker) => body["startAfter"] = json!(marker.token),
            Seek::At(marker) => body["startAt"] = json!(marker.token),
        }

        body
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn execute(&self, query: &QueryDescriptor) -> Result<Vec<Hit>> {
        query.check_seek_scope()?;

        let path = format!("/collections/{}:query", query.collection);
        let body = self.wire_body(query);

        debug!(collection = %query.collection, "executing remote query");
        let response: QueryResponse = self.client.post_json(&path, body).await?;

        let scope = query.scope();
        let hits = response
            .documents
            .into_iter()
            .map(|doc| {
                if doc.marker.is_empty() {
                    return Err(Error::store("store returned a document without a marker"));
                }
                Ok(Hit::new(doc.fields, Marker::new(doc.marker, scope.clone())))
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(hits = hits.len(), "remote query returned");
        Ok(hits)
    }

    async fn check(&self) -> Result<CheckResult> {
        match self.client.get("/healthz").await {
            Ok(_) => Ok(CheckResult::success()),
            Err(e) => Ok(CheckResult::failure(e.to_string())),
        }
    }
}
