//! Tests for the store module

use super::*;
use crate::query::{PageLimit, QueryDescriptor, Seek, SortOrder};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn member(id: u64, name: &str, tags: &[&str]) -> serde_json::Value {
    json!({
        "docId": format!("doc-{id:02}"),
        "id": id,
        "name": name,
        "age": 20 + id,
        "address": format!("{id} Elm Street"),
        "createdAt": { "seconds": 1_700_000_000 + id },
        "keywords": tags,
    })
}

async fn seeded_store(count: u64) -> MemoryStore {
    let docs = (1..=count)
        .map(|id| {
            let tags: &[&str] = if id % 3 == 0 { &["vip"] } else { &["member"] };
            member(id, &format!("member-{id}"), tags)
        })
        .collect();
    MemoryStore::with_documents("members", "id", "keywords", docs)
        .await
        .unwrap()
}

fn members_query() -> QueryDescriptor {
    QueryDescriptor::new("members", SortOrder::asc("id"))
}

fn ids(hits: &[Hit]) -> Vec<u64> {
    hits.iter()
        .map(|hit| hit.record["id"].as_u64().unwrap())
        .collect()
}

// ============================================================================
// MemoryStore Tests
// ============================================================================

#[tokio::test]
async fn test_memory_store_orders_ascending() {
    let store = seeded_store(5).await;
    let hits = store.execute(&members_query()).await.unwrap();
    assert_eq!(ids(&hits), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_memory_store_orders_descending() {
    let store = seeded_store(5).await;
    let query = QueryDescriptor::new("members", SortOrder::desc("id"));
    let hits = store.execute(&query).await.unwrap();
    assert_eq!(ids(&hits), vec![5, 4, 3, 2, 1]);
}

#[tokio::test]
async fn test_memory_store_ties_broken_by_identifier() {
    let store = MemoryStore::new("members", "docId", "keywords");
    store
        .insert(json!({"docId": "b", "rank": 1, "keywords": []}))
        .await
        .unwrap();
    store
        .insert(json!({"docId": "a", "rank": 1, "keywords": []}))
        .await
        .unwrap();

    let query = QueryDescriptor::new("members", SortOrder::asc("rank"));
    let hits = store.execute(&query).await.unwrap();
    let doc_ids: Vec<&str> = hits
        .iter()
        .map(|hit| hit.record["docId"].as_str().unwrap())
        .collect();
    assert_eq!(doc_ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_memory_store_limit() {
    let store = seeded_store(25).await;
    let query = members_query().with_limit(PageLimit::limited(10));
    let hits = store.execute(&query).await.unwrap();
    assert_eq!(ids(&hits), (1..=10).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_memory_store_filter_match_any() {
    let store = seeded_store(10).await;
    let query = members_query().with_filter(Some("vip".to_string()));
    let hits = store.execute(&query).await.unwrap();
    assert_eq!(ids(&hits), vec![3, 6, 9]);
}

#[tokio::test]
async fn test_memory_store_filter_no_matches() {
    let store = seeded_store(10).await;
    let query = members_query().with_filter(Some("nobody".to_string()));
    let hits = store.execute(&query).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_memory_store_seek_start_is_first_page() {
    let store = seeded_store(10).await;
    let query = members_query()
        .with_limit(PageLimit::limited(3))
        .with_seek(Seek::Start);
    let hits = store.execute(&query).await.unwrap();
    assert_eq!(ids(&hits), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_memory_store_seek_after_excludes_anchor() {
    let store = seeded_store(10).await;
    let first = store
        .execute(&members_query().with_limit(PageLimit::limited(3)))
        .await
        .unwrap();
    let anchor = first.last().unwrap().marker.clone();

    let query = members_query()
        .with_limit(PageLimit::limited(3))
        .with_seek(Seek::After(anchor));
    let hits = store.execute(&query).await.unwrap();
    assert_eq!(ids(&hits), vec![4, 5, 6]);
}

#[tokio::test]
async fn test_memory_store_seek_at_includes_anchor() {
    let store = seeded_store(10).await;
    let first = store
        .execute(&members_query().with_limit(PageLimit::limited(3)))
        .await
        .unwrap();
    let anchor = first.first().unwrap().marker.clone();

    let query = members_query()
        .with_limit(PageLimit::limited(3))
        .with_seek(Seek::At(anchor));
    let hits = store.execute(&query).await.unwrap();
    assert_eq!(ids(&hits), vec![1, 2, 3]);
}

#[tokio::test]
async fn test_memory_store_seek_past_end_is_empty() {
    let store = seeded_store(5).await;
    let all = store.execute(&members_query()).await.unwrap();
    let last = all.last().unwrap().marker.clone();

    let query = members_query().with_seek(Seek::After(last));
    let hits = store.execute(&query).await.unwrap();
    assert!(hits.is_empty());
}

#[tokio::test]
async fn test_memory_store_rejects_foreign_scope_marker() {
    let store = seeded_store(10).await;
    let filtered = members_query().with_filter(Some("vip".to_string()));
    let hits = store.execute(&filtered).await.unwrap();
    let marker = hits.first().unwrap().marker.clone();

    // Marker was issued under the "vip" filter; reuse it without the filter.
    let query = members_query().with_seek(Seek::After(marker));
    let err = store.execute(&query).await.unwrap_err();
    assert!(matches!(err, crate::Error::MarkerScope { .. }));
}

#[tokio::test]
async fn test_memory_store_rejects_unknown_collection() {
    let store = seeded_store(3).await;
    let query = QueryDescriptor::new("orders", SortOrder::asc("id"));
    let err = store.execute(&query).await.unwrap_err();
    assert!(matches!(err, crate::Error::Store { .. }));
}

#[tokio::test]
async fn test_memory_store_insert_requires_identifier() {
    let store = MemoryStore::new("members", "id", "keywords");
    let err = store.insert(json!({"name": "nameless"})).await.unwrap_err();
    assert!(matches!(err, crate::Error::Store { .. }));
}

#[tokio::test]
async fn test_memory_store_remove() {
    let store = seeded_store(3).await;
    assert!(store.remove("2").await);
    assert!(!store.remove("2").await);
    assert_eq!(store.len().await, 2);

    let hits = store.execute(&members_query()).await.unwrap();
    assert_eq!(ids(&hits), vec![1, 3]);
}

#[tokio::test]
async fn test_memory_store_removed_anchor_yields_empty() {
    let store = seeded_store(5).await;
    let all = store.execute(&members_query()).await.unwrap();
    let anchor = all[1].marker.clone();

    store.remove(&anchor.token).await;

    let query = members_query().with_seek(Seek::At(anchor));
    let hits = store.execute(&query).await.unwrap();
    assert!(hits.is_empty());
}

// ============================================================================
// HttpStore Tests
// ============================================================================

fn wire_doc(id: u64) -> serde_json::Value {
    json!({
        "fields": { "id": id, "name": format!("member-{id}") },
        "marker": format!("tok-{id}"),
    })
}

async fn http_store(server: &MockServer) -> HttpStore {
    let config = crate::http::HttpClientConfig::builder()
        .base_url(server.uri())
        .build();
    HttpStore::new(crate::http::HttpClient::with_config(config), "keywords")
}

#[tokio::test]
async fn test_http_store_query_wire_shape() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/members:query"))
        .and(body_partial_json(json!({
            "orderBy": "id",
            "direction": "asc",
            "limit": 2,
            "where": {
                "field": "keywords",
                "op": "array-contains-any",
                "values": ["vip"],
            },
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [wire_doc(3), wire_doc(9)],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = http_store(&mock_server).await;
    let query = members_query()
        .with_filter(Some("vip".to_string()))
        .with_limit(PageLimit::limited(2));

    let hits = store.execute(&query).await.unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].record["id"], 3);
    assert_eq!(hits[0].marker.token, "tok-3");
    assert_eq!(hits[0].marker.scope, query.scope());
}

#[tokio::test]
async fn test_http_store_sends_seek_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/members:query"))
        .and(body_partial_json(json!({"startAfter": "tok-10"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [wire_doc(11)],
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let store = http_store(&mock_server).await;
    let base = members_query().with_limit(PageLimit::limited(10));
    let marker = crate::query::Marker::new("tok-10", base.scope());

    let hits = store
        .execute(&base.with_seek(Seek::After(marker)))
        .await
        .unwrap();
    assert_eq!(hits[0].marker.token, "tok-11");
}

#[tokio::test]
async fn test_http_store_rejects_foreign_scope_before_sending() {
    let mock_server = MockServer::start().await;
    // No mock mounted: a request would fail the test with a connect error
    // instead of the expected scope error.

    let store = http_store(&mock_server).await;
    let filtered = members_query().with_filter(Some("vip".to_string()));
    let marker = crate::query::Marker::new("tok-3", filtered.scope());

    let query = members_query().with_seek(Seek::At(marker));
    let err = store.execute(&query).await.unwrap_err();
    assert!(matches!(err, crate::Error::MarkerScope { .. }));
}

#[tokio::test]
async fn test_http_store_missing_marker_is_store_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/collections/members:query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [{ "fields": {"id": 1}, "marker": "" }],
        })))
        .mount(&mock_server)
        .await;

    let store = http_store(&mock_server).await;
    let err = store.execute(&members_query()).await.unwrap_err();
    assert!(matches!(err, crate::Error::Store { .. }));
}

#[tokio::test]
async fn test_http_store_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let store = http_store(&mock_server).await;
    let result = store.check().await.unwrap();
    assert!(result.success);
}

#[tokio::test]
async fn test_http_store_check_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/healthz"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let config = crate::http::HttpClientConfig::builder()
        .base_url(mock_server.uri())
        .max_retries(0)
        .build();
    let store = HttpStore::new(crate::http::HttpClient::with_config(config), "keywords");

    let result = store.check().await.unwrap();
    assert!(!result.success);
    assert!(result.message.unwrap().contains("503"));
}

#[test]
fn test_check_result_constructors() {
    assert!(CheckResult::success().success);
    let failure = CheckResult::failure("unreachable");
    assert!(!failure.success);
    assert_eq!(failure.message.as_deref(), Some("unreachable"));
}
