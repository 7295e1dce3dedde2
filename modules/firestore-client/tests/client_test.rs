//! REST round trips against a mock Firestore endpoint.

use firestore_client::{FirestoreClient, FirestoreError, Write, DEFAULT_DATABASE};
use serde_json::{json, Value as JsonValue};
use wiremock::matchers::{body_json, header, method, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn emulator_client(server: &MockServer) -> FirestoreClient {
    FirestoreClient::emulator(&server.address().to_string(), "p", DEFAULT_DATABASE)
}

fn doc(collection: &str, id: &str) -> JsonValue {
    json!({
        "name": format!("projects/p/databases/(default)/documents/{collection}/{id}"),
        "fields": { "risk_name": { "stringValue": format!("Risk {id}") } }
    })
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_follows_page_tokens_until_exhausted() {
    let server = MockServer::start().await;

    // Mounted first so it wins for the follow-up request.
    Mock::given(method("GET"))
        .and(path_regex(r"/documents/risks$"))
        .and(query_param("pageToken", "page-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [doc("risks", "R03")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"/documents/risks$"))
        .and(query_param("pageSize", "300"))
        .and(header("authorization", "Bearer owner"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [doc("risks", "R01"), doc("risks", "R02")],
            "nextPageToken": "page-2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let documents = emulator_client(&server).list_documents("risks").await.unwrap();
    let ids: Vec<&str> = documents.iter().map(|d| d.id()).collect();
    assert_eq!(ids, vec!["R01", "R02", "R03"]);
}

#[tokio::test]
async fn empty_collection_lists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"/documents/solutions$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let documents = emulator_client(&server)
        .list_documents("solutions")
        .await
        .unwrap();
    assert!(documents.is_empty());
}

#[tokio::test]
async fn non_success_status_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_string("PERMISSION_DENIED"))
        .mount(&server)
        .await;

    let err = emulator_client(&server)
        .list_documents("risks")
        .await
        .unwrap_err();
    match err {
        FirestoreError::Api { status, message } => {
            assert_eq!(status, 403);
            assert!(message.contains("PERMISSION_DENIED"));
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn api_key_travels_as_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(query_param("key", "web-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = FirestoreClient::new(&format!("{}/v1", server.uri()), "p", DEFAULT_DATABASE)
        .with_api_key("web-key".to_string());
    client.list_documents("risks").await.unwrap();
}

// ---------------------------------------------------------------------------
// Commit
// ---------------------------------------------------------------------------

#[tokio::test]
async fn commit_posts_writes() {
    let server = MockServer::start().await;
    let client = emulator_client(&server);
    let name = client.document_name("risks", "R01");

    Mock::given(method("POST"))
        .and(path_regex(r"/documents:commit$"))
        .and(body_json(json!({ "writes": [{ "delete": name.clone() }] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "writeResults": [{}],
            "commitTime": "2026-01-01T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client.commit(&[Write::Delete(name)]).await.unwrap();
    assert_eq!(response.write_results.len(), 1);
    assert_eq!(response.commit_time.as_deref(), Some("2026-01-01T00:00:00Z"));
}

#[tokio::test]
async fn empty_commit_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    emulator_client(&server).commit(&[]).await.unwrap();
}
