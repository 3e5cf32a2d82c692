//! Convenience wrappers against a mock API server.
//!
//! These tests use wiremock to stand in for the vidcast REST API.

use std::time::Duration;

use serde_json::json;
use vidcast_admin::prelude::*;
use wiremock::matchers::{body_json, body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::builder()
        .base_url(&server.uri())
        .unwrap()
        .retry_delay(Duration::from_millis(10))
        .build()
        .unwrap()
}

#[tokio::test]
async fn get_decodes_json_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/videos"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"videos": [{"id": 1}]}))
                .insert_header("Content-Type", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let value = client.get(&client.endpoints().videos().list()).await.unwrap();
    assert_eq!(value["videos"], json!([{"id": 1}]));
}

#[tokio::test]
async fn get_returns_text_for_non_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("healthy"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let value = client.get(&client.endpoints().system().health()).await.unwrap();
    assert_eq!(value, json!("healthy"));
}

#[tokio::test]
async fn post_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/playlists"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"title": "Lobby", "is_active": true})))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": 5, "title": "Lobby", "is_active": true}))
                .insert_header("Content-Type", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let created = client
        .post(
            &client.endpoints().playlists().list(),
            &json!({"title": "Lobby", "is_active": true}),
        )
        .await
        .unwrap();
    assert_eq!(created["id"], 5);
}

#[tokio::test]
async fn put_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/devices/RPI-7"))
        .and(body_json(json!({"name": "Caja 2"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"device_id": "RPI-7", "name": "Caja 2"}))
                .insert_header("Content-Type", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let updated = client
        .put(&client.endpoints().devices().by_id("RPI-7"), &json!({"name": "Caja 2"}))
        .await
        .unwrap();
    assert_eq!(updated["name"], "Caja 2");
}

#[tokio::test]
async fn delete_204_resolves_to_true() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/videos/3"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let value = client.delete(&client.endpoints().videos().by_id(3)).await.unwrap();
    assert_eq!(value, json!(true));
}

#[tokio::test]
async fn delete_with_body_is_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/playlists/2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Playlist eliminada"}))
                .insert_header("Content-Type", "application/json"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let value = client.delete(&client.endpoints().playlists().by_id(2)).await.unwrap();
    assert_eq!(value["message"], "Playlist eliminada");
}

#[tokio::test]
async fn upload_sends_multipart_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/videos/upload"))
        .and(header_exists("Content-Type"))
        .and(body_string_contains("name=\"file\"; filename=\"spot.mp4\""))
        .and(body_string_contains("name=\"title\""))
        .and(body_string_contains("Spot verano"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": 11, "title": "Spot verano"}))
                .insert_header("Content-Type", "application/json"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let body = MultipartBody::new(FilePart::new("spot.mp4", b"fake-video".to_vec()).with_content_type("video/mp4"))
        .field("title", "Spot verano");
    let value = client
        .upload(&client.endpoints().videos().upload(), body)
        .await
        .unwrap();
    assert_eq!(value["id"], 11);

    let requests = server.received_requests().await.unwrap();
    let content_type = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="), "{content_type}");
}

#[tokio::test]
async fn error_messages_follow_body_priority() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/a"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"message": "X"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/b"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "Y"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/c"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/d"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let env = client.environment().clone();

    let err = client.get(&env.api_path("/a")).await.unwrap_err();
    assert_eq!((err.to_string(), err.status_code()), ("X".to_string(), Some(400)));
    let err = client.get(&env.api_path("/b")).await.unwrap_err();
    assert_eq!(err.to_string(), "Y");
    let err = client.get(&env.api_path("/c")).await.unwrap_err();
    assert_eq!(err.to_string(), "oops");
    let err = client.get(&env.api_path("/d")).await.unwrap_err();
    assert_eq!(err.to_string(), "HTTP 502: Bad Gateway");
    assert_eq!(err.url(), Some(env.api_path("/d").as_str()));

    // HTTP errors are never retried: one request per path.
    assert_eq!(server.received_requests().await.unwrap().len(), 4);
}

#[tokio::test]
async fn slow_responses_time_out_and_retry() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let options = RequestOptions::get()
        .timeout(Duration::from_millis(50))
        .max_retries(1);
    let err = client
        .fetch(&client.endpoints().system().stats(), options)
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Timeout { .. }));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn unreachable_server_is_network_failure() {
    let server = MockServer::start().await;
    let client = client_for(&server).await.with_max_retries(1);
    let url = client.endpoints().system().health();
    drop(server);

    let err = client.get(&url).await.unwrap_err();
    assert!(err.is_network_error(), "{err:?}");
}

#[tokio::test]
async fn global_headers_apply_to_later_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/user"))
        .and(header("Authorization", "Bearer session-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("me"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut headers = std::collections::HashMap::new();
    headers.insert("Authorization".to_string(), "Bearer session-1".to_string());
    let authed = client.with_global_headers(&headers).unwrap();

    let value = authed.get(&authed.endpoints().auth().user()).await.unwrap();
    assert_eq!(value, json!("me"));
}
