//! Retry, timeout and interceptor behaviour of the request executor.
//!
//! These tests drive the executor through a scripted transport with tokio's
//! clock paused, so timeouts and backoff delays are observed exactly.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use tokio::time::Instant;
use vidcast_admin::execution::http::transport::TransportRequest;
use vidcast_admin::prelude::*;
use vidcast_admin::{HttpTransport, RequestContext};

#[derive(Clone, Copy)]
enum Outcome {
    Respond(u16, &'static str),
    Reset,
    Hang,
}

struct ScriptedTransport {
    script: Mutex<VecDeque<Outcome>>,
    fallback: Outcome,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedTransport {
    fn new(script: Vec<Outcome>, fallback: Outcome) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<ApiResponse, ApiError> {
        self.calls.lock().unwrap().push(Instant::now());
        let outcome = self.script.lock().unwrap().pop_front().unwrap_or(self.fallback);
        match outcome {
            Outcome::Respond(status, body) => {
                let mut headers = HeaderMap::new();
                if body.starts_with('{') || body.starts_with('[') {
                    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                }
                Ok(ApiResponse::new(request.url, status, headers, body))
            }
            Outcome::Reset => Err(ApiError::network(request.url, "connection reset by peer")),
            Outcome::Hang => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

fn client(transport: Arc<ScriptedTransport>, max_retries: u32) -> ApiClient {
    ApiClient::builder()
        .base_url("https://app.example.com")
        .unwrap()
        .transport(transport)
        .timeout(Duration::from_millis(1000))
        .max_retries(max_retries)
        .retry_delay(Duration::from_millis(100))
        .build()
        .unwrap()
}

fn assert_close(actual: Duration, expected: Duration) {
    assert!(
        actual >= expected && actual < expected + Duration::from_millis(5),
        "expected ~{expected:?}, got {actual:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn timeout_on_every_attempt_uses_linear_backoff() {
    let transport = ScriptedTransport::new(vec![], Outcome::Hang);
    let client = client(transport.clone(), 3);

    let err = client
        .get("https://app.example.com/api/videos")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ApiError::Timeout { ref url, timeout } if url == "https://app.example.com/api/videos"
            && timeout == Duration::from_millis(1000)
    ));

    let calls = transport.call_times();
    assert_eq!(calls.len(), 4);
    for (index, pair) in calls.windows(2).enumerate() {
        // Each gap is the timeout plus retry_delay * (attempt + 1).
        let backoff = Duration::from_millis(100) * (index as u32 + 1);
        assert_close(pair[1] - pair[0], Duration::from_millis(1000) + backoff);
    }
}

#[tokio::test(start_paused = true)]
async fn success_returns_without_retry() {
    let transport = ScriptedTransport::new(
        vec![Outcome::Respond(200, r#"{"videos":[{"id":1}]}"#)],
        Outcome::Reset,
    );
    let client = client(transport.clone(), 3);

    let value = client.get("https://app.example.com/api/videos").await.unwrap();
    assert_eq!(value, serde_json::json!({"videos": [{"id": 1}]}));
    assert_eq!(transport.call_times().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn redirect_status_counts_as_success() {
    let transport = ScriptedTransport::new(vec![Outcome::Respond(304, "")], Outcome::Reset);
    let client = client(transport.clone(), 3);

    let response = client
        .fetch("https://app.example.com/api/videos", RequestOptions::get())
        .await
        .unwrap();
    assert_eq!(response.status(), 304);
    assert_eq!(transport.call_times().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn http_error_is_not_retried() {
    let transport = ScriptedTransport::new(vec![], Outcome::Respond(500, r#"{"detail":"db down"}"#));
    let client = client(transport.clone(), 3);

    let err = client
        .get("https://app.example.com/api/playlists")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(500));
    assert_eq!(err.to_string(), "db down");
    assert_eq!(transport.call_times().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn network_failure_recovers_on_retry() {
    let transport = ScriptedTransport::new(
        vec![Outcome::Reset, Outcome::Hang, Outcome::Respond(200, "[]")],
        Outcome::Reset,
    );
    let client = client(transport.clone(), 3);

    let value = client.get("https://app.example.com/api/devices").await.unwrap();
    assert_eq!(value, serde_json::json!([]));

    let calls = transport.call_times();
    assert_eq!(calls.len(), 3);
    assert_close(calls[1] - calls[0], Duration::from_millis(100));
    assert_close(calls[2] - calls[1], Duration::from_millis(1000 + 200));
}

#[tokio::test(start_paused = true)]
async fn per_call_overrides_take_precedence() {
    let transport = ScriptedTransport::new(vec![], Outcome::Reset);
    let client = client(transport.clone(), 3);

    let options = RequestOptions::get()
        .max_retries(1)
        .retry_delay(Duration::from_millis(10));
    let err = client
        .fetch("https://app.example.com/api/stats", options)
        .await
        .unwrap_err();

    assert!(err.is_network_error());
    let calls = transport.call_times();
    assert_eq!(calls.len(), 2);
    assert_close(calls[1] - calls[0], Duration::from_millis(10));
}

#[tokio::test(start_paused = true)]
async fn zero_retries_means_single_attempt() {
    let transport = ScriptedTransport::new(vec![], Outcome::Hang);
    let client = client(transport.clone(), 0);

    let err = client.get("https://app.example.com/api/health").await.unwrap_err();
    assert!(matches!(err, ApiError::Timeout { .. }));
    assert_eq!(transport.call_times().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn interceptors_observe_every_attempt_in_order() {
    let transport = ScriptedTransport::new(
        vec![Outcome::Reset, Outcome::Respond(404, "missing")],
        Outcome::Reset,
    );
    let client = client(transport, 3);

    let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let request_log = log.clone();
    client.add_request_interceptor(move |ctx: &RequestContext| {
        request_log
            .lock()
            .unwrap()
            .push(format!("request {} #{}", ctx.method, ctx.attempt));
    });
    let response_log = log.clone();
    client.add_response_interceptor(move |response: &ApiResponse, url: &str| {
        response_log
            .lock()
            .unwrap()
            .push(format!("response {} {url}", response.status()));
    });

    let err = client
        .get("https://app.example.com/api/videos/9")
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "missing");

    assert_eq!(
        *log.lock().unwrap(),
        vec![
            "request GET #0".to_string(),
            "request GET #1".to_string(),
            "response 404 https://app.example.com/api/videos/9".to_string(),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn removed_interceptor_is_not_called() {
    let transport = ScriptedTransport::new(vec![], Outcome::Respond(200, "ok"));
    let client = client(transport, 0);

    let hits = Arc::new(Mutex::new(0u32));
    let counter = hits.clone();
    let handle = client.add_response_interceptor(move |_: &ApiResponse, _: &str| {
        *counter.lock().unwrap() += 1;
    });

    client.get("https://app.example.com/api/version").await.unwrap();
    assert!(handle.remove());
    client.get("https://app.example.com/api/version").await.unwrap();

    assert_eq!(*hits.lock().unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn unauthorized_response_flags_auth_expiry() {
    let transport = ScriptedTransport::new(
        vec![Outcome::Respond(401, r#"{"detail":"Not authenticated"}"#)],
        Outcome::Respond(200, "{}"),
    );
    let client = client(transport, 3);
    assert!(!client.auth_expired());

    let err = client.get("https://app.example.com/api/auth/user").await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.to_string(), "Not authenticated");
    assert!(client.auth_expired());

    client.reset_auth_expired();
    client.get("https://app.example.com/api/auth/user").await.unwrap();
    assert!(!client.auth_expired());
}
