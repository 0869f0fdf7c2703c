//! Shared helpers: a wiremock stand-in for the Gemini `generateContent`
//! endpoint and a bridge for running blocking code from async tests.

#![allow(dead_code)]

use serde_json::{json, Value};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Any model's generateContent route.
pub const GENERATE_CONTENT_PATH: &str = r"^/v1beta/models/[^/]+:generateContent$";

/// Successful response body carrying a single text candidate.
pub fn candidate_body(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

/// Start a server answering every generateContent call with `text`.
pub async fn start_replying(text: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(GENERATE_CONTENT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate_body(text)))
        .mount(&server)
        .await;
    server
}

/// Start a server answering every generateContent call with `status` and a raw body.
pub async fn start_failing(status: u16, body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(GENERATE_CONTENT_PATH))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "application/json")
                .set_body_string(body),
        )
        .mount(&server)
        .await;
    server
}

pub async fn received(server: &MockServer) -> Vec<Request> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
}

/// Run blocking work (the reqwest blocking client, a child process) off the
/// async test runtime so the mock server keeps serving.
pub async fn blocking<T, F>(f: F) -> T
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .expect("blocking task panicked")
}
