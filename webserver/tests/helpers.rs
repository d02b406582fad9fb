//! Test helper utilities for webserver integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use webserver::{SqliteLeadStore, WebServer};

/// Router over a fresh in-memory store, plus a handle on that store
pub fn create_test_app() -> (Router, Arc<SqliteLeadStore>) {
    let store = Arc::new(SqliteLeadStore::open_in_memory().expect("in-memory store"));
    let router = WebServer::with_shared_store(Arc::clone(&store)).build_router();
    (router, store)
}

/// Response status, headers of interest, and body text
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub content_type: Option<String>,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> TestResponse {
    let response = router.clone().oneshot(request).await.expect("router is infallible");
    let status = response.status();
    let header_value = |name: header::HeaderName| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let location = header_value(header::LOCATION);
    let content_type = header_value(header::CONTENT_TYPE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("readable body");

    TestResponse {
        status,
        location,
        content_type,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    }
}

pub async fn get(router: &Router, uri: &str) -> TestResponse {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}

pub async fn post_form(router: &Router, uri: &str, form: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(router, request).await
}

pub async fn post_json(router: &Router, uri: &str, body: &Value) -> TestResponse {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

pub async fn post_empty(router: &Router, uri: &str) -> TestResponse {
    let request = Request::builder().method(Method::POST).uri(uri).body(Body::empty()).unwrap();
    send(router, request).await
}
