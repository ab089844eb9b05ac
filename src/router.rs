//! Route registry and dispatch table.
//!
//! Compiles route descriptors into an immutable URI -> response mapping.
//! Status, headers, and body are fixed once at registration time and shared
//! read-only across all request handlers.

use crate::config::RouteDescriptor;
use crate::latency::Latency;
use axum::body::{Body, Bytes};
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::Response;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Default content type, applied before any configured headers.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Errors raised while compiling a route descriptor.
#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("invalid status code {0}")]
    InvalidStatus(u16),

    #[error("invalid header name {0:?}")]
    InvalidHeaderName(String),

    #[error("invalid value for header {0:?}")]
    InvalidHeaderValue(String),

    #[error("failed to serialize body: {0}")]
    Body(#[from] serde_json::Error),
}

/// A compiled route: the exact response served for one URI.
#[derive(Debug, Clone)]
pub struct MockRoute {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
    latency: Latency,
}

impl MockRoute {
    /// Compile a descriptor into its servable form.
    ///
    /// The body, if present, is serialized to bytes here, once; every
    /// response reuses the same bytes. Configured headers are folded into
    /// the header map after the default `Content-Type`, so a same-named
    /// header (compared case-insensitively) replaces it.
    pub fn compile(desc: &RouteDescriptor) -> Result<Self, RegisterError> {
        let status = StatusCode::from_u16(desc.status_code)
            .map_err(|_| RegisterError::InvalidStatus(desc.status_code))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(DEFAULT_CONTENT_TYPE),
        );
        for (name, value) in &desc.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| RegisterError::InvalidHeaderName(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| RegisterError::InvalidHeaderValue(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        let body = match &desc.body {
            Some(value) => Some(Bytes::from(serde_json::to_vec(value)?)),
            None => None,
        };

        Ok(Self {
            status,
            headers,
            body,
            latency: desc.latency,
        })
    }

    /// Status code served by this route.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Full header map served by this route, default content type included.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Pre-rendered body bytes, if the route has a body.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Latency configuration for this route.
    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Apply the simulated latency, then produce the canned response.
    ///
    /// The sleep suspends only the calling request's task.
    pub async fn respond(&self) -> Response {
        let delay = self.latency.duration();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.response()
    }

    /// Build the response without applying latency.
    pub fn response(&self) -> Response {
        let body = match &self.body {
            Some(bytes) => Body::from(bytes.clone()),
            None => Body::empty(),
        };
        let mut response = Response::new(body);
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers.clone();
        response
    }

    /// Human-readable startup block for one registered route.
    pub fn summary(&self, uri: &str) -> String {
        let body = self
            .body
            .as_deref()
            .map(String::from_utf8_lossy)
            .unwrap_or_default();
        format!(
            "==\nuri={}\nstatusCode={}\nbody={}\nlatency=average:{}ms delta:{}ms",
            uri,
            self.status.as_u16(),
            body,
            self.latency.average,
            self.latency.delta
        )
    }
}

/// Immutable registry mapping request paths to compiled routes.
#[derive(Debug, Clone, Default)]
pub struct MockRouter {
    routes: HashMap<String, Arc<MockRoute>>,
}

impl MockRouter {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile and register every descriptor, in configuration order.
    pub fn from_descriptors(descriptors: &[RouteDescriptor]) -> Result<Self, RegisterError> {
        let mut router = Self::new();
        for desc in descriptors {
            router.register(desc.uri.clone(), MockRoute::compile(desc)?);
        }
        Ok(router)
    }

    /// Register a compiled route under `uri`.
    ///
    /// A later registration for the same URI replaces the earlier one.
    pub fn register(&mut self, uri: impl Into<String>, route: MockRoute) {
        self.routes.insert(uri.into(), Arc::new(route));
    }

    /// Exact path lookup. Query strings are not part of the key.
    pub fn lookup(&self, path: &str) -> Option<&Arc<MockRoute>> {
        self.routes.get(path)
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(json: &str) -> RouteDescriptor {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn compile_renders_body_once() {
        let desc = descriptor(r#"{"uri": "/a", "statusCode": 200, "body": {"a": 1}}"#);
        let route = MockRoute::compile(&desc).unwrap();

        let bytes = route.body().unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(parsed, serde_json::json!({"a": 1}));

        // Identical bytes on every render.
        let again = route.body().unwrap();
        assert_eq!(bytes, again);
    }

    #[test]
    fn compile_without_body() {
        let desc = descriptor(r#"{"uri": "/empty", "statusCode": 204}"#);
        let route = MockRoute::compile(&desc).unwrap();
        assert_eq!(route.status(), StatusCode::NO_CONTENT);
        assert!(route.body().is_none());
    }

    #[test]
    fn default_content_type_is_set() {
        let desc = descriptor(r#"{"uri": "/a"}"#);
        let route = MockRoute::compile(&desc).unwrap();
        assert_eq!(
            route.headers().get(header::CONTENT_TYPE).unwrap(),
            DEFAULT_CONTENT_TYPE
        );
    }

    #[test]
    fn configured_content_type_overrides_default() {
        let desc = descriptor(r#"{"uri": "/a", "header": {"content-type": "text/plain"}}"#);
        let route = MockRoute::compile(&desc).unwrap();
        let values: Vec<_> = route.headers().get_all(header::CONTENT_TYPE).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "text/plain");
    }

    #[test]
    fn mixed_case_content_type_overrides_default() {
        let desc = descriptor(r#"{"uri": "/a", "header": {"Content-Type": "text/html"}}"#);
        let route = MockRoute::compile(&desc).unwrap();
        let values: Vec<_> = route.headers().get_all(header::CONTENT_TYPE).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "text/html");
    }

    #[test]
    fn unrelated_header_keeps_default_content_type() {
        let desc = descriptor(r#"{"uri": "/a", "header": {"X-Custom": "value"}}"#);
        let route = MockRoute::compile(&desc).unwrap();
        assert_eq!(
            route.headers().get(header::CONTENT_TYPE).unwrap(),
            DEFAULT_CONTENT_TYPE
        );
        assert_eq!(route.headers().get("x-custom").unwrap(), "value");
    }

    #[test]
    fn compile_rejects_invalid_header_name() {
        let desc = descriptor(r#"{"uri": "/a", "header": {"bad header": "v"}}"#);
        assert!(matches!(
            MockRoute::compile(&desc),
            Err(RegisterError::InvalidHeaderName(_))
        ));
    }

    #[test]
    fn compile_rejects_invalid_status() {
        let desc = descriptor(r#"{"uri": "/a", "statusCode": 99}"#);
        assert!(matches!(
            MockRoute::compile(&desc),
            Err(RegisterError::InvalidStatus(99))
        ));
    }

    #[test]
    fn register_is_last_wins() {
        let descs: Vec<RouteDescriptor> = serde_json::from_str(
            r#"[
                {"uri": "/dup", "statusCode": 200, "body": {"v": "first"}},
                {"uri": "/dup", "statusCode": 201, "body": {"v": "second"}}
            ]"#,
        )
        .unwrap();

        let router = MockRouter::from_descriptors(&descs).unwrap();
        assert_eq!(router.len(), 1);

        let route = router.lookup("/dup").unwrap();
        assert_eq!(route.status(), StatusCode::CREATED);
        let parsed: serde_json::Value = serde_json::from_slice(route.body().unwrap()).unwrap();
        assert_eq!(parsed, serde_json::json!({"v": "second"}));
    }

    #[test]
    fn lookup_is_exact_match() {
        let descs = vec![descriptor(r#"{"uri": "/api/ping"}"#)];
        let router = MockRouter::from_descriptors(&descs).unwrap();

        assert!(router.lookup("/api/ping").is_some());
        assert!(router.lookup("/api/ping/").is_none());
        assert!(router.lookup("/api").is_none());
        assert!(router.lookup("/other").is_none());
    }

    #[test]
    fn summary_describes_route() {
        let desc = descriptor(
            r#"{"uri": "/api/ping", "statusCode": 200, "body": {"message": "pong"},
                "latency": {"average": 50, "delta": 20}}"#,
        );
        let route = MockRoute::compile(&desc).unwrap();
        let summary = route.summary("/api/ping");
        assert!(summary.contains("uri=/api/ping"));
        assert!(summary.contains("statusCode=200"));
        assert!(summary.contains(r#""message":"pong""#));
        assert!(summary.contains("average:50ms"));
        assert!(summary.contains("delta:20ms"));
    }

    #[tokio::test]
    async fn respond_applies_configured_delay() {
        let desc = descriptor(r#"{"uri": "/slow", "latency": {"average": 50, "delta": 1}}"#);
        let route = MockRoute::compile(&desc).unwrap();

        let start = std::time::Instant::now();
        let response = route.respond().await;
        assert!(start.elapsed() >= std::time::Duration::from_millis(50));
        assert_eq!(response.status(), StatusCode::OK);
    }
}
