//! Bundled in-memory executor for handler-style applications.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_LENGTH};
use http::StatusCode;
use http_body_util::{BodyExt, Full};
use hypatia_core::{SpecRequest, SpecResponse, SpecResult};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::testable::Testable;

/// The HTTP request type handed to harness handlers.
pub type Request = http::Request<Full<Bytes>>;

/// The HTTP response type produced by harness handlers.
pub type Response = http::Response<Full<Bytes>>;

type Handler =
    Arc<dyn Fn(Request) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync>;

/// An in-memory application built from a handler function.
///
/// Every spec request runs through the handler without sockets or ports.
/// Like a real embedded server stack, the harness fills in
/// `Content-Length` when the handler omits it.
///
/// # Example
///
/// ```ignore
/// use hypatia::{Harness, Testable};
///
/// let app = Harness::new(|req| async move {
///     http::Response::builder()
///         .status(200)
///         .body(Full::new(Bytes::from("OK")))
///         .unwrap()
/// });
///
/// app.spec("ok").get("/").expect_status(200).run().await;
/// ```
#[must_use]
pub struct Harness {
    handler: Handler,
    default_headers: Vec<(HeaderName, HeaderValue)>,
}

impl Harness {
    /// Creates a harness from a handler function.
    pub fn new<F, Fut>(handler: F) -> Self
    where
        F: Fn(Request) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        Self {
            handler: Arc::new(move |req| Box::pin(handler(req))),
            default_headers: Vec::new(),
        }
    }

    /// A harness answering every request with a JSON echo of its method
    /// and path.
    pub fn echo() -> Self {
        Self::new(|req| async move {
            let body = format!(
                "{{\"method\":\"{}\",\"path\":\"{}\"}}",
                req.method(),
                req.uri().path()
            );
            http::Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "application/json")
                .body(Full::new(Bytes::from(body)))
                .expect("valid response")
        })
    }

    /// A harness answering every request with a fixed plain-text response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        let body = body.into();
        Self::new(move |_req| {
            let body = body.clone();
            async move {
                http::Response::builder()
                    .status(status)
                    .header("content-type", "text/plain; charset=utf-8")
                    .body(Full::new(Bytes::from(body)))
                    .expect("valid response")
            }
        })
    }

    /// Adds a header applied to every request before the handler runs.
    ///
    /// # Panics
    ///
    /// Panics when the name or value is not a valid header.
    pub fn with_default_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = HeaderName::try_from(name.as_ref()).expect("valid header name");
        let value = HeaderValue::try_from(value.as_ref()).expect("valid header value");
        self.default_headers.push((name, value));
        self
    }
}

impl Testable for Harness {
    async fn handle(&self, mut request: SpecRequest) -> SpecResult<SpecResponse> {
        for (name, value) in &self.default_headers {
            request.headers.insert(name.clone(), value.clone());
        }

        let response = (self.handler)(request.into_http()?).await;

        let (mut parts, body) = response.into_parts();
        let bytes = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(never) => match never {},
        };
        if !parts.headers.contains_key(CONTENT_LENGTH) {
            parts.headers.insert(CONTENT_LENGTH, HeaderValue::from(bytes.len()));
        }

        let body = if bytes.is_empty() { None } else { Some(bytes) };
        Ok(SpecResponse::new(parts.status, parts.headers, body))
    }
}
