//! The request description accumulated by a spec.

use bytes::Bytes;
use http::{HeaderMap, Method, Uri};
use http_body_util::Full;

use crate::error::SpecError;

/// The description of one outgoing request.
///
/// Accumulated in memory by the spec builder; nothing is dispatched until
/// the spec's terminal operation converts it with [`into_http`](Self::into_http).
#[derive(Debug, Clone)]
pub struct SpecRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path; made absolute at dispatch time.
    pub path: String,
    /// Request headers. Setting an existing name replaces its prior value.
    pub headers: HeaderMap,
    /// Optional raw body payload.
    pub body: Option<Bytes>,
}

impl SpecRequest {
    /// Creates a request description for the given method and path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Returns the path in absolute form, prefixing `/` iff it is missing.
    #[must_use]
    pub fn normalized_path(&self) -> String {
        if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        }
    }

    /// Converts this description into a framework-facing HTTP request.
    ///
    /// The path is normalized to absolute form and a missing body becomes an
    /// empty one.
    pub fn into_http(self) -> Result<http::Request<Full<Bytes>>, SpecError> {
        let path = self.normalized_path();
        let uri: Uri = path
            .parse()
            .map_err(|e: http::uri::InvalidUri| SpecError::invalid_path(&path, e.to_string()))?;

        let mut builder = http::Request::builder().method(self.method).uri(uri);
        for (name, value) in &self.headers {
            builder = builder.header(name, value);
        }

        builder
            .body(Full::new(self.body.unwrap_or_default()))
            .map_err(|e| SpecError::invalid_path(&path, e.to_string()))
    }
}
