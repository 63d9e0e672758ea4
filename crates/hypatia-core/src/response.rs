//! Read-only response view evaluated by expectations.

use bytes::Bytes;
use http::{header, HeaderMap, HeaderValue, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt;

use crate::codec::{CodecError, Decode, JsonCodec};
use crate::error::SpecError;

/// The application's answer to one spec request.
///
/// `body` is `None` when the application produced no body bytes, so a
/// missing body is distinguishable from an empty string and can fail a
/// decode expectation explicitly.
pub struct SpecResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl SpecResponse {
    /// Creates a response from raw parts.
    #[must_use]
    pub fn new(status: StatusCode, headers: HeaderMap, body: Option<Bytes>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Collects an HTTP response into a spec response.
    ///
    /// An empty collected body maps to `None`.
    pub async fn from_http<B>(response: http::Response<B>) -> Result<Self, SpecError>
    where
        B: http_body_util::BodyExt,
        B::Error: fmt::Display,
    {
        let (parts, body) = response.into_parts();
        let bytes = body
            .collect()
            .await
            .map_err(|e| SpecError::app(format!("failed to read response body: {e}")))?
            .to_bytes();

        let body = if bytes.is_empty() { None } else { Some(bytes) };
        Ok(Self {
            status: parts.status,
            headers: parts.headers,
            body,
        })
    }

    /// Returns the status code.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns a reference to the headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Gets a header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: impl header::AsHeaderName) -> Option<&HeaderValue> {
        self.headers.get(name)
    }

    /// Gets a header value as a string.
    #[must_use]
    pub fn header_str(&self, name: impl header::AsHeaderName) -> Option<&str> {
        self.header(name).and_then(|v| v.to_str().ok())
    }

    /// Gets every value of a header, in insertion order.
    #[must_use]
    pub fn header_all(&self, name: impl header::AsHeaderName) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Returns the `Content-Type` header value, if present.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header_str(header::CONTENT_TYPE)
    }

    /// Returns the raw body bytes, if the response carried any.
    #[must_use]
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Returns the body as a string; an absent body yields an empty string.
    pub fn text(&self) -> Result<String, SpecError> {
        match &self.body {
            None => Ok(String::new()),
            Some(bytes) => String::from_utf8(bytes.to_vec())
                .map_err(|e| SpecError::app(format!("response body is not valid UTF-8: {e}"))),
        }
    }

    /// Decodes the body as JSON with the default codec.
    ///
    /// Fails with [`CodecError::MissingBody`] when there is no body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, CodecError> {
        let body = self.body.as_deref().ok_or(CodecError::MissingBody)?;
        JsonCodec.decode(body)
    }
}

impl fmt::Debug for SpecResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpecResponse")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .field("body_len", &self.body.as_ref().map_or(0, Bytes::len))
            .finish()
    }
}
