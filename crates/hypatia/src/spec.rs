//! The fluent request spec and its terminal operations.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use hypatia_core::{Decode, Encode, JsonCodec, SpecError, SpecRequest, SpecResponse, SpecResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::expect::Expectation;
use crate::report::Report;
use crate::testable::Testable;

/// A declarative description of one request and the expectations to hold
/// against its response.
///
/// Created from [`Testable::spec`]; configured by chaining; consumed by
/// [`run`](Self::run) or [`try_run`](Self::try_run). The terminal
/// operations take the spec by value, so running it twice is a
/// compile-time error.
///
/// A configuration error while chaining (malformed header, failed body
/// encode) poisons the spec: later calls are inert and the error surfaces
/// from the terminal operation before anything is dispatched.
#[must_use]
pub struct Spec<'a, A> {
    app: &'a A,
    name: String,
    request: SpecRequest,
    expectations: Vec<Expectation>,
    poisoned: Option<SpecError>,
}

impl<'a, A: Testable> Spec<'a, A> {
    pub(crate) fn new(app: &'a A, name: impl Into<String>) -> Self {
        Self {
            app,
            name: name.into(),
            request: SpecRequest::new(Method::GET, "/"),
            expectations: Vec::new(),
            poisoned: None,
        }
    }

    /// Sets the request method and path.
    pub fn on(mut self, method: Method, path: impl Into<String>) -> Self {
        self.request.method = method;
        self.request.path = path.into();
        self
    }

    /// Shorthand for [`on`](Self::on) with `GET`.
    pub fn get(self, path: impl Into<String>) -> Self {
        self.on(Method::GET, path)
    }

    /// Shorthand for [`on`](Self::on) with `POST`.
    pub fn post(self, path: impl Into<String>) -> Self {
        self.on(Method::POST, path)
    }

    /// Shorthand for [`on`](Self::on) with `PUT`.
    pub fn put(self, path: impl Into<String>) -> Self {
        self.on(Method::PUT, path)
    }

    /// Shorthand for [`on`](Self::on) with `PATCH`.
    pub fn patch(self, path: impl Into<String>) -> Self {
        self.on(Method::PATCH, path)
    }

    /// Shorthand for [`on`](Self::on) with `DELETE`.
    pub fn delete(self, path: impl Into<String>) -> Self {
        self.on(Method::DELETE, path)
    }

    fn poison(mut self, error: SpecError) -> Self {
        // Only the first configuration error is kept.
        if self.poisoned.is_none() {
            self.poisoned = Some(error);
        }
        self
    }

    /// Sets a header, replacing any prior value of the same name.
    ///
    /// Empty or malformed names and values poison the spec.
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        let value = value.as_ref();
        if name.is_empty() || value.is_empty() {
            return self.poison(SpecError::invalid_header(
                name,
                "name and value must be non-empty",
            ));
        }
        let header_name = match HeaderName::try_from(name) {
            Ok(n) => n,
            Err(e) => return self.poison(SpecError::invalid_header(name, e.to_string())),
        };
        let header_value = match HeaderValue::try_from(value) {
            Ok(v) => v,
            Err(e) => return self.poison(SpecError::invalid_header(name, e.to_string())),
        };
        self.request.headers.insert(header_name, header_value);
        self
    }

    /// Sets `Authorization: Bearer <token>`.
    pub fn bearer_auth(self, token: impl AsRef<str>) -> Self {
        self.header(AUTHORIZATION.as_str(), format!("Bearer {}", token.as_ref()))
    }

    /// Sets the raw request body.
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// Encodes `value` with `encoder` and sets the result as the body.
    ///
    /// An encoding failure poisons the spec; nothing is ever sent.
    pub fn body_encoded<T: Serialize, E: Encode>(self, value: &T, encoder: &E) -> Self {
        match encoder.encode(value) {
            Ok(bytes) => self.body(bytes),
            Err(e) => self.poison(e.into()),
        }
    }

    /// Encodes `value` with the default JSON codec and sets it as the body.
    pub fn body_json<T: Serialize>(self, value: &T) -> Self {
        self.body_encoded(value, &JsonCodec)
    }

    // ---- expectation registration ----

    /// Expects the response status to equal `status`.
    pub fn expect_status(mut self, status: u16) -> Self {
        self.expectations.push(Expectation::Status(status));
        self
    }

    /// Expects a header named `name` to be present, with any value.
    pub fn expect_header(self, name: impl AsRef<str>) -> Self {
        self.push_header_expectation(name.as_ref(), None)
    }

    /// Expects header `name` to carry exactly `values`, in order.
    pub fn expect_header_values<I, V>(self, name: impl AsRef<str>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.push_header_expectation(name.as_ref(), Some(values))
    }

    fn push_header_expectation(mut self, name: &str, values: Option<Vec<String>>) -> Self {
        match HeaderName::try_from(name) {
            Ok(name) => {
                self.expectations.push(Expectation::Header { name, values });
                self
            }
            Err(e) => self.poison(SpecError::invalid_header(name, e.to_string())),
        }
    }

    /// Expects the `Content-Type` header to be present and equal `value`.
    pub fn expect_content_type(mut self, value: impl Into<String>) -> Self {
        self.expectations.push(Expectation::ContentType(value.into()));
        self
    }

    /// Expects a body that `decoder` can decode as `T`, then runs
    /// `on_decoded` with the decoded value.
    ///
    /// A missing body or a decode error is recorded as a failure and the
    /// callback does not run.
    pub fn expect_decoded<T, D, F>(mut self, decoder: D, on_decoded: F) -> Self
    where
        T: DeserializeOwned,
        D: Decode + Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        self.expectations.push(Expectation::decoded(decoder, on_decoded));
        self
    }

    /// [`expect_decoded`](Self::expect_decoded) with the default JSON codec.
    pub fn expect_json<T, F>(self, on_decoded: F) -> Self
    where
        T: DeserializeOwned,
        F: FnOnce(T) + Send + 'static,
    {
        self.expect_decoded(JsonCodec, on_decoded)
    }

    /// Runs an arbitrary check against the raw response.
    ///
    /// A panic inside the closure propagates to the test framework as a
    /// failure.
    pub fn expect_with<F>(mut self, check: F) -> Self
    where
        F: FnOnce(&SpecResponse) + Send + 'static,
    {
        self.expectations.push(Expectation::Custom(Box::new(check)));
        self
    }

    // ---- composite JSON round trip ----

    /// Sends `body` as JSON and expects `status`, a JSON content type, and
    /// a response body decodable as `T`, handed to `on_decoded`.
    ///
    /// Sets `Accept` and `Content-Type` to `application/json`.
    pub fn exchange_json<B, T, F>(self, body: &B, status: u16, on_decoded: F) -> Self
    where
        B: Serialize,
        T: DeserializeOwned,
        F: FnOnce(T) + Send + 'static,
    {
        self.json_headers()
            .body_json(body)
            .expect_status(status)
            .expect_content_type(JsonCodec::MEDIA_TYPE)
            .expect_json(on_decoded)
    }

    /// Sends `body` as JSON and expects `status`, handing the raw response
    /// to `on_response`.
    pub fn send_json<B, F>(self, body: &B, status: u16, on_response: F) -> Self
    where
        B: Serialize,
        F: FnOnce(&SpecResponse) + Send + 'static,
    {
        self.json_headers()
            .body_json(body)
            .expect_status(status)
            .expect_with(on_response)
    }

    /// Expects `status`, a JSON content type, and a response body decodable
    /// as `T`; no request body is sent.
    pub fn receive_json<T, F>(self, status: u16, on_decoded: F) -> Self
    where
        T: DeserializeOwned,
        F: FnOnce(T) + Send + 'static,
    {
        self.header(ACCEPT.as_str(), JsonCodec::MEDIA_TYPE)
            .expect_status(status)
            .expect_content_type(JsonCodec::MEDIA_TYPE)
            .expect_json(on_decoded)
    }

    fn json_headers(self) -> Self {
        self.header(ACCEPT.as_str(), JsonCodec::MEDIA_TYPE)
            .header(CONTENT_TYPE.as_str(), JsonCodec::MEDIA_TYPE)
    }

    // ---- terminal operations ----

    /// Runs the spec, returning the aggregated report.
    ///
    /// Surfaces any configuration error recorded while chaining before the
    /// request is dispatched. Application errors propagate as `Err`;
    /// expectation mismatches are recorded in the returned [`Report`].
    pub async fn try_run(self) -> SpecResult<Report> {
        let Self {
            app,
            name,
            mut request,
            expectations,
            poisoned,
        } = self;

        if let Some(error) = poisoned {
            return Err(error);
        }

        request.path = request.normalized_path();

        debug!(
            spec = %name,
            method = %request.method,
            path = %request.path,
            expectations = expectations.len(),
            "dispatching spec request"
        );

        let response = app.handle(request).await?;

        let mut report = Report::new(name, expectations.len());
        for (index, expectation) in expectations.into_iter().enumerate() {
            let facet = expectation.facet();
            if let Err(message) = expectation.check(&response) {
                debug!(index, facet, %message, "expectation failed");
                report.record(index, facet, message);
            }
        }
        Ok(report)
    }

    /// Runs the spec and panics on any failure.
    ///
    /// # Panics
    ///
    /// Panics with the rendered report when an expectation fails, or with
    /// the error message when the spec was misconfigured or the
    /// application itself failed.
    pub async fn run(self) {
        match self.try_run().await {
            Ok(report) => assert!(report.is_pass(), "{report}"),
            Err(error) => panic!("spec failed to run: {error}"),
        }
    }
}
