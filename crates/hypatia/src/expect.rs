//! Deferred response expectations.
//!
//! Each registration call on a [`Spec`](crate::Spec) appends one variant
//! here; the terminal operation evaluates them in registration order
//! against the single response.

use http::header::HeaderName;
use hypatia_core::{Decode, SpecResponse};
use serde::de::DeserializeOwned;

/// One deferred check against the eventual response.
pub(crate) enum Expectation {
    /// Status code equality.
    Status(u16),
    /// Header presence, optionally with exact value-list equality.
    Header {
        name: HeaderName,
        values: Option<Vec<String>>,
    },
    /// `Content-Type` equality against the actual header value.
    ContentType(String),
    /// Body decode plus caller assertions on the decoded value.
    Decoded(Box<dyn FnOnce(&SpecResponse) -> Result<(), String> + Send>),
    /// Arbitrary caller check over the raw response.
    Custom(Box<dyn FnOnce(&SpecResponse) + Send>),
}

impl Expectation {
    /// Builds a decode expectation capturing the decoder and the caller's
    /// callback. The callback runs only when the body is present and
    /// decodes cleanly; otherwise the failure is recorded and it never
    /// runs.
    pub(crate) fn decoded<T, D, F>(decoder: D, on_decoded: F) -> Self
    where
        T: DeserializeOwned,
        D: Decode + Send + 'static,
        F: FnOnce(T) + Send + 'static,
    {
        Self::Decoded(Box::new(move |response| {
            let body = response
                .body()
                .ok_or_else(|| "expected a response body to decode, got none".to_string())?;
            let value: T = decoder.decode(body).map_err(|e| e.to_string())?;
            on_decoded(value);
            Ok(())
        }))
    }

    /// Short label naming the response facet, used in failure reports.
    pub(crate) fn facet(&self) -> &'static str {
        match self {
            Self::Status(_) => "status",
            Self::Header { .. } => "header",
            Self::ContentType(_) => "content-type",
            Self::Decoded(_) => "decoded body",
            Self::Custom(_) => "custom",
        }
    }

    /// Evaluates this expectation against the response.
    ///
    /// Structured mismatches come back as `Err`; a custom closure signals
    /// failure by panicking, which propagates to the test framework.
    pub(crate) fn check(self, response: &SpecResponse) -> Result<(), String> {
        match self {
            Self::Status(expected) => {
                let actual = response.status().as_u16();
                if actual == expected {
                    Ok(())
                } else {
                    Err(format!("expected status {expected}, got {actual}"))
                }
            }
            Self::Header { name, values } => {
                let actual = response.header_all(&name);
                if actual.is_empty() {
                    return Err(format!("header '{name}' not present"));
                }
                match values {
                    None => Ok(()),
                    Some(expected) if actual == expected => Ok(()),
                    Some(expected) => Err(format!(
                        "header '{name}': expected {expected:?}, got {actual:?}"
                    )),
                }
            }
            Self::ContentType(expected) => match response.content_type() {
                None => Err("Content-Type header not present".to_string()),
                Some(actual) if actual == expected => Ok(()),
                Some(actual) => Err(format!(
                    "Content-Type: expected '{expected}', got '{actual}'"
                )),
            },
            Self::Decoded(check) => check(response),
            Self::Custom(check) => {
                check(response);
                Ok(())
            }
        }
    }
}
