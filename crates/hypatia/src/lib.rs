//! # Hypatia
//!
//! A declarative harness for issuing synthetic HTTP requests against an
//! in-process web application and asserting on the response.
//!
//! A [`Spec`] is built by chaining: configure the request (method, path,
//! headers, body), register deferred expectations (status, headers,
//! content type, decoded body, custom checks), then run it once. The
//! request is driven through the application entirely in memory; no ports
//! are bound and no network I/O occurs. Expectations evaluate against the
//! single resulting response in registration order.
//!
//! ## Example
//!
//! ```ignore
//! use hypatia::{Harness, Testable};
//!
//! #[tokio::test]
//! async fn hello_is_served() {
//!     let app = Harness::text(200, "hello");
//!
//!     app.spec("hello_is_served")
//!         .get("hello")
//!         .expect_status(200)
//!         .expect_header_values("Content-Length", ["5"])
//!         .run()
//!         .await;
//! }
//! ```
//!
//! Applications plug in through the [`Testable`] trait; the bundled
//! [`Harness`] adapts any async handler function. Request and response
//! bodies encode and decode through the [`Encode`]/[`Decode`] seam,
//! defaulting to [`JsonCodec`].

#![doc(html_root_url = "https://docs.rs/hypatia/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod expect;
mod harness;
mod report;
mod spec;
mod testable;

pub use harness::{Harness, Request, Response};
pub use report::{Failure, Report};
pub use spec::Spec;
pub use testable::Testable;

pub use hypatia_core::{
    CodecError, Decode, Encode, JsonCodec, SpecError, SpecRequest, SpecResponse, SpecResult,
};
