//! # Hypatia Core
//!
//! Value types shared by the Hypatia in-process HTTP test harness:
//! the request description accumulated by a spec, the read-only response
//! view that expectations evaluate, the pluggable structured-data codec
//! seam, and the shared error taxonomy.
//!
//! Most users depend on the `hypatia` crate, which re-exports everything
//! here.

#![doc(html_root_url = "https://docs.rs/hypatia-core/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod codec;
mod error;
mod request;
mod response;

pub use codec::{CodecError, Decode, Encode, JsonCodec};
pub use error::{SpecError, SpecResult};
pub use request::SpecRequest;
pub use response::SpecResponse;
