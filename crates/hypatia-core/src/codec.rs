//! Pluggable structured-data codec seam.
//!
//! A spec encodes request bodies through [`Encode`] and decodes response
//! bodies through [`Decode`]. Both default to [`JsonCodec`], but any codec
//! can be supplied per call.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

/// Errors produced by an encoder or decoder.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Serializing a structured value into body bytes failed.
    #[error("encode error: {message}")]
    Encode {
        /// Human-readable description of the serialization failure.
        message: String,
    },

    /// Deserializing body bytes into a structured value failed.
    #[error("decode error: {message}")]
    Decode {
        /// Human-readable description of the deserialization failure.
        message: String,
    },

    /// A decode was requested but the response carried no body.
    #[error("expected a response body to decode, got none")]
    MissingBody,
}

impl CodecError {
    /// Creates an encode error with a message.
    #[must_use]
    pub fn encode(message: impl Into<String>) -> Self {
        Self::Encode {
            message: message.into(),
        }
    }

    /// Creates a decode error with a message.
    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Serializes structured values into raw body bytes.
pub trait Encode {
    /// Encodes `value` into bytes, failing with [`CodecError::Encode`].
    fn encode<T: Serialize>(&self, value: &T) -> Result<Bytes, CodecError>;
}

/// Deserializes raw body bytes into structured values.
pub trait Decode {
    /// Decodes `bytes` into a `T`, failing with [`CodecError::Decode`].
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// The default codec: JSON via `serde_json`.
///
/// Date/time values serialize in RFC 3339 textual form through chrono's
/// serde implementations, so encode/decode is a left-inverse pair for
/// timestamped payloads as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    /// Media type advertised for bodies produced by this codec.
    pub const MEDIA_TYPE: &'static str = "application/json";
}

impl Encode for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Bytes, CodecError> {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| CodecError::encode(e.to_string()))
    }
}

impl Decode for JsonCodec {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::decode(e.to_string()))
    }
}
