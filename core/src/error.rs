//! Error types for the shopping-list client.
//!
//! # Design
//! `NotFound` and `BadRequest` get dedicated variants because the UI reacts
//! to them specifically (a stale id, a rejected name). All other non-2xx
//! responses land in `HttpError` with the raw status and body.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404: the item does not exist.
    #[error("item not found")]
    NotFound,

    /// The server returned 400 with this message.
    #[error("rejected by server: {0}")]
    BadRequest(String),

    /// The server returned a non-2xx status other than 400 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),

    /// The host could not complete the round-trip.
    #[error("transport failed: {0}")]
    TransportError(String),
}
